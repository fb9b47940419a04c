pub mod colors;
pub mod spinner;

pub use colors::*;
pub use spinner::Spinner;
