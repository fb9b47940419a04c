//! Command implementations.
//!
//! # Modules
//! - `compare` - Cross-language article comparison.
//! - `chat` - Follow-up questions about a comparison.
//! - `config` - Configuration show/validation.
//! - `init` - Starter config creation.
//! - `options` - Command option structs.
//! - `json` - JSON output helpers.
//!
//! # Architecture
//! ```text
//! CLI (cli.rs)
//!   ├── commands/compare.rs ─> comparison::ComparisonService
//!   ├── commands/chat.rs    ─> comparison::ComparisonService
//!   ├── commands/config.rs
//!   └── shared command options (commands/options.rs)
//! ```

/// Follow-up chat command flow.
pub mod chat;
/// Comparison command flow.
pub mod compare;
/// Configuration show/validation commands.
pub mod config;
/// Configuration initialization commands.
pub mod init;
/// Shared JSON output helpers.
pub mod json;
/// Shared command option structs.
pub mod options;

pub use options::{ChatOptions, CompareOptions};
