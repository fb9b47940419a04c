mod app;
mod llm;
mod network;
mod paths;

pub use app::{AppConfig, UIConfig};
pub use llm::{ApiStyle, LLMConfig, ProviderConfig, builtin_api_key_env, builtin_base_url};
pub use network::NetworkConfig;
pub use paths::{CandidateConfig, PathConfig, PathName, PathsConfig};
