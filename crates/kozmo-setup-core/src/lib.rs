// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{RunnerEnv, SetupConfig, ToolConfig};
pub use error::{Result, SetupError};
