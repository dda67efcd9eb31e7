pub mod consts;
pub mod model;
pub mod runner;

pub use model::{SetupConfig, ToolConfig, ToolEntry};
pub use runner::RunnerEnv;
