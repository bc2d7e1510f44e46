//! Runtime side of regime: feature store, configuration, the completion
//! executable, and the orchestrator that ties them to the pure pipeline in
//! `regime-shared`.

pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod store;

pub use config::{Config, DataConfig, LlmConfig, LogConfig};
pub use error::{ConfigError, RegimeError, StoreError};
pub use llm::{CompletionModel, LlamaCli};
pub use orchestrator::{prepare, Orchestrator, PreparedQuestion};
pub use store::{FeatureStore, StoreOverview};
