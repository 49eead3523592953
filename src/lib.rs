pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::lambda::LambdaConfig;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::responder::Responder;
pub use crate::core::simulation::{SimulationState, SimulationStats, Viewport};
pub use crate::domain::model::{SketchKind, SketchParams, SketchResponse, SketchVariant};
pub use crate::utils::error::{Result, SketchError};
