pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Commands};

pub use adapters::LocalStorage;
pub use app::CommandRunner;
pub use config::AppConfig;
pub use crate::core::{engine::AnalyticsEngine, orchestrator::Orchestrator};
pub use utils::error::{AnalyticsError, Result};
