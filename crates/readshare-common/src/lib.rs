//! # readshare-common
//!
//! Shared utilities for the readshare workspace: configuration loading,
//! application errors, and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, Environment, PresenceConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError,
};
