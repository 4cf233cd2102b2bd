//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ConfigError)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup checks run after parsing

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::Config;
