//! # Zynthian Web Configurator Common Library
//!
//! Shared code for the configurator crates:
//! - Error types
//! - Settings resolution (CLI, environment, TOML, defaults)
//! - Read-only access to the appliance environment
//! - External program execution with timeouts

pub mod config;
pub mod env;
pub mod error;
pub mod process;

pub use env::{EnvStore, MapEnv, OverlayEnv, ProcessEnv};
pub use error::{Error, Result};
pub use process::CommandRunner;
