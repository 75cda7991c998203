//! Library behind the `jolt` binary.
//!
//! Exposes the client, configuration and rendering layers so integration
//! tests can drive a run against a mock server.

pub mod api;
pub mod cli_args;
pub mod commands;
pub mod config;
pub mod error;
pub mod printer;
pub mod queries;
pub mod test_utils;

pub use api::{JoltClient, Location, LocationScope, ModeInput, ModeKind, QueryOutcome};
pub use cli_args::Cli;
pub use commands::{RunStatus, execute, run};
pub use config::{Settings, load_settings};
pub use error::JoltError;
