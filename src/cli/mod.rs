//! CLI commands module for confluence-sync.

pub mod app;
pub mod commands;

pub use app::{Cli, Commands, ConfigAction, SetupArgs};
