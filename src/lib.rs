// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod config;
mod environment;
mod error;
mod packages;
mod process;
mod registry;
mod util;

// Re-export main types
pub use config::{Config, ConfigStore, General};
pub use environment::{Environment, Shell};
pub use error::{Error, Result};
pub use packages::{
    parse_freeze, parse_freeze_line, FreezeLineError, PackageManager, PackageRecord, PipTarget,
};
pub use process::{Invocation, SystemRunner, ToolOutput, ToolRunner};
pub use registry::{is_valid_name, EnvironmentInfo, Registry};
pub use util::xdg;
