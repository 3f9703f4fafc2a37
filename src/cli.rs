use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// venvman - Python virtual environment and package manager
///
/// venvman keeps your virtual environments under one root directory,
/// remembers which one is active, and runs pip against it. With no active
/// environment, package commands target the system interpreter.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment root for this invocation (not saved)
    #[arg(long, global = true, value_name = "PATH", env = "VENVMAN_VENV_DIR")]
    pub venv_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List virtual environments
    #[command(alias = "ls")]
    List,

    /// Create a virtual environment with pip
    Create {
        /// Environment name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Delete a virtual environment
    #[command(alias = "rm")]
    Delete {
        /// Environment name
        #[arg(value_name = "NAME")]
        name: String,

        /// Delete without confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Make an environment the target of package commands
    Activate {
        /// Environment name
        #[arg(value_name = "NAME")]
        name: String,

        /// Shell for the activation hint (auto-detects from $SHELL if not specified)
        #[arg(short, long, value_name = "SHELL")]
        shell: Option<String>,
    },

    /// Clear the active environment (package commands use the system interpreter)
    Deactivate,

    /// Show interpreter version, package count and size of an environment
    Info {
        /// Environment name
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Show or change the directory holding environments
    Dir {
        /// New environment root
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Show the environment root, active environment and pip target
    Status,

    /// List packages installed in the active environment
    Packages {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install a package
    Install {
        /// Package name or requirement specifier
        #[arg(value_name = "PACKAGE")]
        package: String,
    },

    /// Uninstall a package
    Uninstall {
        /// Package name
        #[arg(value_name = "PACKAGE")]
        package: String,

        /// Uninstall without confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Upgrade a package to its latest version
    Upgrade {
        /// Package name
        #[arg(value_name = "PACKAGE")]
        package: String,
    },
}
