use crate::cli::{Cli, Commands};
use crate::config::ConfigStore;
use crate::registry::Registry;
use crate::util::xdg;
use anyhow::{Context, Result};

mod activate;
mod create;
mod deactivate;
mod delete;
mod dir;
mod info;
mod install;
mod list;
mod packages;
mod status;
mod uninstall;
mod upgrade;

pub fn execute(cli: Cli) -> Result<()> {
    // The registry is the root entry point; config is loaded once here
    let config_path = xdg::config_file().context("Failed to locate config file")?;
    let default_root = xdg::default_venv_dir().context("Failed to locate data directory")?;
    let mut registry = Registry::new(ConfigStore::load(config_path), default_root);

    if let Some(dir) = cli.venv_dir {
        registry.override_root(dir);
    }

    match cli.command {
        Commands::List => list::execute(&registry),

        Commands::Create { name } => create::execute(&mut registry, name),

        Commands::Delete { name, yes } => delete::execute(&mut registry, name, yes),

        Commands::Activate { name, shell } => activate::execute(&mut registry, name, shell),

        Commands::Deactivate => deactivate::execute(&mut registry),

        Commands::Info { name } => info::execute(&registry, name),

        Commands::Dir { path } => dir::execute(&mut registry, path),

        Commands::Status => status::execute(&registry),

        Commands::Packages { json } => packages::execute(&registry, json),

        Commands::Install { package } => install::execute(&registry, package),

        Commands::Uninstall { package, yes } => uninstall::execute(&registry, package, yes),

        Commands::Upgrade { package } => upgrade::execute(&registry, package),
    }
}

/// Ask before a destructive action unless `--yes` was given
pub(crate) fn confirmed(question: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    match crate::ui::confirm(question) {
        Some(answer) => Ok(answer),
        None => anyhow::bail!("{question} Re-run with --yes to confirm non-interactively."),
    }
}
