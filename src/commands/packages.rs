use crate::registry::Registry;
use crate::ui;
use anyhow::{Context, Result};

pub fn execute(registry: &Registry, json: bool) -> Result<()> {
    let manager = registry.package_manager();
    let packages = manager.list()?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&packages).context("Failed to serialize package list")?;
        println!("{rendered}");
        return Ok(());
    }

    if packages.is_empty() {
        ui::info(format!("No packages installed for {}.", manager.target()));
        return Ok(());
    }

    let width = packages
        .iter()
        .map(|package| package.name.len())
        .max()
        .unwrap_or(0);
    for package in &packages {
        println!("{:<width$}  {}", package.name, package.version);
    }
    ui::info(format!("{} package(s) in {}", packages.len(), manager.target()));
    Ok(())
}
