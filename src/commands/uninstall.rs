use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

use super::confirmed;

pub fn execute(registry: &Registry, package: String, yes: bool) -> Result<()> {
    let manager = registry.package_manager();

    let question = format!("Uninstall '{package}' from {}?", manager.target());
    if !confirmed(&question, yes)? {
        ui::info("Nothing uninstalled.");
        return Ok(());
    }

    manager.uninstall(&package)?;
    ui::success("Uninstalled", package);
    Ok(())
}
