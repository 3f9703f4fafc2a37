use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

use super::confirmed;

pub fn execute(registry: &mut Registry, name: String, yes: bool) -> Result<()> {
    // Fail on unknown names before asking anything
    let environment = registry.get(&name)?;

    let question = format!("Delete environment '{name}'?");
    if !confirmed(&question, yes)? {
        ui::info("Nothing deleted.");
        return Ok(());
    }

    let was_active = registry.active_name() == Some(environment.name());
    registry.delete(&name)?;
    ui::success("Deleted", format!("environment '{name}'"));
    if was_active {
        ui::info("No environment is active; package commands now use the system interpreter.");
    }
    Ok(())
}
