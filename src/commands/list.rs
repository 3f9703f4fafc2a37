use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

pub fn execute(registry: &Registry) -> Result<()> {
    let environments = registry.list()?;
    if environments.is_empty() {
        ui::info(format!(
            "No environments in {}. Use 'venvman create <NAME>' to make one.",
            registry.root().display()
        ));
        return Ok(());
    }

    let active = registry.active_name();
    for environment in environments {
        if Some(environment.name()) == active {
            ui::success("Active", environment.name());
        } else {
            ui::status("", environment.name());
        }
    }
    Ok(())
}
