use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

pub fn execute(registry: &mut Registry) -> Result<()> {
    match registry.active_name().map(str::to_string) {
        Some(name) => {
            registry.deactivate()?;
            ui::success("Deactivated", format!("environment '{name}'"));
        }
        None => ui::info("No environment is active."),
    }
    Ok(())
}
