use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

pub fn execute(registry: &Registry) -> Result<()> {
    ui::status("Root", registry.root().display());

    match (registry.active_name(), registry.active_environment()) {
        (Some(_), Some(environment)) => ui::success("Active", environment.name()),
        (Some(name), None) => ui::warn(format!(
            "Active environment '{name}' no longer exists; using the system interpreter."
        )),
        (None, _) => ui::status("Active", "none (system interpreter)"),
    }

    ui::status("Pip", registry.pip_target());
    ui::status("Config", registry.config().path().display());
    Ok(())
}
