use crate::environment::Shell;
use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

pub fn execute(registry: &mut Registry, name: String, shell: Option<String>) -> Result<()> {
    let shell = match shell.as_deref() {
        Some(requested) => Shell::from_name(requested).unwrap_or_else(|| {
            let fallback = Shell::detect();
            ui::warn(format!(
                "Unknown shell '{requested}'; defaulting to {}.",
                fallback.as_str()
            ));
            fallback
        }),
        None => Shell::detect(),
    };

    let environment = registry.activate(&name)?;
    ui::success("Activated", format!("environment '{name}'"));
    ui::info(format!(
        "To use it in your terminal, run:\n{}",
        environment.activation_command(shell)
    ));
    Ok(())
}
