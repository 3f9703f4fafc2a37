use crate::registry::Registry;
use crate::ui::Progress;
use anyhow::Result;

pub fn execute(registry: &mut Registry, name: String) -> Result<()> {
    let progress = Progress::new("Creating", format!("environment '{name}'"));
    match registry.create(&name) {
        Ok(environment) => {
            progress.success("Created", Some(format!("at {}", environment.path().display())));
            Ok(())
        }
        Err(err) => {
            progress.fail("Failed", "could not create environment");
            Err(err.into())
        }
    }
}
