use crate::registry::Registry;
use crate::ui::Progress;
use anyhow::Result;

pub fn execute(registry: &Registry, package: String) -> Result<()> {
    let manager = registry.package_manager();
    let progress = Progress::new("Installing", package.clone());
    match manager.install(&package) {
        Ok(()) => {
            progress.success("Installed", Some(format!("into {}", manager.target())));
            Ok(())
        }
        Err(err) => {
            progress.fail("Failed", "pip install did not succeed");
            Err(err.into())
        }
    }
}
