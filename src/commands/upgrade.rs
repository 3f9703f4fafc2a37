use crate::registry::Registry;
use crate::ui::Progress;
use anyhow::Result;

pub fn execute(registry: &Registry, package: String) -> Result<()> {
    let manager = registry.package_manager();
    let progress = Progress::new("Upgrading", package.clone());
    match manager.upgrade(&package) {
        Ok(()) => {
            progress.success("Upgraded", Some(format!("in {}", manager.target())));
            Ok(())
        }
        Err(err) => {
            progress.fail("Failed", "pip upgrade did not succeed");
            Err(err.into())
        }
    }
}
