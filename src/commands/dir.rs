use crate::registry::Registry;
use crate::ui;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn execute(registry: &mut Registry, path: Option<String>) -> Result<()> {
    let Some(path) = path else {
        println!("{}", registry.root().display());
        return Ok(());
    };

    let expanded = shellexpand::full(&path)
        .with_context(|| format!("Failed to expand path '{path}'"))?;
    let mut root = PathBuf::from(expanded.as_ref());
    if root.is_relative() {
        root = std::env::current_dir()
            .context("Failed to read current directory")?
            .join(root);
    }

    if root.exists() && !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    registry.set_root(root)?;
    ui::success("Updated", format!("environment root to {}", registry.root().display()));
    Ok(())
}
