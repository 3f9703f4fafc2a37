use crate::registry::Registry;
use crate::ui;
use anyhow::Result;

pub fn execute(registry: &Registry, name: String) -> Result<()> {
    let info = registry.info(&name)?;

    let label = if info.active { "Active" } else { "Environment" };
    ui::success(label, &info.name);
    ui::status("Path", info.path.display());
    ui::status(
        "Python",
        info.python_version.as_deref().unwrap_or("unknown"),
    );
    ui::status(
        "Packages",
        info.package_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    );
    ui::status("Size", format_size(info.size_bytes));
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
