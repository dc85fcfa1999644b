//! The saved-schedule store: a single JSON file holding the last lookup.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use binday_core::SavedSchedule;
use tracing::debug;

pub fn load(path: &Path) -> Result<SavedSchedule> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store '{}'", path.display()))?;
    let saved: SavedSchedule = serde_json::from_str(&text)
        .with_context(|| format!("Store '{}' is not a saved schedule", path.display()))?;
    debug!(path = %path.display(), address = %saved.address, "loaded saved schedule");
    Ok(saved)
}

pub fn save(path: &Path, saved: &SavedSchedule) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write store '{}'", path.display()))?;
    debug!(path = %path.display(), "saved schedule");
    Ok(())
}
