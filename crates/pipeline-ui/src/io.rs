//! Document persistence: a local autosave slot plus explicit
//! export/import through native file dialogs.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use pipeline_types::Pipeline;
use tracing::{info, warn};

const APP_ID: &str = "ai-pipeline";
const SAVE_FILE: &str = "ai-pipeline.json";

/// Where the Save button writes. Lives next to eframe's own state file.
fn save_path() -> Option<PathBuf> {
    eframe::storage_dir(APP_ID).map(|dir| dir.join(SAVE_FILE))
}

/// Persist the current document to the local save slot.
pub fn save_local(pipeline: &Pipeline) -> Result<()> {
    let path = save_path().context("no storage directory available")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = pipeline.to_json()?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "pipeline saved");
    Ok(())
}

/// Load the local save slot, if one exists and parses.
pub fn load_local() -> Option<Pipeline> {
    let path = save_path()?;
    let text = std::fs::read_to_string(&path).ok()?;
    match Pipeline::from_json(&text) {
        Ok(pipeline) => {
            info!(path = %path.display(), "pipeline restored");
            Some(pipeline)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "saved pipeline is unreadable, starting fresh");
            None
        }
    }
}

/// Pick a destination and write the document there. Returns `Ok(None)`
/// when the user cancels the dialog.
pub fn export_dialog(pipeline: &Pipeline) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export pipeline")
        .set_file_name(pipeline.export_file_name())
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return Ok(None);
    };
    let json = pipeline.to_json()?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "pipeline exported");
    Ok(Some(path))
}

/// Pick a document and parse it. Returns `Ok(None)` when the user
/// cancels the dialog; a parse failure is an error so the caller can
/// keep the current document untouched.
pub fn import_dialog() -> Result<Option<Pipeline>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Import pipeline")
        .add_filter("JSON", &["json"])
        .pick_file()
    else {
        return Ok(None);
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let pipeline =
        Pipeline::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), name = %pipeline.name, "pipeline imported");
    Ok(Some(pipeline))
}
