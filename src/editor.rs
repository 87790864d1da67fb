use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

#[derive(Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    NotFound,
    Failed(String),
}

/// Runs `<editor> <path>` and waits for it. The report is already on disk,
/// so every failure here is only a warning.
pub fn open_in_editor(editor: &str, path: &Path) -> OpenOutcome {
    match Command::new(editor).arg(path).status() {
        Ok(status) if status.success() => {
            info!(action = "open", component = "editor", editor, path = ?path, "Opened report");
            OpenOutcome::Opened
        }
        Ok(status) => {
            warn!(action = "open", component = "editor", editor, status = %status, "Editor exited with failure");
            OpenOutcome::Failed(status.to_string())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(action = "open", component = "editor", editor, "Editor command not found");
            eprintln!("❌ {} not found, please ensure the '{}' command works", editor, editor);
            OpenOutcome::NotFound
        }
        Err(e) => {
            warn!(action = "open", component = "editor", editor, error = %e, "Failed to launch editor");
            OpenOutcome::Failed(e.to_string())
        }
    }
}
