//! Editor invocation for query files.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "vi";

/// Editor used when neovim is forced.
pub const NEOVIM: &str = "nvim";

/// Errors from running the editor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The editor command is blank.
    #[error("Editor command is empty")]
    EmptyCommand,

    /// The editor process could not be started.
    #[error("Failed to start editor `{command}`: {reason}")]
    Launch {
        /// Command as configured.
        command: String,
        /// Reason for failure.
        reason: String,
    },

    /// The editor exited unsuccessfully.
    #[error("Editor `{command}` exited with {status}")]
    Failed {
        /// Command as configured.
        command: String,
        /// Exit status description.
        status: String,
    },
}

/// Pick the editor command.
///
/// Precedence: `explicit` (CLI flag or config) → `nvim` when `force_neovim`
/// → `$EDITOR` as returned by `lookup` → `vi`. Blank values are skipped.
pub fn resolve_editor(
    explicit: Option<&str>,
    force_neovim: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    if let Some(command) = explicit.filter(|c| !c.trim().is_empty()) {
        return command.to_string();
    }
    if force_neovim {
        return NEOVIM.to_string();
    }
    lookup("EDITOR")
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Open `path` in `command` and wait for the editor to exit.
///
/// `command` is split on whitespace, so `"code --wait"` works. Standard
/// streams are inherited so terminal editors take over the screen.
pub fn open_in_editor(command: &str, path: &Path) -> Result<(), EditorError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or(EditorError::EmptyCommand)?;

    info!(editor = command, path = %path.display(), "Opening editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| EditorError::Launch {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    debug!(%status, "Editor exited");
    if status.success() {
        Ok(())
    } else {
        Err(EditorError::Failed {
            command: command.to_string(),
            status: status.to_string(),
        })
    }
}
