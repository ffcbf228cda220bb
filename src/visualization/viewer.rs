//! Showing saved diagrams to the operator.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::error::AppError;

/// Presents a saved diagram.
pub trait Viewer: Send + Sync {
    fn show(&self, path: &Path) -> Result<(), AppError>;
}

/// Does nothing; diagrams are only saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewer;

impl Viewer for NoViewer {
    fn show(&self, _path: &Path) -> Result<(), AppError> {
        Ok(())
    }
}

/// Opens diagrams with the platform image viewer without waiting for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<(), AppError> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };
        command.arg(path).spawn()?;
        tracing::debug!("Opened {} in the system viewer", path.display());
        Ok(())
    }
}

/// Viewer selected by the `render.viewer` setting.
pub fn from_config(open: bool) -> Arc<dyn Viewer> {
    if open {
        Arc::new(SystemViewer)
    } else {
        Arc::new(NoViewer)
    }
}
