//! Process-wide label font registration.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};

use crate::error::AppError;
use crate::visualization::constants::{FONT_CANDIDATES, FONT_FAMILY};

/// Font registered for [`FONT_FAMILY`], decided once per process.
static REGISTERED: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Register the label font once per process.
///
/// A configured font must load. Without one, the first readable system
/// candidate is used; if none exists, diagrams are drawn without text.
/// Returns whether text can be drawn.
pub fn ensure_font(configured: Option<&Path>) -> Result<bool, AppError> {
    let registered = REGISTERED.get_or_try_init(|| match configured {
        Some(path) => load(path).map(Some),
        None => {
            let found = FONT_CANDIDATES
                .iter()
                .map(|p| Path::new(*p))
                .find_map(|path| load(path).ok());
            if found.is_none() {
                tracing::warn!("No label font found; diagrams will be drawn without text");
            }
            Ok(found)
        }
    })?;
    Ok(registered.is_some())
}

fn load(path: &Path) -> Result<PathBuf, AppError> {
    let bytes = std::fs::read(path).map_err(|e| AppError::Font {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    validate(path, &bytes)?;
    // The font store needs 'static data; registration happens once.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| invalid_font(path))?;
    tracing::debug!("Registered label font {}", path.display());
    Ok(path.to_path_buf())
}

/// Reject bytes that do not parse as a font before they are leaked.
fn validate(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    ab_glyph::FontRef::try_from_slice(bytes)
        .map(|_| ())
        .map_err(|_| invalid_font(path))
}

fn invalid_font(path: &Path) -> AppError {
    AppError::Font {
        path: path.display().to_string(),
        reason: "not a valid TrueType/OpenType font".to_string(),
    }
}
