//! Application context shared by every operation.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;

/// Root application context.
///
/// Created once at startup from the loaded configuration and passed to
/// services explicitly. Output directories are resolved here instead of
/// being derived from where the binary lives.
#[derive(Clone)]
pub struct Context {
    /// Application configuration.
    pub config: Arc<Config>,
    diagram_dir: PathBuf,
    degree_dir: PathBuf,
}

impl Context {
    /// Creates a new context from the given configuration.
    pub fn new(config: Config) -> Self {
        let diagram_dir = config.output.diagram_dir();
        let degree_dir = config.output.degree_dir();
        Self {
            config: Arc::new(config),
            diagram_dir,
            degree_dir,
        }
    }

    /// Directory for PNG diagrams (may not exist yet).
    pub fn diagram_dir(&self) -> &PathBuf {
        &self.diagram_dir
    }

    /// Directory for triple and degree tables (may not exist yet).
    pub fn degree_dir(&self) -> &PathBuf {
        &self.degree_dir
    }

    /// Diagram directory, created on demand.
    pub fn ensure_diagram_dir(&self) -> Result<&PathBuf, AppError> {
        std::fs::create_dir_all(&self.diagram_dir)?;
        Ok(&self.diagram_dir)
    }

    /// Degree directory, created on demand.
    pub fn ensure_degree_dir(&self) -> Result<&PathBuf, AppError> {
        std::fs::create_dir_all(&self.degree_dir)?;
        Ok(&self.degree_dir)
    }

    /// Corpus label appended to titles and file names.
    pub fn corpus_label(&self) -> &str {
        &self.config.corpus.label
    }
}
