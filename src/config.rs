//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/epistola/config.toml` (XDG) or platform config dir
//! 2. Project config: `.epistola.toml`
//! 3. Environment variables: `EPISTOLA_*`
//!
//! Every key has a default, so running without any config file is valid.
//!
//! # Intended Usage
//!
//! **Project config** (`.epistola.toml` next to the letter table):
//! ```toml
//! [output]
//! root = "/data/schlegel"
//! diagrams = "network_diagram"
//! degrees = "network_degree"
//!
//! [corpus]
//! label = "August Wilhelm, Friedrich, Dorothea und Caroline Schlegels"
//!
//! [render]
//! font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
//! viewer = true
//! ```
//!
//! Environment keys are split on `_`, so `EPISTOLA_CORPUS_LABEL` sets
//! `corpus.label`. Keys are single words for that reason.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::AppError;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".epistola.toml";

/// Corpus label of the Schlegel correspondence this tool was built for.
pub const DEFAULT_CORPUS_LABEL: &str = "August Wilhelm, Friedrich, Dorothea und Caroline Schlegels";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub corpus: CorpusConfig,
    pub input: InputConfig,
    pub render: RenderConfig,
}

/// Where generated files land.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory that both output directories are resolved against.
    pub root: PathBuf,
    /// Directory (relative to `root` unless absolute) for PNG diagrams.
    pub diagrams: PathBuf,
    /// Directory (relative to `root` unless absolute) for triple and degree CSVs.
    pub degrees: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            diagrams: PathBuf::from("network_diagram"),
            degrees: PathBuf::from("network_degree"),
        }
    }
}

impl OutputConfig {
    /// Resolved diagram directory.
    pub fn diagram_dir(&self) -> PathBuf {
        self.root.join(&self.diagrams)
    }

    /// Resolved degree/triple table directory.
    pub fn degree_dir(&self) -> PathBuf {
        self.root.join(&self.degrees)
    }
}

/// Corpus identity used in titles and file names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub label: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_CORPUS_LABEL.to_string(),
        }
    }
}

/// Letter table parsing options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter of the letter table.
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { delimiter: ';' }
    }
}

/// Diagram rendering options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per inch; figure sizes are given in inches.
    pub dpi: u32,
    /// TrueType font for labels and titles. System fonts are searched when unset.
    pub font: Option<PathBuf>,
    /// Open every saved diagram with the platform image viewer.
    pub viewer: bool,
    /// Force-directed layout iterations.
    pub iterations: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 150,
            font: None,
            viewer: false,
            iterations: 50,
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path(), PROJECT_CONFIG_FILE)
    }

    /// Load config from explicit user and project files, then the environment.
    pub fn load_from(
        user_config: impl AsRef<Path>,
        project_config: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config.as_ref()))
            // Layer 2: Project config
            .merge(Toml::file(project_config.as_ref()))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("EPISTOLA_").split("_"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Delimiter as a single byte for the csv reader.
    ///
    /// The csv reader only splits on single bytes, so non-ASCII delimiters
    /// are rejected.
    pub fn input_delimiter(&self) -> Result<u8, AppError> {
        u8::try_from(self.input.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "input delimiter '{}' must be a single ASCII character",
                    self.input.delimiter
                ))
            })
    }

    /// User config path: ~/.config/epistola/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("epistola").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("epistola").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let config = Config::load_from("/nonexistent/user.toml", "/nonexistent/project.toml")
            .unwrap();
        assert_eq!(config.output.diagram_dir(), PathBuf::from("./network_diagram"));
        assert_eq!(config.output.degree_dir(), PathBuf::from("./network_degree"));
        assert_eq!(config.corpus.label, DEFAULT_CORPUS_LABEL);
        assert_eq!(config.render.dpi, 150);
        assert_eq!(config.input_delimiter().unwrap(), b';');
    }

    #[test]
    #[serial]
    fn test_project_overrides_user() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("project.toml");

        let mut f = std::fs::File::create(&user).unwrap();
        writeln!(f, "[corpus]\nlabel = \"User\"\n[render]\ndpi = 72").unwrap();
        let mut f = std::fs::File::create(&project).unwrap();
        writeln!(f, "[corpus]\nlabel = \"Project\"\n[output]\nroot = \"/tmp/out\"").unwrap();

        let config = Config::load_from(&user, &project).unwrap();
        assert_eq!(config.corpus.label, "Project");
        assert_eq!(config.render.dpi, 72);
        assert_eq!(config.output.diagram_dir(), PathBuf::from("/tmp/out/network_diagram"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        std::env::set_var("EPISTOLA_CORPUS_LABEL", "From Env");
        let config = Config::load_from("/nonexistent/user.toml", "/nonexistent/project.toml");
        std::env::remove_var("EPISTOLA_CORPUS_LABEL");

        assert_eq!(config.unwrap().corpus.label, "From Env");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let mut config = Config::default();
        config.input.delimiter = ',';
        assert_eq!(config.input_delimiter().unwrap(), b',');
        config.input.delimiter = '§';
        assert!(matches!(
            config.input_delimiter(),
            Err(AppError::Validation(_))
        ));
    }
}
