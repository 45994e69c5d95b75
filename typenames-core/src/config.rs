//! Watcher options and the `typenames.yaml` config file.
//!
//! # File layout
//!
//! ```yaml
//! watchers:
//!   - watchDir: src/icons
//!     distDir: types        # optional, defaults to watchDir
//!     suffix: .svg
//!     template: names.tera  # optional Tera template
//! ```
//!
//! Relative paths resolve against a *context* directory: the directory holding
//! the config file, or the working directory for options given on the CLI.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::SuffixName;

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "typenames.yaml";

// ---------------------------------------------------------------------------
// Raw options
// ---------------------------------------------------------------------------

/// Options for one watched directory, as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
    #[serde(default)]
    pub watch_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist_dir: Option<PathBuf>,
    #[serde(default)]
    pub suffix: String,
    /// Tera template replacing the built-in declaration layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl WatchOptions {
    pub fn new(watch_dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    pub fn with_dist_dir(mut self, dist_dir: impl Into<PathBuf>) -> Self {
        self.dist_dir = Some(dist_dir.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Validate and resolve every path against `context`.
    ///
    /// An empty `dist_dir` falls back to `watch_dir`.
    pub fn resolve(&self, context: &Path) -> Result<ResolvedOptions, ConfigError> {
        if self.watch_dir.as_os_str().is_empty() || self.suffix.is_empty() {
            return Err(ConfigError::MissingRequired);
        }

        let watch_dir = resolve_path(context, &self.watch_dir);
        let dist_dir = match &self.dist_dir {
            Some(dist) if !dist.as_os_str().is_empty() => resolve_path(context, dist),
            _ => watch_dir.clone(),
        };

        Ok(ResolvedOptions {
            watch_dir,
            dist_dir,
            suffix_name: SuffixName::from_suffix(&self.suffix),
            suffix: self.suffix.clone(),
            template: self.template.as_deref().map(|t| resolve_path(context, t)),
        })
    }
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

/// Validated, absolute options. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub watch_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub suffix: String,
    pub suffix_name: SuffixName,
    pub template: Option<PathBuf>,
}

impl ResolvedOptions {
    /// `{dist_dir}/{suffix}.d.ts`
    pub fn output_file(&self) -> PathBuf {
        self.dist_dir.join(self.suffix_name.file_name())
    }

    /// Human-readable label used in logs and reports.
    pub fn label(&self) -> String {
        format!("{} ({})", self.watch_dir.display(), self.suffix)
    }
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// On-disk `typenames.yaml` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub watchers: Vec<WatchOptions>,
}

impl ConfigFile {
    /// Parse a config file without resolving it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and resolve every watcher against the config file's directory.
    pub fn load_resolved(path: &Path) -> Result<Vec<ResolvedOptions>, ConfigError> {
        let config = Self::load(path)?;
        if config.watchers.is_empty() {
            return Err(ConfigError::NoWatchers {
                path: path.to_path_buf(),
            });
        }
        let context = context_dir(path);
        config
            .watchers
            .iter()
            .map(|w| w.resolve(&context))
            .collect()
    }
}

/// Directory that relative paths inside `config_path` resolve against.
pub fn context_dir(config_path: &Path) -> PathBuf {
    let parent = config_path.parent().unwrap_or(Path::new(""));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    std::fs::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf())
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Join `path` onto `context` unless already absolute, then drop `.` and
/// fold `..` lexically. The target need not exist.
pub fn resolve_path(context: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        context.join(path)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
