//! TOML-backed options storage with defaults applied on read.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Options, OptionsError};

/// Anything that can hand out the current options.
pub trait OptionsSource: Send + Sync {
    fn load(&self) -> Result<Options, OptionsError>;
}

/// Fixed, in-memory options.
impl OptionsSource for Options {
    fn load(&self) -> Result<Options, OptionsError> {
        Ok(self.clone().normalized())
    }
}

/// Options persisted in a single TOML file.
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
}

impl OptionsStore {
    /// Store at the XDG config location (`~/.config/urlintitle/options.toml`).
    pub fn open_default() -> Result<Self, OptionsError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("urlintitle")?;
        let path = xdg_dirs.get_config_home().join("options.toml");
        Ok(Self { path })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> OptionsError {
        OptionsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Validates, normalizes and writes `options`.
    ///
    /// The file is replaced atomically; when validation fails the previous
    /// file is left untouched.
    pub fn save(&self, options: Options) -> Result<Options, OptionsError> {
        let options = options.normalized();
        options.validate()?;
        let data = toml::to_string_pretty(&options)?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| self.io_error(e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(data.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        tracing::info!("saved options to {}", self.path.display());
        Ok(options)
    }

    /// Removes stored options so every key reads back as its default.
    pub fn clear(&self) -> Result<(), OptionsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("reset options at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl OptionsSource for OptionsStore {
    /// Loads options, using defaults when the file does not exist.
    fn load(&self) -> Result<Options, OptionsError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Options::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let options: Options = toml::from_str(&data).map_err(|source| OptionsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(options.normalized())
    }
}
