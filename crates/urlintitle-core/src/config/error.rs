//! Errors raised while reading, validating or writing options.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// A URL filter pattern does not compile. Nothing was written.
    #[error("Invalid URL filter regular expression: {pattern}")]
    InvalidFilterRegexp {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("options file {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("cannot locate XDG config directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}
