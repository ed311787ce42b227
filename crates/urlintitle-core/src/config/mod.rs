//! User options: title format and URL filter.
//!
//! Options are normalized on every read and write so the stored form and the
//! form used for rendering never diverge.

mod error;
mod store;

pub use error::OptionsError;
pub use store::{OptionsSource, OptionsStore};

use serde::{Deserialize, Serialize};

use crate::template::normalize_title;

/// Default title format.
pub const DEFAULT_FORMAT: &str = "{title} - {protocol}://{hostname}{port}/{path}{args}{hash}";

/// Options loaded from `~/.config/urlintitle/options.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Title format with `{tag}` placeholders.
    pub format: String,
    /// `true`: only URLs matching a pattern are processed. `false`: matching URLs are skipped.
    pub url_filter_is_whitelist: bool,
    /// Regular expressions searched anywhere in the page URL.
    pub url_filter_regexps: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            url_filter_is_whitelist: false,
            url_filter_regexps: Vec::new(),
        }
    }
}

impl Options {
    /// Collapses whitespace in the format and drops empty filter patterns.
    pub fn normalize(&mut self) {
        self.format = normalize_title(&self.format);
        self.url_filter_regexps.retain(|r| !r.is_empty());
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Checks that every filter pattern compiles; reports the first one that doesn't.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for pattern in &self.url_filter_regexps {
            regex::Regex::new(pattern).map_err(|source| OptionsError::InvalidFilterRegexp {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_values() {
        let opts = Options::default();
        assert_eq!(opts.format, DEFAULT_FORMAT);
        assert!(!opts.url_filter_is_whitelist);
        assert!(opts.url_filter_regexps.is_empty());
    }

    #[test]
    fn normalize_collapses_format_and_drops_empty_patterns() {
        let opts = Options {
            format: "  {title}\t -   {hostname} ".to_string(),
            url_filter_is_whitelist: true,
            url_filter_regexps: vec!["".to_string(), "a".to_string(), "".to_string()],
        }
        .normalized();
        assert_eq!(opts.format, "{title} - {hostname}");
        assert_eq!(opts.url_filter_regexps, vec!["a".to_string()]);
        assert!(opts.url_filter_is_whitelist);
    }

    #[test]
    fn options_toml_missing_keys_use_defaults() {
        let opts: Options = toml::from_str("url_filter_is_whitelist = true").unwrap();
        assert_eq!(opts.format, DEFAULT_FORMAT);
        assert!(opts.url_filter_is_whitelist);
        assert!(opts.url_filter_regexps.is_empty());

        let empty: Options = toml::from_str("").unwrap();
        assert_eq!(empty, Options::default());
    }

    #[test]
    fn options_toml_custom_values() {
        let toml = r#"
            format = "{hostname}: {title}"
            url_filter_is_whitelist = false
            url_filter_regexps = ["^https://intranet\\.", "example\\.org"]
        "#;
        let opts: Options = toml::from_str(toml).unwrap();
        assert_eq!(opts.format, "{hostname}: {title}");
        assert_eq!(opts.url_filter_regexps.len(), 2);
        assert_eq!(opts.url_filter_regexps[0], "^https://intranet\\.");
    }

    #[test]
    fn validate_reports_first_invalid_pattern() {
        let opts = Options {
            url_filter_regexps: vec!["ok".to_string(), "(".to_string(), "[".to_string()],
            ..Options::default()
        };
        match opts.validate() {
            Err(OptionsError::InvalidFilterRegexp { pattern, .. }) => assert_eq!(pattern, "("),
            other => panic!("expected InvalidFilterRegexp, got {other:?}"),
        }
        assert!(Options::default().validate().is_ok());
    }
}
