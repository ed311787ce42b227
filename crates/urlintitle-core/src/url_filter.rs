//! Whitelist / blacklist URL filter.

use regex::Regex;

use crate::config::Options;

/// Compiled form of the filter part of [`Options`].
#[derive(Debug, Clone)]
pub struct UrlFilter {
    is_whitelist: bool,
    patterns: Vec<Regex>,
}

impl UrlFilter {
    /// Compiles the filter patterns.
    ///
    /// Options are validated when saved, so an invalid pattern here comes from
    /// a hand-edited file: it is logged and treated as never matching.
    pub fn from_options(options: &Options) -> Self {
        let patterns = options
            .url_filter_regexps
            .iter()
            .filter(|p| !p.is_empty())
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(pattern = %p, "ignoring invalid URL filter pattern: {e}");
                    None
                }
            })
            .collect();
        Self {
            is_whitelist: options.url_filter_is_whitelist,
            patterns,
        }
    }

    /// Whether `url` should be processed.
    ///
    /// Whitelist: at least one pattern must match. Blacklist: none may match.
    pub fn passes(&self, url: &str) -> bool {
        let matched = self.patterns.iter().any(|re| re.is_match(url));
        matched == self.is_whitelist
    }
}

/// One-shot form of [`UrlFilter::passes`].
pub fn passes(options: &Options, url: &str) -> bool {
    UrlFilter::from_options(options).passes(url)
}
