//! Suffix-preserving title update.
//!
//! Pages sometimes rebuild their title from the current one
//! (`title = "new" + title`), which carries the suffix appended by a previous
//! render along. For formats of the form `{title}<rest>` with a single
//! `{title}`, the suffix rendered last time is stripped from the raw title
//! before rendering again, so suffixes do not pile up.
//!
//! If the format changes between two updates, the previous suffix usually no
//! longer matches and no stripping happens.

use serde::{Deserialize, Serialize};

use crate::env::Environment;
use crate::tags::Tag;
use crate::template::render;

/// Result of one title update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleUpdate {
    pub formatted_title: String,
    /// Rendered non-title part of a `{title}`-prefixed format; `None` otherwise.
    /// Pass it back as `previous_suffix` on the next update.
    pub formatted_title_suffix: Option<String>,
}

/// Whether `format` starts with `{title}` and contains no other `{title}`.
pub fn tracks_suffix(format: &str) -> bool {
    let title = Tag::Title.placeholder();
    match format.strip_prefix(title.as_str()) {
        Some(rest) => !rest.contains(title.as_str()),
        None => false,
    }
}

/// Renders `format` for `env`, undoing a previously appended suffix first.
pub fn update(format: &str, env: &Environment, previous_suffix: Option<&str>) -> TitleUpdate {
    if !tracks_suffix(format) {
        return TitleUpdate {
            formatted_title: render(format, env),
            formatted_title_suffix: None,
        };
    }

    let suffix = render(format, &env.with_title(""));

    let title = match previous_suffix {
        Some(prev) if !prev.is_empty() => env.title.strip_suffix(prev).unwrap_or(&env.title),
        _ => env.title.as_str(),
    };

    TitleUpdate {
        formatted_title: render(format, &env.with_title(title)),
        formatted_title_suffix: Some(suffix),
    }
}
