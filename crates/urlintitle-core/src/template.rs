//! Title format rendering.
//!
//! A format is literal text with `{tag}` placeholders from [`Tag`]. Only
//! registered tag names are substituted; any other `{...}` text is kept as is.
//! Every rendered title goes through [`normalize_title`].

use crate::env::Environment;
use crate::tags::Tag;

/// Trims the text and collapses every whitespace run to a single space.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders `format` against `env` and normalizes the result.
///
/// # Examples
///
/// - `render("{title} - {hostname}", env)` → `"Page title - www.example.com"`
/// - `render("{unknown}", env)` → `"{unknown}"`
pub fn render(format: &str, env: &Environment) -> String {
    normalize_title(&substitute(format, env))
}

/// Replaces registered placeholders left to right, without normalizing.
fn substitute(format: &str, env: &Environment) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open + 1..];
        let tag = candidate
            .find('}')
            .and_then(|close| Tag::from_name(&candidate[..close]).map(|t| (t, close)));

        match tag {
            Some((tag, close)) => {
                out.push_str(&tag.compute(env));
                rest = &candidate[close + 1..];
            }
            None => {
                // Not a placeholder here; a later `{` may still start one.
                out.push('{');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    out
}
