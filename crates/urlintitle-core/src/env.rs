//! Environment snapshots handed to the renderer.
//!
//! A [`Location`] mirrors the browser-style location fields of a page: the
//! protocol keeps its trailing `:`, `search` and `hash` keep their `?` / `#`
//! prefixes, and absent parts are empty strings. An [`Environment`] pairs a
//! location with the raw page title and is rebuilt for every render.

use serde::{Deserialize, Serialize};

/// Location field names, in the order they are advertised to page observers.
pub const LOCATION_FIELD_NAMES: [&str; 6] =
    ["protocol", "hostname", "port", "pathname", "search", "hash"];

/// Browser-style location of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub protocol: String,
    pub hostname: String,
    pub port: String,
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Builds location fields from a parsed URL the way a browser exposes them.
    ///
    /// The hostname stays in its ASCII (Punycode) form and the port is empty
    /// when it is the scheme's default.
    pub fn from_url(url: &url::Url) -> Self {
        Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
            pathname: url.path().to_string(),
            search: url
                .query()
                .filter(|q| !q.is_empty())
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
            hash: url
                .fragment()
                .filter(|f| !f.is_empty())
                .map(|f| format!("#{f}"))
                .unwrap_or_default(),
        }
    }

    /// Value of the named field, or `None` for a name outside [`LOCATION_FIELD_NAMES`].
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "protocol" => Some(&self.protocol),
            "hostname" => Some(&self.hostname),
            "port" => Some(&self.port),
            "pathname" => Some(&self.pathname),
            "search" => Some(&self.search),
            "hash" => Some(&self.hash),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "protocol" => Some(&mut self.protocol),
            "hostname" => Some(&mut self.hostname),
            "port" => Some(&mut self.port),
            "pathname" => Some(&mut self.pathname),
            "search" => Some(&mut self.search),
            "hash" => Some(&mut self.hash),
            _ => None,
        }
    }

    /// Copies only the named fields from `self`; every other field is left empty.
    pub fn copy_fields<'a, I>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut copy = Location::default();
        for name in names {
            if let (Some(value), Some(slot)) = (self.field(name), copy.field_mut(name)) {
                *slot = value.to_string();
            }
        }
        copy
    }

    /// Example location used to document tags and preview formats.
    pub fn example() -> Self {
        Self {
            protocol: "http".to_string(),
            hostname: "www.xn--exmpl-hra2b.com".to_string(),
            port: "8080".to_string(),
            pathname: "/sub/path".to_string(),
            search: "?arg=value".to_string(),
            hash: "#hash".to_string(),
        }
    }
}

/// Snapshot of a page's location and raw title at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub location: Location,
    pub title: String,
}

impl Environment {
    pub fn new(location: Location, title: impl Into<String>) -> Self {
        Self {
            location,
            title: title.into(),
        }
    }

    /// Same location, different title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            location: self.location.clone(),
            title: title.into(),
        }
    }

    /// Example environment used to document tags and preview formats.
    pub fn example() -> Self {
        Self::new(Location::example(), "My Example Page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_url_fills_browser_fields() {
        let url = url::Url::parse("https://example.com:8443/a/b?x=1#frag").unwrap();
        let loc = Location::from_url(&url);
        assert_eq!(loc.protocol, "https:");
        assert_eq!(loc.hostname, "example.com");
        assert_eq!(loc.port, "8443");
        assert_eq!(loc.pathname, "/a/b");
        assert_eq!(loc.search, "?x=1");
        assert_eq!(loc.hash, "#frag");
    }

    #[test]
    fn location_from_url_default_port_and_missing_parts() {
        let url = url::Url::parse("http://www.example.com/dir/page.html").unwrap();
        let loc = Location::from_url(&url);
        assert_eq!(loc.port, "");
        assert_eq!(loc.search, "");
        assert_eq!(loc.hash, "");
    }

    #[test]
    fn location_from_url_keeps_punycode_hostname() {
        let url = url::Url::parse("http://exämple.com/").unwrap();
        assert_eq!(Location::from_url(&url).hostname, "xn--exmple-cua.com");
    }

    #[test]
    fn copy_fields_only_named() {
        let loc = Location::example();
        let copy = loc.copy_fields(["hostname", "hash", "bogus"]);
        assert_eq!(copy.hostname, loc.hostname);
        assert_eq!(copy.hash, loc.hash);
        assert_eq!(copy.protocol, "");
        assert_eq!(copy.pathname, "");
    }

    #[test]
    fn copy_all_advertised_fields_is_identity() {
        let loc = Location::example();
        assert_eq!(loc.copy_fields(LOCATION_FIELD_NAMES), loc);
    }
}
