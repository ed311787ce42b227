//! Fixed tag vocabulary usable as `{tag}` placeholders in a title format.

use crate::env::Environment;

/// A named extraction from an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Title,
    Protocol,
    Hostname,
    HostnameAscii,
    Port,
    Path,
    Args,
    Hash,
}

impl Tag {
    /// All tags, in registry order.
    pub const ALL: [Tag; 8] = [
        Tag::Title,
        Tag::Protocol,
        Tag::Hostname,
        Tag::HostnameAscii,
        Tag::Port,
        Tag::Path,
        Tag::Args,
        Tag::Hash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::Title => "title",
            Tag::Protocol => "protocol",
            Tag::Hostname => "hostname",
            Tag::HostnameAscii => "hostnameascii",
            Tag::Port => "port",
            Tag::Path => "path",
            Tag::Args => "args",
            Tag::Hash => "hash",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The placeholder text for this tag, e.g. `{title}`.
    pub fn placeholder(self) -> String {
        format!("{{{}}}", self.name())
    }

    pub fn description(self) -> &'static str {
        match self {
            Tag::Title => "The page title.",
            Tag::Protocol => "The URL protocol, without '://' suffix.",
            Tag::Hostname => "The URL hostname, converted from Punycode to Unicode.",
            Tag::HostnameAscii => "The raw URL hostname, not converted from Punycode to Unicode.",
            Tag::Port => "The URL port, prefixed with ':' if not empty.",
            Tag::Path => "The URL path, without '/' prefix.",
            Tag::Args => "The URL arguments, prefixed with '?' if not empty.",
            Tag::Hash => "The URL hash, prefixed with '#' if not empty.",
        }
    }

    pub fn compute(self, env: &Environment) -> String {
        let loc = &env.location;
        match self {
            Tag::Title => env.title.clone(),
            Tag::Protocol => loc.protocol.replacen(':', "", 1),
            Tag::Hostname => hostname_to_unicode(&loc.hostname),
            Tag::HostnameAscii => loc.hostname.clone(),
            Tag::Port if loc.port.is_empty() => String::new(),
            Tag::Port => format!(":{}", loc.port),
            Tag::Path => loc
                .pathname
                .strip_prefix('/')
                .unwrap_or(&loc.pathname)
                .to_string(),
            Tag::Args => loc.search.clone(),
            Tag::Hash => loc.hash.clone(),
        }
    }
}

/// Computes the named tag, or returns the `{name}` placeholder unchanged when
/// no such tag is registered.
pub fn render_tag(name: &str, env: &Environment) -> String {
    match Tag::from_name(name) {
        Some(tag) => tag.compute(env),
        None => format!("{{{name}}}"),
    }
}

/// Punycode to Unicode; falls back to the raw hostname when conversion fails.
fn hostname_to_unicode(hostname: &str) -> String {
    if hostname.is_empty() {
        return String::new();
    }
    let unicode = url::quirks::domain_to_unicode(hostname);
    if unicode.is_empty() {
        tracing::debug!(hostname, "hostname is not a convertible domain, keeping raw");
        hostname.to_string()
    } else {
        unicode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Environment, Location};

    fn env() -> Environment {
        Environment::new(
            Location {
                protocol: "https:".to_string(),
                hostname: "www.xn--exmpl-hra2b.com".to_string(),
                port: "8080".to_string(),
                pathname: "/sub/path".to_string(),
                search: "?arg=value".to_string(),
                hash: "#hash".to_string(),
            },
            "Page",
        )
    }

    #[test]
    fn names_round_trip_through_registry() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(Tag::from_name("unknown"), None);
        assert_eq!(Tag::from_name("Title"), None);
    }

    #[test]
    fn protocol_drops_separator() {
        assert_eq!(Tag::Protocol.compute(&env()), "https");
        let mut e = env();
        e.location.protocol = "http".to_string();
        assert_eq!(Tag::Protocol.compute(&e), "http");
    }

    #[test]
    fn hostname_decodes_punycode() {
        assert_eq!(Tag::Hostname.compute(&env()), "www.exämplé.com");
        assert_eq!(Tag::HostnameAscii.compute(&env()), "www.xn--exmpl-hra2b.com");
    }

    #[test]
    fn hostname_falls_back_on_invalid_punycode() {
        let mut e = env();
        e.location.hostname = "xn--zzzzzzzz.com".to_string();
        assert_eq!(Tag::Hostname.compute(&e), "xn--zzzzzzzz.com");
    }

    #[test]
    fn port_prefixed_only_when_present() {
        assert_eq!(Tag::Port.compute(&env()), ":8080");
        let mut e = env();
        e.location.port.clear();
        assert_eq!(Tag::Port.compute(&e), "");
    }

    #[test]
    fn path_strips_at_most_one_slash() {
        assert_eq!(Tag::Path.compute(&env()), "sub/path");
        let mut e = env();
        e.location.pathname = "//double".to_string();
        assert_eq!(Tag::Path.compute(&e), "/double");
        e.location.pathname = "relative".to_string();
        assert_eq!(Tag::Path.compute(&e), "relative");
    }

    #[test]
    fn args_and_hash_verbatim() {
        assert_eq!(Tag::Args.compute(&env()), "?arg=value");
        assert_eq!(Tag::Hash.compute(&env()), "#hash");
    }

    #[test]
    fn render_tag_unknown_passes_through() {
        assert_eq!(render_tag("unknown", &env()), "{unknown}");
        assert_eq!(render_tag("title", &env()), "Page");
    }
}
