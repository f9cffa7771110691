//! Backend descriptor parsing (`prefix:slug[key=value,...]`).
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// The first colon separates prefix from slug; an optional trailing
/// bracket clause carries inline options.
#[allow(clippy::expect_used)]
static DESCRIPTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>.+?):(?P<slug>.+?)(?:\[(?P<options>.+)\])?$")
        .expect("descriptor pattern is valid")
});

/// One declared installation source for a tool, parsed from its descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSpec {
    /// The descriptor as authored.
    pub raw: String,
    /// Backend kind tag (`cargo`, `aqua`, ...). Empty when `raw` is unparseable.
    pub prefix: String,
    /// Backend-specific identifier. Empty when `raw` is unparseable.
    pub slug: String,
    /// Option name to value, from structured and inline sources.
    pub options: BTreeMap<String, String>,
}

impl BackendSpec {
    /// Parse a descriptor.
    ///
    /// Never fails: a descriptor without a colon yields empty `prefix` and
    /// `slug` so callers can keep going with the rest of the registry.
    /// Option values are taken literally; a value containing a comma is not
    /// supported.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = DESCRIPTOR.captures(raw) else {
            return Self {
                raw: raw.to_string(),
                ..Self::default()
            };
        };
        let options = caps
            .name("options")
            .map(|m| parse_options(m.as_str()))
            .unwrap_or_default();
        Self {
            raw: raw.to_string(),
            prefix: caps["prefix"].to_string(),
            slug: caps["slug"].to_string(),
            options,
        }
    }

    /// Apply structured options first and then re-apply the inline bracket
    /// options on top, so inline values win on conflict.
    #[must_use]
    pub fn with_structured_options(mut self, structured: BTreeMap<String, String>) -> Self {
        let inline = std::mem::replace(&mut self.options, structured);
        self.options.extend(inline);
        self
    }

    /// `prefix:slug` without the option clause, or an empty string when the
    /// descriptor could not be parsed.
    #[must_use]
    pub fn full(&self) -> String {
        if self.prefix.is_empty() && self.slug.is_empty() {
            String::new()
        } else {
            format!("{}:{}", self.prefix, self.slug)
        }
    }

    /// Whether the descriptor matched the `prefix:slug` grammar.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Look up an option value.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

/// Split `key=value,key2=value2` into a map. Each pair splits on its first
/// `=`; a pair without `=` maps to an empty value.
fn parse_options(clause: &str) -> BTreeMap<String, String> {
    clause
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.trim().to_string(), value.trim().to_string())
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_slug() {
        let spec = BackendSpec::parse("cargo:ripgrep");
        assert_eq!(spec.prefix, "cargo");
        assert_eq!(spec.slug, "ripgrep");
        assert!(spec.options.is_empty());
        assert_eq!(spec.full(), "cargo:ripgrep");
    }

    #[test]
    fn first_colon_separates_prefix() {
        let spec = BackendSpec::parse("asdf:https://github.com/mise-plugins/asdf-x");
        assert_eq!(spec.prefix, "asdf");
        assert_eq!(spec.slug, "https://github.com/mise-plugins/asdf-x");
    }

    #[test]
    fn bracket_clause_becomes_options() {
        let spec = BackendSpec::parse("ubi:owner/repo[exe=tool,matching=musl]");
        assert_eq!(spec.slug, "owner/repo");
        assert_eq!(spec.option("exe"), Some("tool"));
        assert_eq!(spec.option("matching"), Some("musl"));
        assert_eq!(spec.full(), "ubi:owner/repo");
    }

    #[test]
    fn option_value_splits_on_first_equals() {
        let spec = BackendSpec::parse("http:tool[url=https://x.dev/?a=b]");
        assert_eq!(spec.option("url"), Some("https://x.dev/?a=b"));
    }

    #[test]
    fn option_without_equals_has_empty_value() {
        let spec = BackendSpec::parse("github:a/b[flag]");
        assert_eq!(spec.option("flag"), Some(""));
    }

    #[test]
    fn missing_colon_degrades_to_empty() {
        let spec = BackendSpec::parse("not-a-descriptor");
        assert_eq!(spec.raw, "not-a-descriptor");
        assert!(spec.prefix.is_empty());
        assert!(spec.slug.is_empty());
        assert!(!spec.is_parsed());
        assert_eq!(spec.full(), "");
    }

    #[test]
    fn inline_options_override_structured() {
        let structured = BTreeMap::from([
            ("provider".to_string(), "github".to_string()),
            ("channel".to_string(), "bioconda".to_string()),
        ]);
        let spec =
            BackendSpec::parse("spm:org/pkg[provider=gitlab]").with_structured_options(structured);
        assert_eq!(spec.option("provider"), Some("gitlab"));
        assert_eq!(spec.option("channel"), Some("bioconda"));
    }

    #[test]
    fn full_round_trips_well_formed_descriptors() {
        for raw in ["core:node", "aqua:cli/cli", "go:github.com/x/y/cmd/z", "npm:@scope/pkg"] {
            assert_eq!(BackendSpec::parse(raw).full(), raw);
        }
    }
}
