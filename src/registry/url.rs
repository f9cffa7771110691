//! Backend kind dispatch and package-origin URL resolution.
//!
//! Resolution is pure string templating: no network access, and an
//! unrecognized prefix degrades to a best-effort GitHub guess rather than
//! failing the record.
use std::collections::BTreeMap;
use std::fmt;

/// Base path of the per-language documentation pages for core tools.
const CORE_DOCS_BASE: &str = "https://mise.jdx.dev/lang";

/// Conda channel used when a backend does not name one.
const DEFAULT_CONDA_CHANNEL: &str = "conda-forge";

/// Known backend kinds, plus a fallback for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Built-in language plugin documented on the mise site.
    Core,
    /// crates.io package.
    Cargo,
    /// npm package.
    Npm,
    /// PyPI package installed with pipx.
    Pipx,
    /// Go module.
    Go,
    /// RubyGems package.
    Gem,
    /// .NET tool from nuget.org.
    Dotnet,
    /// GitHub release assets.
    Github,
    /// GitLab release assets.
    Gitlab,
    /// Universal binary installer (GitHub-hosted).
    Ubi,
    /// vfox plugin (GitHub-hosted).
    Vfox,
    /// asdf plugin repository.
    Asdf,
    /// Swift package.
    Spm,
    /// aqua registry package.
    Aqua,
    /// conda package.
    Conda,
    /// Direct HTTP download; no deducible project page.
    Http,
    /// Any other prefix, kept verbatim.
    Unknown(String),
}

impl BackendKind {
    /// Classify a descriptor prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "core" => Self::Core,
            "cargo" => Self::Cargo,
            "npm" => Self::Npm,
            "pipx" => Self::Pipx,
            "go" => Self::Go,
            "gem" => Self::Gem,
            "dotnet" => Self::Dotnet,
            "github" => Self::Github,
            "gitlab" => Self::Gitlab,
            "ubi" => Self::Ubi,
            "vfox" => Self::Vfox,
            "asdf" => Self::Asdf,
            "spm" => Self::Spm,
            "aqua" => Self::Aqua,
            "conda" => Self::Conda,
            "http" => Self::Http,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The prefix this kind is written with.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Core => "core",
            Self::Cargo => "cargo",
            Self::Npm => "npm",
            Self::Pipx => "pipx",
            Self::Go => "go",
            Self::Gem => "gem",
            Self::Dotnet => "dotnet",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Ubi => "ubi",
            Self::Vfox => "vfox",
            Self::Asdf => "asdf",
            Self::Spm => "spm",
            Self::Aqua => "aqua",
            Self::Conda => "conda",
            Self::Http => "http",
            Self::Unknown(prefix) => prefix,
        }
    }

    /// Whether this kind is one of the recognized backends.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Build the web URL of the package origin for `slug`.
    ///
    /// Returns an empty string for an empty slug and for [`BackendKind::Http`].
    #[must_use]
    pub fn url(&self, slug: &str, options: &BTreeMap<String, String>) -> String {
        if slug.is_empty() {
            return String::new();
        }
        match self {
            Self::Core => format!("{CORE_DOCS_BASE}/{slug}.html"),
            Self::Cargo => format!("https://crates.io/crates/{slug}"),
            Self::Npm => format!("https://www.npmjs.com/package/{slug}"),
            Self::Pipx => format!("https://pypi.org/project/{slug}"),
            Self::Go => format!("https://pkg.go.dev/{slug}"),
            Self::Gem => format!("https://rubygems.org/gems/{slug}"),
            Self::Dotnet => format!("https://www.nuget.org/packages/{slug}"),
            Self::Github | Self::Vfox | Self::Unknown(_) => format!("https://github.com/{slug}"),
            Self::Gitlab => format!("https://gitlab.com/{slug}"),
            Self::Ubi | Self::Aqua => format!("https://github.com/{}", owner_repo(slug)),
            Self::Asdf | Self::Spm => {
                if slug.starts_with("http") {
                    slug.to_string()
                } else if options.get("provider").is_some_and(|p| p == "gitlab") {
                    format!("https://gitlab.com/{slug}")
                } else {
                    format!("https://github.com/{slug}")
                }
            }
            Self::Conda => {
                let channel = options
                    .get("channel")
                    .map_or(DEFAULT_CONDA_CHANNEL, String::as_str);
                format!("https://anaconda.org/{channel}/{slug}")
            }
            Self::Http => String::new(),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the package-origin URL for a parsed descriptor.
#[must_use]
pub fn resolve(prefix: &str, slug: &str, options: &BTreeMap<String, String>) -> String {
    BackendKind::from_prefix(prefix).url(slug, options)
}

/// Keep the first two path segments (`owner/repo`), dropping any sub-path.
fn owner_repo(slug: &str) -> String {
    slug.split('/').take(2).collect::<Vec<_>>().join("/")
}
