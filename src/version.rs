//! Mapping the installed cmake version to its documentation site.
//!
//! cmake 3.0 moved from a single `cmake.html` page with anchors to one page
//! per entry. Which scheme a URL uses is read back from its shape: legacy
//! URLs end in `.html`, modern ones in `/`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::HelpResult;
use crate::tool::HelpTool;

pub const HELP_BASE_URL: &str = "https://cmake.org/cmake/help/";

/// Releases before 3.0 that have a published `cmake.html` page.
const LEGACY_RELEASES: &[&str] = &[
    "2.8.12", "2.8.11", "2.8.10", "2.8.9", "2.8.8", "2.8.7", "2.8.6", "2.8.5", "2.8.4", "2.8.3",
    "2.8.2", "2.8.1", "2.8.0", "2.6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsScheme {
    /// One `cmake.html` page, entries addressed by `#category:name` anchors
    SinglePage,
    /// One page per entry under `<category>/<name>.html`
    PerPage,
}

impl DocsScheme {
    pub fn of(url: &str) -> Self {
        if url.ends_with(".html") {
            DocsScheme::SinglePage
        } else {
            DocsScheme::PerPage
        }
    }
}

/// Pull `X.Y.Z` out of `cmake --version` output. Empty when nothing matches.
pub fn parse_version(output: &str) -> String {
    static VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"version\s+(\d+\.\d+\.\d+)").unwrap());

    VERSION
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str().to_string())
        .unwrap_or_default()
}

/// Documentation root for `version`.
///
/// The `>= "3.0"` test compares strings, not numbers, so `10.0.0` lands in
/// the legacy branch and falls back to `latest/`.
pub fn help_url_for_version(version: &str) -> String {
    static MAJOR_MINOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.\d+)\.\d+").unwrap());

    let path = if version.is_empty() {
        "latest/".to_string()
    } else if version >= "3.0" {
        format!("v{}", MAJOR_MINOR.replace(version, "$1/"))
    } else if LEGACY_RELEASES.contains(&version) {
        format!("v{version}/cmake.html")
    } else {
        "latest/".to_string()
    };

    format!("{HELP_BASE_URL}{path}")
}

pub async fn resolve_version<T>(tool: &T) -> HelpResult<String>
where
    T: HelpTool + ?Sized,
{
    let output = tool.invoke(&["--version"]).await?;
    let version = parse_version(&output);
    debug!(%version, "resolved cmake version");
    Ok(version)
}

pub async fn resolve_help_url<T>(tool: &T) -> HelpResult<String>
where
    T: HelpTool + ?Sized,
{
    let version = resolve_version(tool).await?;
    Ok(help_url_for_version(&version))
}
