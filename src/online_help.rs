//! Online documentation links for a search term.
//!
//! | Match | Single-page docs (< 3.0) | Per-page docs |
//! |-------|--------------------------|---------------|
//! | none | docs root | site search |
//! | property | docs root | site search |
//! | command, variable, module | `cmake.html#<category>:<term>` | `<category>/<term>.html` |
//!
//! Properties are spread over several scopes (target, directory, source...)
//! whose pages are not distinguished here, so they go through site search.

use tracing::debug;

use crate::category::Category;
use crate::error::HelpResult;
use crate::lookup::lookup;
use crate::tool::HelpTool;
use crate::version::{resolve_help_url, DocsScheme};

/// Build the documentation link for `term` under the docs root `base_url`.
///
/// `found` is the category of the canonical match, if any.
pub fn help_url(base_url: &str, term: &str, found: Option<Category>) -> String {
    let term = term.replace(['<', '>'], "");
    let scheme = DocsScheme::of(base_url);

    match (found, scheme) {
        (None, DocsScheme::SinglePage) | (Some(Category::Property), DocsScheme::SinglePage) => {
            base_url.to_string()
        }
        (None, DocsScheme::PerPage) if term.is_empty() => base_url.to_string(),
        (None, DocsScheme::PerPage) | (Some(Category::Property), DocsScheme::PerPage) => {
            search_url(base_url, &term)
        }
        (Some(category), DocsScheme::SinglePage) => {
            format!("{base_url}#{}:{term}", category.url_segment())
        }
        (Some(category), DocsScheme::PerPage) => {
            format!("{base_url}{}/{term}.html", category.url_segment())
        }
    }
}

fn search_url(base_url: &str, term: &str) -> String {
    format!(
        "{base_url}search.html?q={}&check_keywords=yes&area=default",
        urlencoding::encode(term)
    )
}

/// Resolve the installed documentation root and look `term` up in it.
pub async fn online_help_url<T>(tool: &T, term: &str) -> HelpResult<String>
where
    T: HelpTool + ?Sized,
{
    let (base_url, found) = tokio::try_join!(resolve_help_url(tool), lookup(tool, term))?;
    let url = help_url(&base_url, term, found.map(|suggestion| suggestion.category));
    debug!(term, %url, "online help");
    Ok(url)
}
