//! Hover documentation for cmake commands, variables, properties and modules.
//!
//! The word under the cursor is looked up exactly in every category. The
//! first hit is described by the cmake help tool and its documentation,
//! minus the two-line name header, is shown as markdown.
//!
//! # Configuration
//!
//! Hover can be disabled via [`Settings::hover`](crate::config::Settings::hover):
//!
//! ```toml
//! hover = false
//! ```

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::error::HelpResult;
use crate::listing;
use crate::lookup::lookup;
use crate::tool::HelpTool;

/// Documentation text for `word`, or `None` when no category lists it.
pub async fn hover_text<T>(tool: &T, word: &str) -> HelpResult<Option<String>>
where
    T: HelpTool + ?Sized,
{
    let Some(suggestion) = lookup(tool, word).await? else {
        return Ok(None);
    };

    let described = listing::describe(tool, suggestion.category, &suggestion.label).await?;
    Ok(Some(described.body()))
}

pub async fn hover<T>(tool: &T, word: &str) -> HelpResult<Option<Hover>>
where
    T: HelpTool + ?Sized,
{
    Ok(hover_text(tool, word).await?.map(|value| Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: None,
    }))
}
