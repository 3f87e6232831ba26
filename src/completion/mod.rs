//! Matching help listings against a typed word.
//!
//! Completion asks all four categories at once and shows every name that
//! contains the word under the cursor, in the order command, variable,
//! property, module. Documentation for an item is fetched only when the
//! editor resolves it.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemLabelDetails, Documentation, InsertTextFormat,
};
use tracing::debug;

use crate::category::Category;
use crate::error::HelpResult;
use crate::listing::{self, Listing};
use crate::tool::HelpTool;

pub mod snippet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The name contains the query anywhere. An empty query matches everything.
    Prefix,
    /// The name equals the query.
    Exact,
}

impl MatchMode {
    pub fn matches(&self, name: &str, query: &str) -> bool {
        match self {
            MatchMode::Prefix => name.contains(query),
            MatchMode::Exact => name == query,
        }
    }
}

/// A help entry offered to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub category: Category,
    pub label: String,
    pub insert_text: String,
}

/// What a completion item carries so it can be resolved later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionData {
    pub category: Category,
}

impl Suggestion {
    pub fn new(category: Category, label: &str) -> Self {
        Self {
            category,
            label: label.to_string(),
            insert_text: snippet::insert_text(category, label),
        }
    }

    pub fn completion_item(&self) -> CompletionItem {
        CompletionItem {
            label: self.label.clone(),
            kind: Some(self.category.completion_kind()),
            label_details: Some(CompletionItemLabelDetails {
                detail: None,
                description: Some(self.category.kind_label().to_string()),
            }),
            insert_text: Some(self.insert_text.clone()),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            data: serde_json::to_value(CompletionData {
                category: self.category,
            })
            .ok(),
            ..Default::default()
        }
    }
}

/// Suggestions for the names of `listing` matching `query`, in listing order.
pub fn match_listing(
    listing: &Listing,
    category: Category,
    query: &str,
    mode: MatchMode,
) -> Vec<Suggestion> {
    listing
        .names()
        .filter(|name| mode.matches(name, query))
        .map(|name| Suggestion::new(category, name))
        .collect()
}

pub async fn match_category<T>(
    tool: &T,
    category: Category,
    query: &str,
    mode: MatchMode,
) -> HelpResult<Vec<Suggestion>>
where
    T: HelpTool + ?Sized,
{
    let listing = listing::list(tool, category).await?;
    Ok(match_listing(&listing, category, query, mode))
}

/// Match `query` in every category concurrently and concatenate the results.
///
/// A failure in any category fails the whole search.
pub async fn match_all<T>(tool: &T, query: &str, mode: MatchMode) -> HelpResult<Vec<Suggestion>>
where
    T: HelpTool + ?Sized,
{
    let (commands, variables, properties, modules) = tokio::try_join!(
        match_category(tool, Category::Command, query, mode),
        match_category(tool, Category::Variable, query, mode),
        match_category(tool, Category::Property, query, mode),
        match_category(tool, Category::Module, query, mode),
    )?;

    Ok([commands, variables, properties, modules].concat())
}

/// Every entry containing `partial`, for the completion list.
pub async fn completions<T>(tool: &T, partial: &str) -> HelpResult<Vec<Suggestion>>
where
    T: HelpTool + ?Sized,
{
    let suggestions = match_all(tool, partial, MatchMode::Prefix).await?;
    debug!(partial, count = suggestions.len(), "completion suggestions");
    Ok(suggestions)
}

/// The one-line summary shown as completion item documentation.
pub async fn resolve_documentation<T>(tool: &T, category: Category, label: &str) -> HelpResult<String>
where
    T: HelpTool + ?Sized,
{
    let described = listing::describe(tool, category, label).await?;
    Ok(described.summary().to_string())
}

/// Fill in the documentation of an item produced by [`Suggestion::completion_item`].
///
/// Items without category data are returned untouched.
pub async fn resolve_completion_item<T>(tool: &T, mut item: CompletionItem) -> HelpResult<CompletionItem>
where
    T: HelpTool + ?Sized,
{
    let Some(data) = item
        .data
        .clone()
        .and_then(|value| serde_json::from_value::<CompletionData>(value).ok())
    else {
        return Ok(item);
    };

    let summary = resolve_documentation(tool, data.category, &item.label).await?;
    item.documentation = Some(Documentation::String(summary));
    Ok(item)
}
