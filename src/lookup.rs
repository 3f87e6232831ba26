//! Exact lookup of a word across all help categories.

use tracing::debug;

use crate::completion::{match_all, MatchMode, Suggestion};
use crate::error::HelpResult;
use crate::tool::HelpTool;

/// The canonical entry for `word`: the first exact match in the order
/// command, variable, property, module.
///
/// `Ok(None)` means no category knows the word.
pub async fn lookup<T>(tool: &T, word: &str) -> HelpResult<Option<Suggestion>>
where
    T: HelpTool + ?Sized,
{
    let found = match_all(tool, word, MatchMode::Exact).await?.into_iter().next();
    debug!(word, found = ?found.as_ref().map(|s| s.category), "exact lookup");
    Ok(found)
}
