//! Listing and describing the entries of each help category.
//!
//! Nothing is cached: every call asks the tool again, which keeps the results
//! in step with whichever cmake the settings currently point at.

use itertools::Itertools;
use tracing::debug;

use crate::category::Category;
use crate::error::{HelpError, HelpResult};
use crate::tool::HelpTool;

/// Output of a `--help-<category>-list` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    raw: String,
}

impl Listing {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Names in the order the tool printed them. Blank lines are skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.raw.lines().filter(|line| !line.is_empty())
    }

    /// Plain substring check against the raw listing text.
    ///
    /// This is intentionally looser than a per-line comparison: it guards the
    /// describe call and nothing more.
    pub fn mentions(&self, name: &str) -> bool {
        self.raw.contains(name)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Output of a `--help-<category> NAME` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeResult {
    text: String,
}

impl DescribeResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The documentation without the two-line name header.
    pub fn body(&self) -> String {
        self.text.split('\n').skip(2).join("\n")
    }

    /// The fourth line, which holds the one-line summary of the entry.
    pub fn summary(&self) -> &str {
        self.text.split('\n').nth(3).unwrap_or_default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub async fn list<T>(tool: &T, category: Category) -> HelpResult<Listing>
where
    T: HelpTool + ?Sized,
{
    let raw = tool.invoke(&[category.list_flag()]).await?;
    Ok(Listing::new(raw))
}

/// Describe `name`, refusing names the category's listing does not mention.
pub async fn describe<T>(tool: &T, category: Category, name: &str) -> HelpResult<DescribeResult>
where
    T: HelpTool + ?Sized,
{
    let listing = list(tool, category).await?;
    if !listing.mentions(name) {
        debug!(%category, name, "refusing to describe unlisted name");
        return Err(HelpError::NameNotFound {
            category,
            name: name.to_string(),
        });
    }

    let text = tool.invoke(&[category.describe_flag(), name]).await?;
    Ok(DescribeResult::new(text))
}
