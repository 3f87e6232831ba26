//! Errors raised while talking to the cmake help tool.

use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum HelpError {
    /// The configured executable could not be found on disk or in `PATH`.
    #[error("the cmake executable `{program}` was not found")]
    ToolNotFound { program: String },

    /// A describe call was requested for a name its listing does not contain.
    #[error("{category} `{name}` not found")]
    NameNotFound { category: Category, name: String },

    #[error("failed to run cmake: {0}")]
    Process(#[from] std::io::Error),
}

pub type HelpResult<T> = Result<T, HelpError>;
