//! The four kinds of entries the cmake help tool can list and describe.

use std::fmt;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::CompletionItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Built-in commands such as `add_executable` or `if`
    Command,
    /// Variables such as `CMAKE_BUILD_TYPE`
    Variable,
    /// Target, directory, source and test properties
    Property,
    /// Modules shipped with cmake, including `Find*` package finders
    Module,
}

impl Category {
    /// All categories in the order their results are concatenated.
    pub fn all() -> [Self; 4] {
        [
            Self::Command,
            Self::Variable,
            Self::Property,
            Self::Module,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Command => "command",
            Category::Variable => "variable",
            Category::Property => "property",
            Category::Module => "module",
        }
    }

    /// Flag listing every name of this category, one per line.
    pub fn list_flag(&self) -> &'static str {
        match self {
            Category::Command => "--help-command-list",
            Category::Variable => "--help-variable-list",
            Category::Property => "--help-property-list",
            Category::Module => "--help-module-list",
        }
    }

    /// Flag printing the documentation block of a single name.
    pub fn describe_flag(&self) -> &'static str {
        match self {
            Category::Command => "--help-command",
            Category::Variable => "--help-variable",
            Category::Property => "--help-property",
            Category::Module => "--help-module",
        }
    }

    /// Label shown next to a suggestion. Commands read as functions to the editor.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Category::Command => "function",
            other => other.name(),
        }
    }

    /// Path segment of the per-page documentation site.
    pub fn url_segment(&self) -> &'static str {
        self.name()
    }

    pub fn completion_kind(&self) -> CompletionItemKind {
        match self {
            Category::Command => CompletionItemKind::FUNCTION,
            Category::Variable => CompletionItemKind::VARIABLE,
            Category::Property => CompletionItemKind::PROPERTY,
            Category::Module => CompletionItemKind::MODULE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
