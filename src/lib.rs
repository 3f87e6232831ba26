//! cmake-help-lsp: CMake editor support backed by the cmake help tool
//!
//! This crate answers hover, completion and online-help requests for CMake
//! files by running `cmake --help-*` and reading its plain text output.
//!
//! # Overview
//!
//! - **Completion**: every command, variable, property and module whose name
//!   contains the word being typed, with snippet insert text
//! - **Hover**: the help text of the command, variable, property or module
//!   under the cursor
//! - **Online help**: a link into the cmake.org documentation matching the
//!   installed cmake version
//!
//! # Architecture
//!
//! Requests flow strictly downward:
//!
//! - [`tool`]: spawns cmake and captures its output
//! - [`listing`]: `--help-<category>-list` and `--help-<category> NAME`
//! - [`completion`]: matches listings against a word and builds suggestions
//! - [`version`]: maps `cmake --version` to a documentation root
//! - [`lookup`], [`hover`], [`online_help`]: exact lookups and what they feed
//!
//! Nothing is cached and no process outlives its request.
//!
//! # Usage
//!
//! ```ignore
//! use cmake_help_lsp::completion::completions;
//! use cmake_help_lsp::tool::CmakeTool;
//!
//! let tool = CmakeTool::new("cmake");
//! let suggestions = completions(&tool, "add_").await?;
//! ```

// Help tool pipeline
pub mod category;
pub mod error;
pub mod listing;
pub mod tool;
pub mod version;

// LSP feature modules
pub mod completion;
pub mod hover;
pub mod lookup;
pub mod online_help;

// Configuration and editor state
pub mod config;
pub mod document;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;
