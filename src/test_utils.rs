//! Shared test utilities for cmake-help-lsp.
//!
//! This module provides a scripted stand-in for the cmake executable.
//! It is only compiled when running tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{HelpError, HelpResult};
use crate::tool::HelpTool;

/// A [`HelpTool`] answering from a fixed table of argument lines.
///
/// Invocations are recorded so tests can assert which flags were used.
/// Unknown invocations answer with empty output, like cmake does for most
/// unknown help names.
#[derive(Default)]
pub struct ScriptedTool {
    responses: HashMap<String, String>,
    missing: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tool whose executable cannot be found.
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    /// Answer `args` (joined by spaces) with `output`.
    pub fn respond(mut self, args: &str, output: &str) -> Self {
        self.responses.insert(args.to_string(), output.to_string());
        self
    }

    /// A tool knowing a small, realistic subset of cmake's help listings.
    pub fn cmake() -> Self {
        Self::new()
            .respond("--version", "cmake version 3.21.4\n\nCMake suite maintained and supported by Kitware (kitware.com/cmake).\n")
            .respond(
                "--help-command-list",
                "add_executable\nadd_library\nendif\nforeach\nif\nmessage\nset\n",
            )
            .respond(
                "--help-variable-list",
                "CMAKE_BUILD_TYPE\nCMAKE_<LANG>_COMPILER\nCMAKE_<LANG>_FLAGS_<CONFIG>\nPROJECT_NAME\n",
            )
            .respond(
                "--help-property-list",
                "COMPILE_OPTIONS\nINCLUDE_DIRECTORIES\n<CONFIG>_OUTPUT_NAME\n",
            )
            .respond(
                "--help-module-list",
                "CheckCXXSourceCompiles\nFindZLIB\nGNUInstallDirs\n",
            )
            .respond(
                "--help-command message",
                "message\n-------\n\nLog a message.\n\n::\n\n  message([<mode>] \"message text\" ...)\n",
            )
            .respond(
                "--help-command if",
                "if\n--\n\nConditionally execute a group of commands.\n",
            )
            .respond(
                "--help-variable CMAKE_BUILD_TYPE",
                "CMAKE_BUILD_TYPE\n----------------\n\nSpecifies the build type on single-configuration generators.\n",
            )
            .respond(
                "--help-module GNUInstallDirs",
                "GNUInstallDirs\n--------------\n\nDefine GNU standard installation directories\n",
            )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HelpTool for ScriptedTool {
    async fn invoke(&self, args: &[&str]) -> HelpResult<String> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        if self.missing {
            return Err(HelpError::ToolNotFound {
                program: "cmake".to_string(),
            });
        }

        Ok(self.responses.get(&key).cloned().unwrap_or_default())
    }
}
