//! Integration tests running a shell script in place of the cmake executable.
//!
//! The script is handed to `sh` through the configured command line, which
//! also exercises leading arguments and quoted paths.

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use cmake_help_lsp::category::Category;
use cmake_help_lsp::completion::completions;
use cmake_help_lsp::error::HelpError;
use cmake_help_lsp::hover::hover_text;
use cmake_help_lsp::tool::{CmakeTool, HelpTool};
use cmake_help_lsp::version::resolve_help_url;

const FAKE_CMAKE: &str = r#"
if [ "$1" = "-Wno-dev" ]; then
  shift
fi
case "$1" in
  --version) printf 'cmake version 3.27.1\r\n\r\nCMake suite maintained by Kitware\r\n' ;;
  --help-command-list) printf 'add_library\r\nif\r\nmessage\r\n' ;;
  --help-variable-list) printf 'CMAKE_<LANG>_COMPILER\r\n' ;;
  --help-property-list) printf 'COMPILE_OPTIONS\r\n' ;;
  --help-module-list) printf 'FindZLIB\r\nGNUInstallDirs\r\n' ;;
  --help-command) printf '%s\r\n---\r\n\r\nHelp for %s.\r\n' "$2" "$2" ;;
  --echo) shift; printf '%s|' "$@" ;;
  --fail) printf 'partial output\n'; exit 3 ;;
  *) exit 1 ;;
esac
"#;

/// Helper: write the fake cmake script and return a command line running it.
///
/// Returns (TempDir, command line) - keep TempDir alive for test duration.
fn fake_cmake(leading: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let script: PathBuf = temp_dir.path().join("fake cmake.sh");
    fs::write(&script, FAKE_CMAKE).expect("Failed to write fake cmake");
    let command_line = format!("sh \"{}\" {leading}", script.display());
    (temp_dir, command_line)
}

#[tokio::test]
async fn test_output_has_no_carriage_returns() {
    let (_temp_dir, command_line) = fake_cmake("");
    let tool = CmakeTool::new(command_line);

    let output = tool.invoke(&["--help-command-list"]).await.unwrap();
    assert_eq!(output, "add_library\nif\nmessage\n");
}

#[tokio::test]
async fn test_arguments_have_no_carriage_returns() {
    let (_temp_dir, command_line) = fake_cmake("");
    let tool = CmakeTool::new(command_line);

    let output = tool.invoke(&["--echo", "if\r", "message"]).await.unwrap();
    assert_eq!(output, "if|message|");
}

#[tokio::test]
async fn test_leading_arguments_come_first() {
    let (_temp_dir, command_line) = fake_cmake("-Wno-dev");
    let tool = CmakeTool::new(command_line);

    let url = resolve_help_url(&tool).await.unwrap();
    assert_eq!(url, "https://cmake.org/cmake/help/v3.27/");
}

#[tokio::test]
async fn test_non_zero_exit_still_returns_output() {
    let (_temp_dir, command_line) = fake_cmake("");
    let tool = CmakeTool::new(command_line);

    let output = tool.invoke(&["--fail"]).await.unwrap();
    assert_eq!(output, "partial output\n");
}

#[tokio::test]
async fn test_completions_through_real_process() {
    let (_temp_dir, command_line) = fake_cmake("");
    let tool = CmakeTool::new(command_line);

    let suggestions = completions(&tool, "<LANG>").await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].category, Category::Variable);
    assert_eq!(suggestions[0].insert_text, "CMAKE_${1:<LANG>}_COMPILER");
}

#[tokio::test]
async fn test_hover_through_real_process() {
    let (_temp_dir, command_line) = fake_cmake("");
    let tool = CmakeTool::new(command_line);

    let text = hover_text(&tool, "message").await.unwrap();
    assert_eq!(text.as_deref(), Some("\nHelp for message.\n"));
}

#[tokio::test]
async fn test_missing_executable() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no-such-cmake");
    let tool = CmakeTool::new(format!("\"{}\"", missing.display()));

    match completions(&tool, "").await {
        Err(HelpError::ToolNotFound { program }) => {
            assert_eq!(program, missing.display().to_string())
        }
        other => panic!("expected ToolNotFound, got {other:?}"),
    }
}
