//! Invocation of the external cmake executable.
//!
//! Every help request spawns a fresh process: there is no long-lived handle,
//! no cache and no timeout. A tool that never exits blocks the request that
//! spawned it.
//!
//! The configured command line may carry leading arguments and quoted paths,
//! for example `"C:/Program Files/CMake/bin/cmake.exe" -Wno-dev`.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use crate::error::{HelpError, HelpResult};

/// Something that answers cmake help invocations with stdout text.
///
/// [`CmakeTool`] spawns the real executable; tests substitute scripted tools.
#[async_trait]
pub trait HelpTool: Send + Sync {
    async fn invoke(&self, args: &[&str]) -> HelpResult<String>;
}

/// The cmake executable resolved from a configured command line.
#[derive(Debug, Clone)]
pub struct CmakeTool {
    command_line: String,
}

impl CmakeTool {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }
}

impl Default for CmakeTool {
    fn default() -> Self {
        Self::new("cmake")
    }
}

#[async_trait]
impl HelpTool for CmakeTool {
    async fn invoke(&self, args: &[&str]) -> HelpResult<String> {
        let mut tokens = split_command_line(&self.command_line).into_iter();
        let Some(program) = tokens.next() else {
            return Err(HelpError::ToolNotFound {
                program: String::new(),
            });
        };

        let args: Vec<String> = tokens.chain(args.iter().map(|arg| strip_cr(arg))).collect();
        debug!(%program, ?args, "invoking cmake");

        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => HelpError::ToolNotFound {
                    program: program.clone(),
                },
                _ => HelpError::Process(err),
            })?;

        // The exit status does not matter: whatever reached stdout is the answer.
        if !output.status.success() {
            debug!(%program, status = %output.status, "cmake exited unsuccessfully");
        }

        Ok(strip_cr(&String::from_utf8_lossy(&output.stdout)))
    }
}

pub(crate) fn strip_cr(text: &str) -> String {
    text.replace('\r', "")
}

/// Split a configured command line into the program and its leading arguments.
///
/// Tokens are separated by spaces. A token starting with a double quote runs
/// until a space-separated part ends with a double quote, so quoted paths may
/// contain spaces. Surrounding quotes are removed and empty tokens dropped.
pub fn split_command_line(text: &str) -> Vec<String> {
    static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"[^"]*"$"#).unwrap());

    let mut tokens = Vec::new();
    let mut open: Option<String> = None;

    for part in text.split(' ') {
        match open.as_mut() {
            Some(pending) => {
                pending.push(' ');
                pending.push_str(part);
                if part.ends_with('"') {
                    tokens.push(unquote(pending));
                    open = None;
                }
            }
            None if part.is_empty() => {}
            None if QUOTED.is_match(part) || !part.starts_with('"') => tokens.push(unquote(part)),
            None => open = Some(part.to_string()),
        }
    }

    // An unterminated quote swallows the rest of the line.
    if let Some(pending) = open {
        tokens.push(unquote(&pending));
    }

    tokens
}

fn unquote(token: &str) -> String {
    match token.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner).to_string(),
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod command_line {
        use super::*;

        #[test]
        fn test_plain_program() {
            assert_eq!(split_command_line("cmake"), vec!["cmake"]);
        }

        #[test]
        fn test_program_with_leading_arguments() {
            assert_eq!(
                split_command_line("/usr/bin/cmake --log-level=ERROR"),
                vec!["/usr/bin/cmake", "--log-level=ERROR"]
            );
        }

        #[test]
        fn test_quoted_path_with_spaces() {
            assert_eq!(
                split_command_line(r#""C:/Program Files/CMake/bin/cmake.exe" -Wno-dev"#),
                vec!["C:/Program Files/CMake/bin/cmake.exe", "-Wno-dev"]
            );
        }

        #[test]
        fn test_quoted_token_without_spaces() {
            assert_eq!(
                split_command_line(r#""cmake" "-Wdev""#),
                vec!["cmake", "-Wdev"]
            );
        }

        #[test]
        fn test_repeated_spaces_are_ignored() {
            assert_eq!(
                split_command_line("  cmake   -Wno-dev "),
                vec!["cmake", "-Wno-dev"]
            );
        }

        #[test]
        fn test_unterminated_quote_takes_the_rest() {
            assert_eq!(
                split_command_line(r#"cmake "a b c"#),
                vec!["cmake", "a b c"]
            );
        }

        #[test]
        fn test_empty_line_has_no_tokens() {
            assert!(split_command_line("").is_empty());
            assert!(split_command_line("   ").is_empty());
        }
    }

    #[test]
    fn test_strip_cr() {
        assert_eq!(strip_cr("if\r\nelse\r\n"), "if\nelse\n");
    }

    #[tokio::test]
    async fn test_missing_executable_is_tool_not_found() {
        let tool = CmakeTool::new("definitely-not-a-cmake-binary-4f1c");
        let result = tool.invoke(&["--version"]).await;
        match result {
            Err(HelpError::ToolNotFound { program }) => {
                assert_eq!(program, "definitely-not-a-cmake-binary-4f1c")
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_command_line_is_tool_not_found() {
        let tool = CmakeTool::new("  ");
        assert!(matches!(
            tool.invoke(&["--version"]).await,
            Err(HelpError::ToolNotFound { .. })
        ));
    }
}
