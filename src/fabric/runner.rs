use async_trait::async_trait;
use log::{error, info, warn};
use tokio::process::Command;

use crate::error::{PromoteError, Result};

/// Captured output of a successful CLI invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs the Fabric CLI with the given arguments.
///
/// A non-zero exit is reported as [`PromoteError::CommandFailed`] carrying
/// the process's own exit code.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<CommandOutput>;
}

/// Runs a real `fab` binary
#[derive(Debug, Clone)]
pub struct FabCli {
    binary: String,
}

impl FabCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for FabCli {
    fn default() -> Self {
        Self::new("fab")
    }
}

#[async_trait]
impl CommandRunner for FabCli {
    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        let command_line = display_command(&self.binary, args);
        info!("Running: {}", command_line);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|source| PromoteError::CommandSpawn {
                command: self.binary.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stdout.is_empty() {
            info!("[STDOUT]:\n{}", stdout.trim_end());
        }
        if !stderr.is_empty() {
            warn!("[STDERR]:\n{}", stderr.trim_end());
        }

        if !output.status.success() {
            // Killed by a signal leaves no exit code
            let code = output.status.code().unwrap_or(1);
            error!("{} failed with code {}.", command_line, code);
            return Err(PromoteError::CommandFailed {
                command: command_line,
                code,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Render a command line for logs, quoting arguments the way a POSIX shell would need them.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_command_quotes_spaces() {
        let rendered = display_command(
            "fab",
            &args(&["cp", "My WS.Workspace/Sales.Report", "Dev.Workspace/dev-Sales.Report", "-f"]),
        );
        assert_eq!(
            rendered,
            "fab cp 'My WS.Workspace/Sales.Report' Dev.Workspace/dev-Sales.Report -f"
        );
    }

    #[test]
    fn test_shell_quote_edge_cases() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), r#"'it'"'"'s'"#);
        assert_eq!(shell_quote("plain-name_1.txt"), "plain-name_1.txt");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = FabCli::new("sh");
        let output = runner
            .run(&args(&["-c", "echo copied; echo note >&2"]))
            .await
            .unwrap();

        assert_eq!(output.stdout.trim(), "copied");
        assert_eq!(output.stderr.trim(), "note");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_keeps_code() {
        let runner = FabCli::new("sh");
        let err = runner.run(&args(&["-c", "exit 3"])).await.unwrap_err();

        match err {
            PromoteError::CommandFailed { code, .. } => assert_eq!(code, 3),
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let runner = FabCli::new("fabric-promote-no-such-binary");
        let err = runner.run(&args(&["cp"])).await.unwrap_err();

        assert!(matches!(err, PromoteError::CommandSpawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
