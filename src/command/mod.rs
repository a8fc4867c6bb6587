//! External command execution.
//!
//! Checks talk to the host through [`CommandRunner`] so that tests can
//! substitute canned output for PowerShell.

pub mod process;

pub use process::ProcessRunner;

use crate::error::CheckError;

/// Captured result of an external command that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code
    pub fn failure(code: i32) -> Self {
        CommandOutput {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout of a successful run; a non-zero exit becomes [`CheckError::Failed`]
    pub fn into_stdout(self) -> Result<String, CheckError> {
        if self.succeeded() {
            Ok(self.stdout)
        } else {
            Err(CheckError::Failed {
                code: self.code.unwrap_or(-1),
            })
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs an external program with a bounded wait
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CheckError>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str, &[&str]) -> Result<CommandOutput, CheckError>,
{
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CheckError> {
        self(program, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_stdout_success() {
        let output = CommandOutput::success("[]");
        assert_eq!(output.into_stdout().unwrap(), "[]");
    }

    #[test]
    fn test_into_stdout_failure_keeps_code() {
        let err = CommandOutput::failure(3).into_stdout().unwrap_err();
        assert!(matches!(err, CheckError::Failed { code: 3 }));
        assert_eq!(err.to_string(), "command failed with return code: 3");
    }

    #[test]
    fn test_signal_termination_is_failure() {
        let output = CommandOutput {
            code: None,
            ..Default::default()
        };
        assert!(matches!(output.into_stdout(), Err(CheckError::Failed { code: -1 })));
    }

    #[test]
    fn test_closure_runner() {
        let runner = |program: &str, args: &[&str]| -> Result<CommandOutput, CheckError> {
            Ok(CommandOutput::success(format!("{} {}", program, args.join(" "))))
        };
        let output = runner.run("powershell", &["-Command", "Get-Date"]).unwrap();
        assert_eq!(output.stdout, "powershell -Command Get-Date");
    }
}
