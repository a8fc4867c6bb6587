use super::{CommandOutput, CommandRunner};
use crate::error::CheckError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};

/// Spawns real processes and kills them once the timeout expires.
///
/// Callers stay synchronous; the wait runs on a private current-thread
/// runtime. Must not be used from inside another tokio runtime.
pub struct ProcessRunner {
    timeout: Duration,
    runtime: Runtime,
}

impl ProcessRunner {
    /// Create a runner with the given hard timeout per command
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CheckError::Runtime)?;

        Ok(ProcessRunner { timeout, runtime })
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CheckError> {
        log::debug!("Running {} {:?} (timeout {:?})", program, args, self.timeout);
        self.runtime
            .block_on(run_with_timeout(program, args, self.timeout))
    }
}

/// Run `program` to completion or until `timeout` elapses
pub(crate) async fn run_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput, CheckError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(CheckError::Spawn)?;

    // Dropping the pending future drops the child, which kills it.
    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CommandOutput::from(output)),
        Ok(Err(e)) => Err(CheckError::Spawn(e)),
        Err(_) => Err(CheckError::Timeout {
            secs: timeout.as_secs(),
        }),
    }
}
