use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use anyhow::{bail, Context};
use tokio::{io::AsyncReadExt as _, process::Command};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Exited with code 0. Only in this case the output file is meaningful.
    Success { execution_time: Duration },
    RuntimeError {
        exit_code: Option<i32>,
        diagnostic: String,
        execution_time: Duration,
    },
    TimeLimitExceeded { limit: Duration },
}

/// Runs a compiled artifact with stdin/stdout bound to files.
#[derive(Debug, Clone)]
pub struct TestRunner {
    execution_time_limit: Duration,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_millis(2000);

    pub fn new() -> Self {
        Self {
            execution_time_limit: Self::DEFAULT_EXEC_TIME_LIMIT,
        }
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.execution_time_limit = limit;
        self
    }

    pub fn get_exec_time_limit(&self) -> Duration {
        self.execution_time_limit
    }

    /// `output` is truncated before the process starts.
    pub async fn run(
        &self,
        artifact: impl AsRef<Path>,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> anyhow::Result<ExecutionOutcome> {
        let artifact = Self::spawnable_path(artifact.as_ref());
        let stdin = fsutil::open_file(&input)?;
        let stdout = fsutil::create_file(&output)?;

        let start_at = tokio::time::Instant::now();

        let spawned = Command::new(&artifact)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let mut proc = match spawned {
            Ok(proc) => proc,
            Err(e) => {
                return Ok(ExecutionOutcome::RuntimeError {
                    exit_code: None,
                    diagnostic: format!("Failed to spawn '{}': {}", artifact.to_string_lossy(), e),
                    execution_time: start_at.elapsed(),
                })
            }
        };
        let mut stderr = proc.stderr.take().context("Failed to open stderr")?;
        let mut stderr_buf = Vec::new();

        let res = {
            let fut_stderr = stderr.read_to_end(&mut stderr_buf);
            let fut_exit_status = proc.wait();
            tokio::time::timeout(self.execution_time_limit, async {
                tokio::try_join!(fut_stderr, fut_exit_status)
                    .context("Failed to communicate with subprocess")
            })
            .await
        };
        let execution_time = start_at.elapsed();

        match res {
            Err(_) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                Ok(ExecutionOutcome::TimeLimitExceeded {
                    limit: self.execution_time_limit,
                })
            }

            Ok(Err(e)) => bail!(e),

            Ok(Ok((_, exit_status))) if exit_status.success() => {
                Ok(ExecutionOutcome::Success { execution_time })
            }

            Ok(Ok((_, exit_status))) => Ok(ExecutionOutcome::RuntimeError {
                exit_code: exit_status.code(),
                diagnostic: String::from_utf8_lossy(&stderr_buf).into_owned(),
                execution_time,
            }),
        }
    }

    /// A bare file name would be looked up in `PATH`; make it explicit.
    fn spawnable_path(artifact: &Path) -> PathBuf {
        if artifact.components().count() == 1 && artifact.is_relative() {
            Path::new(".").join(artifact)
        } else {
            artifact.to_owned()
        }
    }
}
