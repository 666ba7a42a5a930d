use std::{
    path::Path,
    process::{Output, Stdio},
    time::Duration,
};

use anyhow::Context as _;
use serde::Serialize;
use tokio::process::Command;

use crate::config::{CompilerConfig, ToolchainConfig};
use crate::error::Result as PreconditionResult;
use crate::lang::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CompileResult {
    Success,
    Failure { diagnostic: String },
}

impl CompileResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Runs `<program> <flags>... <source> -o <artifact>`.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    flags: Vec<String>,
    time_limit: Duration,
}

impl Compiler {
    const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

    pub fn new(toolchain: &ToolchainConfig) -> Self {
        Self {
            program: toolchain.program.clone(),
            flags: toolchain.flags.clone(),
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    /// Fails with `LanguageNotSupported` before anything is spawned.
    pub fn for_language(lang: &str, cfg: &CompilerConfig) -> PreconditionResult<Self> {
        let lang = Language::parse(lang)?;
        Ok(Self::new(cfg.toolchain(lang)))
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn get_time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn command_line(&self, source: &Path, artifact: &Path) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.flags.iter().cloned());
        words.push(source.to_string_lossy().into_owned());
        words.push("-o".to_owned());
        words.push(artifact.to_string_lossy().into_owned());
        words.join(" ")
    }

    /// The previous artifact is always removed first, so a failed build never leaves a stale
    /// executable behind.
    pub async fn compile(
        &self,
        source: impl AsRef<Path>,
        artifact: impl AsRef<Path>,
    ) -> anyhow::Result<CompileResult> {
        let (source, artifact) = (source.as_ref(), artifact.as_ref());

        fsutil::remove_file_if_exists(artifact).context("Failed to remove old artifact")?;

        log::info!("Compiling: {}", self.command_line(source, artifact));

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.flags)
            .arg(source)
            .arg("-o")
            .arg(artifact)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.time_limit, cmd.output()).await {
            Err(_) => {
                return Ok(CompileResult::Failure {
                    diagnostic: format!(
                        "Compilation did not finish within {}ms",
                        self.time_limit.as_millis()
                    ),
                })
            }
            Ok(Err(e)) => {
                return Ok(CompileResult::Failure {
                    diagnostic: format!("Failed to spawn '{}': {}", self.program, e),
                })
            }
            Ok(Ok(output)) => output,
        };

        if output.status.success() {
            return Ok(CompileResult::Success);
        }
        Ok(CompileResult::Failure {
            diagnostic: Self::diagnostic_of(&output),
        })
    }

    fn diagnostic_of(output: &Output) -> String {
        let mut msg = String::from_utf8_lossy(&output.stderr).into_owned();
        msg += String::from_utf8_lossy(&output.stdout).as_ref();
        if !msg.trim().is_empty() {
            return msg;
        }
        match output.status.code() {
            Some(code) => format!("Compile error: exitcode={}", code),
            None => "Failed to compile: process terminated by signal".to_owned(),
        }
    }
}
