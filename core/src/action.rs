pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;
use std::process::Stdio;

use colored::Colorize;
use error::*;
use indicatif::ProgressBar;
use tokio::process::Command;

use crate::config::Config;
use crate::interactive::new_spinner;
use crate::storage::Problem;
use crate::style;
use crate::testing::{CaseOutcome, CompileResult, TestCase, TestListener, TestPipeline, TestReport};

pub fn init_project(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if let Ok(config_filepath) = Config::find_file_in_ancestors(dir) {
        let path = if config_filepath.is_relative() && !config_filepath.starts_with("./") {
            Path::new("./").join(config_filepath)
        } else {
            config_filepath
        };
        bail!(
            "Already in an oitest project.\nIf it's intentional, remove {:?} and then try again.",
            path
        );
    }

    let config_filepath = dir.join(Config::FILENAME);
    fsutil::write_with_mkdir(config_filepath, Config::example_toml())
        .context("Failed to init oitest project")?;
    Ok(())
}

/// Shows one spinner per step; each finished spinner stays on screen as a result line.
#[derive(Default)]
struct SpinnerListener {
    bar: Option<ProgressBar>,
}

impl TestListener for SpinnerListener {
    fn on_compile_start(&mut self, source: &Path) {
        let name = source.file_name().unwrap_or(source.as_os_str());
        self.bar = Some(new_spinner(format!("Compiling {} ...", name.to_string_lossy())));
    }

    fn on_compile_finish(&mut self, result: &CompileResult) {
        let Some(bar) = self.bar.take() else {
            return
        };
        if result.is_success() {
            bar.finish_and_clear();
        } else {
            bar.abandon();
        }
    }

    fn on_case_start(&mut self, case: &TestCase) {
        self.bar = Some(new_spinner(format!("Testcase {} ...", case.id)));
    }

    fn on_case_finish(&mut self, outcome: &CaseOutcome) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(style::case_line(outcome).cyan().to_string());
        }
    }
}

/// Compiles and judges `problem`, printing progress and the final report.
pub async fn do_test(problem: &Problem, cfg: &Config) -> Result<TestReport> {
    let pipeline = TestPipeline::from_config(cfg)?;

    log::info!(
        "Testing {} (time limit: {}ms)",
        problem.source().to_string_lossy(),
        pipeline.runner().get_exec_time_limit().as_millis()
    );

    let report = pipeline
        .run(problem, &mut SpinnerListener::default())
        .await
        .with_context(|| format!("Failed to test problem '{}'", problem.id()))?;

    println!();
    style::print_report(&report);
    Ok(report)
}

/// Runs `<diff_command> <expected> <actual>` attached to the current terminal.
pub async fn open_diff(diff_command: &str, expected: &Path, actual: &Path) -> Result<()> {
    let mut words = diff_command.split_whitespace();
    let program = words
        .next()
        .with_context(|| format!("Invalid diff command: {:?}", diff_command))?;

    log::info!(
        "{} {} {}",
        diff_command,
        expected.to_string_lossy(),
        actual.to_string_lossy()
    );

    let status = Command::new(program)
        .args(words)
        .arg(expected)
        .arg(actual)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Failed to spawn '{}'", diff_command))?;

    // `diff` itself exits with 1 when the files differ, which is expected here.
    if let Some(code) = status.code().filter(|&c| c > 1) {
        log::warn!("'{}' exited with code {}", program, code);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn init_project_writes_example_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("contest");

        init_project(&project).unwrap();
        let written = fsutil::read_to_string(project.join(Config::FILENAME)).unwrap();
        assert_eq!(written, Config::example_toml());

        let err = init_project(project.join("sub")).unwrap_err();
        assert!(err.to_string().starts_with("Already in an oitest project."));
    }

    #[tokio::test]
    async fn open_diff_rejects_blank_command() {
        let res = open_diff("  ", Path::new("1.ans"), Path::new("1.out")).await;
        assert!(res.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn open_diff_accepts_differing_files() {
        let dir = tempfile::tempdir().unwrap();
        let (ans, out) = (dir.path().join("1.ans"), dir.path().join("1.out"));
        fsutil::write(&ans, "3").unwrap();
        fsutil::write(&out, "2").unwrap();

        open_diff("diff -u", &ans, &out).await.unwrap();
    }
}
