use std::path::Path;

use anyhow::Context as _;

use super::{
    compiler::{CompileResult, Compiler},
    diff,
    result::{CaseOutcome, CaseResult, TestReport},
    runner::{ExecutionOutcome, TestRunner},
    testcase::TestCase,
};
use crate::config::Config;
use crate::error::Result as PreconditionResult;
use crate::storage::Problem;

/// Progress hooks. Every method defaults to doing nothing.
pub trait TestListener {
    fn on_compile_start(&mut self, _source: &Path) {}
    fn on_compile_finish(&mut self, _result: &CompileResult) {}
    fn on_case_start(&mut self, _case: &TestCase) {}
    fn on_case_finish(&mut self, _outcome: &CaseOutcome) {}
}

impl TestListener for () {}

/// discover -> compile once -> (run -> compare) for each testcase, strictly in order.
#[derive(Debug, Clone)]
pub struct TestPipeline {
    compiler: Compiler,
    runner: TestRunner,
}

impl TestPipeline {
    pub fn new(compiler: Compiler, runner: TestRunner) -> Self {
        Self { compiler, runner }
    }

    pub fn from_config(cfg: &Config) -> PreconditionResult<Self> {
        let compiler = Compiler::for_language(&cfg.language, &cfg.compiler)?
            .time_limit(cfg.test.compile_time_limit());
        let runner = TestRunner::new().execution_time_limit(cfg.test.time_limit());
        Ok(Self::new(compiler, runner))
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn runner(&self) -> &TestRunner {
        &self.runner
    }

    pub async fn run(
        &self,
        problem: &Problem,
        listener: &mut impl TestListener,
    ) -> anyhow::Result<TestReport> {
        let testcases = TestCase::enumerate(problem).context("Failed to find testcase")?;
        if testcases.is_empty() {
            return Ok(TestReport::NoTestcases {
                dir: problem.dir().to_owned(),
            });
        }

        listener.on_compile_start(problem.source());
        let compiled = self
            .compiler
            .compile(problem.source(), problem.artifact())
            .await?;
        listener.on_compile_finish(&compiled);
        if let CompileResult::Failure { diagnostic } = compiled {
            return Ok(TestReport::CompileError { diagnostic });
        }

        let mut outcomes = Vec::with_capacity(testcases.len());
        for t in testcases {
            listener.on_case_start(&t);
            let outcome = self.judge(problem.artifact(), t).await?;
            listener.on_case_finish(&outcome);
            outcomes.push(outcome);
        }
        Ok(TestReport::judged(outcomes))
    }

    async fn judge(&self, artifact: &Path, case: TestCase) -> anyhow::Result<CaseOutcome> {
        if let Some(missing) = case.missing_fixture() {
            log::warn!("Skipping {}: {} not found", case.id, missing.to_string_lossy());
            return Ok(CaseOutcome {
                result: CaseResult::Skipped {
                    missing: missing.to_owned(),
                },
                case,
                execution_time: None,
            });
        }

        let (result, execution_time) =
            match self.runner.run(artifact, &case.input, &case.output).await? {
                ExecutionOutcome::TimeLimitExceeded { limit } => {
                    (CaseResult::TimeLimitExceeded { limit }, Some(limit))
                }
                ExecutionOutcome::RuntimeError {
                    exit_code,
                    diagnostic,
                    execution_time,
                } => (
                    CaseResult::RuntimeError {
                        exit_code,
                        diagnostic,
                    },
                    Some(execution_time),
                ),
                ExecutionOutcome::Success { execution_time } => {
                    let matched = diff::compare_files(&case.output, &case.answer)
                        .with_context(|| format!("Failed to compare output of {}", case.id))?;
                    let result = if matched {
                        CaseResult::Accepted
                    } else {
                        CaseResult::WrongAnswer {
                            actual: case.output.clone(),
                            expected: case.answer.clone(),
                        }
                    };
                    (result, Some(execution_time))
                }
            };

        Ok(CaseOutcome {
            case,
            result,
            execution_time,
        })
    }
}
