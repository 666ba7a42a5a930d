use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Serialize;

use super::testcase::TestCase;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display,
    strum::EnumIter,
)]
pub enum Verdict {
    AC,
    WA,
    RE,
    TLE,
    CE,
    SKIP,
}

impl Verdict {
    /// Verdicts that count as a failure of the solution itself.
    pub fn is_failure(self) -> bool {
        matches!(self, Verdict::WA | Verdict::RE | Verdict::TLE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CaseResult {
    Accepted,
    WrongAnswer {
        actual: PathBuf,
        expected: PathBuf,
    },
    RuntimeError {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    TimeLimitExceeded {
        limit: Duration,
    },
    Skipped {
        missing: PathBuf,
    },
}

impl CaseResult {
    pub fn verdict(&self) -> Verdict {
        use CaseResult::*;
        match self {
            Accepted => Verdict::AC,
            WrongAnswer { .. } => Verdict::WA,
            RuntimeError { .. } => Verdict::RE,
            TimeLimitExceeded { .. } => Verdict::TLE,
            Skipped { .. } => Verdict::SKIP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseOutcome {
    pub case: TestCase,
    pub result: CaseResult,
    /// `None` when the solution was not run for this case.
    pub execution_time: Option<Duration>,
}

impl CaseOutcome {
    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub counts: HashMap<Verdict, usize>,
    pub total: usize,
    /// Index into the outcomes of the first WA, RE or TLE case.
    pub first_failure: Option<usize>,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[CaseOutcome]) -> Self {
        let counts = outcomes.iter().fold(HashMap::new(), |mut count, r| {
            *count.entry(r.verdict()).or_default() += 1;
            count
        });
        Self {
            counts,
            total: outcomes.len(),
            first_failure: outcomes.iter().position(|r| r.verdict().is_failure()),
        }
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.counts.get(&verdict).copied().unwrap_or(0)
    }

    pub fn is_all_accepted(&self) -> bool {
        self.total > 0 && self.count(Verdict::AC) == self.total
    }
}

/// Everything a renderer needs to know about one test invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TestReport {
    CompileError {
        diagnostic: String,
    },
    NoTestcases {
        dir: PathBuf,
    },
    Judged {
        outcomes: Vec<CaseOutcome>,
        summary: RunSummary,
    },
}

impl TestReport {
    pub fn judged(outcomes: Vec<CaseOutcome>) -> Self {
        let summary = RunSummary::from_outcomes(&outcomes);
        Self::Judged { outcomes, summary }
    }

    pub fn is_all_accepted(&self) -> bool {
        match self {
            Self::Judged { summary, .. } => summary.is_all_accepted(),
            _ => false,
        }
    }

    pub fn outcomes(&self) -> &[CaseOutcome] {
        match self {
            Self::Judged { outcomes, .. } => outcomes,
            _ => &[],
        }
    }

    pub fn first_failure(&self) -> Option<&CaseOutcome> {
        match self {
            Self::Judged { outcomes, summary } => summary.first_failure.map(|i| &outcomes[i]),
            _ => None,
        }
    }

    /// `(expected, actual)` of the first failing case, only if that case is a wrong answer.
    pub fn diff_target(&self) -> Option<(&Path, &Path)> {
        match &self.first_failure()?.result {
            CaseResult::WrongAnswer { actual, expected } => {
                Some((expected.as_path(), actual.as_path()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::testcase::CaseId;

    fn outcome(n: u32, result: CaseResult) -> CaseOutcome {
        CaseOutcome {
            case: TestCase {
                id: CaseId::Numbered(n),
                input: format!("{}.in", n).into(),
                answer: format!("{}.ans", n).into(),
                output: format!("{}.out", n).into(),
            },
            result,
            execution_time: Some(Duration::from_millis(1)),
        }
    }

    fn wa(n: u32) -> CaseResult {
        CaseResult::WrongAnswer {
            actual: format!("{}.out", n).into(),
            expected: format!("{}.ans", n).into(),
        }
    }

    fn re() -> CaseResult {
        CaseResult::RuntimeError {
            exit_code: Some(1),
            diagnostic: "boom".into(),
        }
    }

    #[test]
    fn summary_of_ac_wa_ac() {
        let report = TestReport::judged(vec![
            outcome(1, CaseResult::Accepted),
            outcome(2, wa(2)),
            outcome(3, CaseResult::Accepted),
        ]);
        let TestReport::Judged { summary, .. } = &report else {
            panic!("unexpected report: {:?}", report)
        };

        assert_eq!(summary.count(Verdict::AC), 2);
        assert_eq!(summary.count(Verdict::WA), 1);
        assert_eq!(summary.count(Verdict::RE), 0);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.first_failure, Some(1));
        assert!(!report.is_all_accepted());

        assert_eq!(report.first_failure().unwrap().case.id, CaseId::Numbered(2));
        assert_eq!(
            report.diff_target(),
            Some((Path::new("2.ans"), Path::new("2.out")))
        );
    }

    #[test]
    fn all_accepted() {
        let report = TestReport::judged(vec![
            outcome(1, CaseResult::Accepted),
            outcome(2, CaseResult::Accepted),
        ]);
        assert!(report.is_all_accepted());
        assert_eq!(report.first_failure(), None);
        assert_eq!(report.diff_target(), None);
    }

    #[test]
    fn empty_or_compile_error_is_never_accepted() {
        assert!(!TestReport::judged(vec![]).is_all_accepted());
        assert!(!TestReport::CompileError {
            diagnostic: "error".into()
        }
        .is_all_accepted());
    }

    #[test]
    fn diff_is_offered_only_for_wrong_answer() {
        let report = TestReport::judged(vec![
            outcome(1, CaseResult::Accepted),
            outcome(2, re()),
            outcome(3, wa(3)),
        ]);
        assert_eq!(report.first_failure().unwrap().verdict(), Verdict::RE);
        assert_eq!(report.diff_target(), None);
    }

    #[test]
    fn skipped_case_is_not_a_failure_but_breaks_all_accepted() {
        let report = TestReport::judged(vec![
            outcome(1, CaseResult::Accepted),
            outcome(
                2,
                CaseResult::Skipped {
                    missing: "2.ans".into(),
                },
            ),
        ]);
        let TestReport::Judged { summary, .. } = &report else {
            panic!("unexpected report: {:?}", report)
        };
        assert_eq!(summary.count(Verdict::SKIP), 1);
        assert_eq!(summary.first_failure, None);
        assert!(!report.is_all_accepted());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = TestReport::judged(vec![outcome(
            7,
            CaseResult::TimeLimitExceeded {
                limit: Duration::from_secs(2),
            },
        )]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "judged");
        assert_eq!(json["outcomes"][0]["case"]["id"], 7);
        assert_eq!(json["outcomes"][0]["result"]["kind"], "timeLimitExceeded");
        assert_eq!(json["summary"]["counts"]["TLE"], 1);
        assert_eq!(json["summary"]["firstFailure"], 0);
    }
}
