use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use lazy_regex::regex_captures;
use serde::Serialize;

use crate::storage::Problem;

/// Identifies a testcase inside a problem folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CaseId {
    /// `<N>.in` / `<N>.ans`
    Numbered(u32),
    /// `<problemID>.in` / `<problemID>.ans`
    Legacy(String),
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "#{}", n),
            Self::Legacy(id) => write!(f, "{}", id),
        }
    }
}

impl Ord for CaseId {
    fn cmp(&self, other: &Self) -> Ordering {
        use CaseId::*;
        match (self, other) {
            (Numbered(a), Numbered(b)) => a.cmp(b),
            (Legacy(a), Legacy(b)) => a.cmp(b),
            (Legacy(_), Numbered(_)) => Ordering::Less,
            (Numbered(_), Legacy(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for CaseId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub id: CaseId,
    pub input: PathBuf,
    pub answer: PathBuf,
    pub output: PathBuf,
}

impl TestCase {
    pub fn new(problem: &Problem, id: CaseId) -> Self {
        let stem = match &id {
            CaseId::Numbered(n) => n.to_string(),
            CaseId::Legacy(s) => s.clone(),
        };
        Self {
            input: problem.fixture_path(&stem, Problem::INPUT_EXT),
            answer: problem.fixture_path(&stem, Problem::ANSWER_EXT),
            output: problem.fixture_path(&stem, Problem::OUTPUT_EXT),
            id,
        }
    }

    /// Returns the first fixture this testcase needs that does not exist.
    pub fn missing_fixture(&self) -> Option<&Path> {
        [&self.input, &self.answer]
            .into_iter()
            .find(|p| !p.is_file())
            .map(PathBuf::as_path)
    }

    /// Numbered testcases of the problem, or the single legacy `<problemID>.in` testcase
    /// when the folder has no numbered ones.
    pub fn enumerate(problem: &Problem) -> fsutil::Result<Vec<Self>> {
        let ids = discover_case_ids(problem.dir())?;
        if !ids.is_empty() {
            return Ok(ids
                .into_iter()
                .map(|n| Self::new(problem, CaseId::Numbered(n)))
                .collect());
        }

        let legacy = Self::new(problem, CaseId::Legacy(problem.id().to_owned()));
        if legacy.input.is_file() {
            log::debug!("Using legacy testcase {}", legacy.input.to_string_lossy());
            Ok(vec![legacy])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Numbers `N` of every `<N>.in` file in `dir`, in numeric order.
pub fn discover_case_ids(dir: impl AsRef<Path>) -> fsutil::Result<Vec<u32>> {
    let mut ids = BTreeSet::new();

    for entry in fsutil::read_dir(&dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.as_ref().to_string_lossy(), e);
                continue;
            }
        };
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                log::warn!("Skipping {}: {}", entry.path().to_string_lossy(), e);
                continue;
            }
        };
        if ft.is_dir() {
            continue;
        }
        let filename = entry.file_name();
        let filename = filename.to_string_lossy();
        let Some((_, digits)) = regex_captures!(r"^(\d+)\.in$", &*filename) else {
            continue
        };
        match digits.parse::<u32>() {
            Ok(n) => {
                ids.insert(n);
            }
            Err(e) => log::warn!("Ignoring testcase '{}': {}", filename, e),
        }
    }

    log::debug!(
        "Found {} testcase(s) in {}",
        ids.len(),
        dir.as_ref().to_string_lossy()
    );
    Ok(ids.into_iter().collect())
}
