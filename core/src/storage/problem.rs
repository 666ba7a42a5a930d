use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::lang::Language;

/// One problem folder: `<workFolder>/<id>/` holding `<id>.<ext>` and its fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    id: String,
    language: Language,
    dir: PathBuf,
    source: PathBuf,
    artifact: PathBuf,
}

impl Problem {
    pub const INPUT_EXT: &str = "in";
    pub const ANSWER_EXT: &str = "ans";
    pub const OUTPUT_EXT: &str = "out";

    pub fn new(id: impl Into<String>, dir: impl Into<PathBuf>, language: Language) -> Self {
        let id = id.into();
        let dir = dir.into();
        let source = dir.join(format!("{}.{}", id, language.source_extension()));
        Self::with_source(id, dir, source, language)
    }

    fn with_source(id: String, dir: PathBuf, source: PathBuf, language: Language) -> Self {
        let artifact = dir.join(format!("{}.{}", id, language.artifact_extension()));
        Self {
            id,
            language,
            dir,
            source,
            artifact,
        }
    }

    /// Resolves `<root>/<workFolder>/<id>/<id>.<ext>` and checks that each level exists.
    pub fn locate(cfg: &Config, id: &str, language: Language) -> Result<Self> {
        let work_dir = cfg.work_dir();
        if !work_dir.is_dir() {
            return Err(Error::WorkFolderNotFound(work_dir));
        }
        let problem = Self::new(id, work_dir.join(id), language);
        problem.ensure_exists()?;
        Ok(problem)
    }

    /// Uses the source file's stem as the problem id and its parent as the problem folder.
    pub fn from_source_file(path: impl AsRef<Path>, language: Language) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.to_owned()));
        }
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::SourceNotFound(path.to_owned()))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_owned(),
            _ => PathBuf::from("."),
        };
        let problem = Self::with_source(id, dir, path.to_owned(), language);
        problem.ensure_exists()?;
        Ok(problem)
    }

    pub fn ensure_exists(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(Error::ProblemFolderNotFound(self.dir.clone()));
        }
        if !self.source.is_file() {
            return Err(Error::SourceNotFound(self.source.clone()));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Path of `<stem>.<ext>` inside the problem folder.
    pub fn fixture_path(&self, stem: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", stem, ext))
    }
}
