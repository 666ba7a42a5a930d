use std::{
    path::{Path, PathBuf},
    process::exit,
};

use anyhow::Context as _;
use oitest_core::{storage::Problem, Config, Language};

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// `target` may be a source file, a problem folder, or a problem id under `workFolder`.
/// Without `target`, the most recently modified source file in `cwd` is used.
pub fn determine_problem(
    target: Option<&Path>,
    cfg: &Config,
    lang: Language,
    cwd: &Path,
) -> anyhow::Result<Problem> {
    let pattern = lang.source_file_pattern();
    let source = match target {
        Some(path) if path.is_file() => path.to_owned(),
        Some(dir) if dir.is_dir() => fsutil::find_most_recently_modified_file(dir, &pattern)
            .context("Cannot determine the problem file")?,
        Some(id) => return Ok(Problem::locate(cfg, &id.to_string_lossy(), lang)?),
        None => fsutil::find_most_recently_modified_file(cwd, &pattern)
            .context("Cannot determine the problem file")?,
    };
    Ok(Problem::from_source_file(source, lang)?)
}
