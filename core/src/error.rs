use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures detected before any process is spawned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not in an oitest project: cannot find '{0}' in current dir or its ancestors")]
    NotInProject(&'static str),

    #[error("Work folder not found: {0}")]
    WorkFolderNotFound(PathBuf),

    #[error("Problem folder not found: {0}")]
    ProblemFolderNotFound(PathBuf),

    #[error("Problem file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Language not supported: '{0}' (supported: {})", crate::lang::supported_list())]
    LanguageNotSupported(String),
}
