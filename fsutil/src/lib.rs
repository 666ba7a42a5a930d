use std::{
    fs::{self, File, ReadDir},
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("No entry matched glob '{0}' in '{1}'")]
        NoEntryMatchedGlob(::glob::Pattern, PathBuf),
    }

    impl Error {
        pub fn path(&self) -> &std::path::Path {
            match self {
                Self::SingleIO(_, path, _) | Self::NoEntryMatchedGlob(_, path) => path,
            }
        }
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read(filepath: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(&filepath).map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

/// Opens an existing file for reading.
#[must_use]
pub fn open_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot open file", filepath.as_ref().to_owned(), e))
}

/// Creates a file for writing, truncating any previous contents.
#[must_use]
pub fn create_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::create(&filepath)
        .map_err(|e| Error::SingleIO("Cannot create file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    fs::remove_file(&filepath)
        .map_err(|e| Error::SingleIO("Cannot remove file", filepath.as_ref().to_owned(), e))
}

/// Same as [`remove_file`], but a missing file is not an error.
/// Returns whether a file was actually removed.
#[must_use]
pub fn remove_file_if_exists(filepath: impl AsRef<Path>) -> Result<bool> {
    match fs::remove_file(&filepath) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::SingleIO(
            "Cannot remove file",
            filepath.as_ref().to_owned(),
            e,
        )),
    }
}

#[must_use]
pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

pub fn find_most_recently_modified_file(
    dir: impl AsRef<Path>,
    filename_pattern: &::glob::Pattern,
) -> Result<PathBuf> {
    let mut ans_filepath = None;
    let mut max_modified = SystemTime::UNIX_EPOCH;

    for entry in self::read_dir(&dir)?.filter_map(std::result::Result::ok) {
        let file_type = entry.file_type();
        let modified = entry.metadata().and_then(|info| info.modified());
        let (Ok(file_type), Ok(modified)) = (file_type, modified) else {
            continue
        };
        if file_type.is_dir() {
            continue;
        }
        let filename = entry.file_name();
        if filename_pattern.matches(filename.to_string_lossy().as_ref())
            && (ans_filepath.is_none() || max_modified < modified)
        {
            max_modified = modified;
            ans_filepath = Some(entry.path());
        }
    }
    match ans_filepath {
        Some(filepath) => Ok(filepath),
        None => Err(self::Error::NoEntryMatchedGlob(
            filename_pattern.to_owned(),
            dir.as_ref().to_owned(),
        )),
    }
}
