use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error::{Error, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[strum(to_string = "cpp", serialize = "c++")]
    Cpp,
}

impl Language {
    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| Error::LanguageNotSupported(s.to_owned()))
    }

    pub fn source_extension(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
        }
    }

    pub fn artifact_extension(self) -> &'static str {
        match self {
            Language::Cpp => "exe",
        }
    }

    pub fn source_file_pattern(self) -> glob::Pattern {
        glob::Pattern::new(&format!("*.{}", self.source_extension()))
            .expect("extension must be a valid glob")
    }
}

pub(crate) fn supported_list() -> String {
    Language::iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_ok() {
        assert_eq!(Language::parse("cpp").unwrap(), Language::Cpp);
        assert_eq!(Language::parse("C++").unwrap(), Language::Cpp);
        assert_eq!(Language::parse(" cpp ").unwrap(), Language::Cpp);
        assert_eq!(Language::Cpp.to_string(), "cpp");
    }

    #[test]
    fn parse_ng() {
        let err = Language::parse("python").unwrap_err();
        assert!(matches!(&err, Error::LanguageNotSupported(s) if s == "python"));
        assert_eq!(
            err.to_string(),
            "Language not supported: 'python' (supported: cpp)"
        );
    }

    #[test]
    fn source_file_pattern_matches_extension() {
        let pat = Language::Cpp.source_file_pattern();
        assert!(pat.matches("P1001.cpp"));
        assert!(!pat.matches("P1001.in"));
    }
}
