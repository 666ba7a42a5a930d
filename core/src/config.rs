use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::Error;
use crate::lang::Language;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Directory containing the config file. Relative paths in the config are resolved from here.
    #[serde(skip)]
    pub source_config_dir: PathBuf,
    pub work_folder: PathBuf,
    pub language: String,
    pub diff_command: String,
    pub test: TestConfig,
    pub compiler: CompilerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestConfig {
    pub time_limit_ms: u64,
    pub compile_time_limit_ms: u64,
    pub open_diff: OpenDiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenDiff {
    Ask,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    pub cpp: ToolchainConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainConfig {
    pub program: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_config_dir: PathBuf::from("."),
            work_folder: PathBuf::from("problems"),
            language: Language::Cpp.to_string(),
            diff_command: "diff".to_owned(),
            test: TestConfig::default(),
            compiler: CompilerConfig::default(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 2000,
            compile_time_limit_ms: 30_000,
            open_diff: OpenDiff::Ask,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            cpp: ToolchainConfig {
                program: "g++".to_owned(),
                flags: vec!["-O2".to_owned()],
            },
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "oitest.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_dir = filepath
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> StdResult<PathBuf, Error> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .ok_or(Error::NotInProject(Self::FILENAME))
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }

    /// Absolute (or root-relative) path of the directory holding the problem folders.
    pub fn work_dir(&self) -> PathBuf {
        self.source_config_dir.join(&self.work_folder)
    }

    pub fn language(&self) -> StdResult<Language, Error> {
        Language::parse(&self.language)
    }
}

impl TestConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    pub fn compile_time_limit(&self) -> Duration {
        Duration::from_millis(self.compile_time_limit_ms)
    }
}

impl CompilerConfig {
    pub fn toolchain(&self, lang: Language) -> &ToolchainConfig {
        match lang {
            Language::Cpp => &self.cpp,
        }
    }
}
