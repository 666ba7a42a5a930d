use std::path::PathBuf;

use oitest_core::{
    action,
    config::OpenDiff,
    interactive,
    testing::{TestPipeline, TestReport},
    Config,
};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

/// Compile the solution and judge it against its testcases
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Source file, problem folder, or problem id (default: latest source file in current dir)
    #[arg()] // positional argument
    pub target: Option<PathBuf>,

    /// Override `language` of oitest.toml
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Override `test.timeLimitMs` of oitest.toml
    #[arg(short = 't', long, value_name = "MS")]
    pub time_limit: Option<u64>,

    /// Print the result as JSON instead of the human-readable report
    #[arg(long)]
    pub json: bool,

    /// Open `diffCommand` for the first wrong answer without asking
    #[arg(long, conflicts_with = "no_diff")]
    pub diff: bool,

    /// Never open `diffCommand`
    #[arg(long)]
    pub no_diff: bool,
}

impl Args {
    fn open_diff_policy(&self, cfg: &Config) -> OpenDiff {
        if self.diff {
            OpenDiff::Always
        } else if self.no_diff || self.json {
            OpenDiff::Never
        } else {
            cfg.test.open_diff
        }
    }
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut cfg = Config::from_file_finding_in_ancestors(global_args.search_dir())?;
    if let Some(lang) = &args.lang {
        cfg.language = lang.clone();
    }
    if let Some(ms) = args.time_limit {
        cfg.test.time_limit_ms = ms;
    }
    let lang = cfg.language()?;

    let problem =
        util::determine_problem(args.target.as_deref(), &cfg, lang, &util::current_dir())?;

    let report = if args.json {
        let report = TestPipeline::from_config(&cfg)?
            .run(&problem, &mut ())
            .await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        report
    } else {
        action::do_test(&problem, &cfg).await?
    };

    maybe_open_diff(&report, args.open_diff_policy(&cfg), &cfg.diff_command).await?;

    if !report.is_all_accepted() {
        std::process::exit(1);
    }
    Ok(())
}

async fn maybe_open_diff(report: &TestReport, policy: OpenDiff, diff_command: &str) -> SubcmdResult {
    let Some((expected, actual)) = report.diff_target() else {
        return Ok(())
    };
    let open = match policy {
        OpenDiff::Always => true,
        OpenDiff::Never => false,
        OpenDiff::Ask => interactive::ask_confirm("Show diff of the first wrong answer?", false)
            .unwrap_or_else(|e| {
                log::debug!("Cannot ask: {}", e);
                false
            }),
    };
    if open {
        action::open_diff(diff_command, expected, actual).await?;
    }
    Ok(())
}
