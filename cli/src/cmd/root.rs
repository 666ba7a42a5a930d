use super::{GlobalArgs, SubcmdResult};

/// Print the project root (the directory containing `oitest.toml`)
#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = oitest_core::Config::from_file_finding_in_ancestors(global_args.search_dir())?;
    println!(
        "{}",
        cfg.source_config_dir.canonicalize()?.to_string_lossy()
    );
    Ok(())
}
