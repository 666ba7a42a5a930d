use oitest_core::{action, print_success};
use std::path::PathBuf;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

/// Create `oitest.toml` with the default settings
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    action::init_project(&args.dir)?;
    print_success!(
        "Successfully initialized oitest project. (path: {})",
        util::replace_homedir_to_tilde(&args.dir).to_string_lossy()
    );
    Ok(())
}
