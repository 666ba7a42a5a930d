pub mod init;
pub mod root;
pub mod test;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Directory to start searching for `oitest.toml` from (default: current dir)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),
    Root(root::Args),

    #[command(alias("t"))]
    Test(test::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Root(args) => root::exec(args, self),
            Test(args) => test::exec(args, self).await,
        }
    }

    pub fn search_dir(&self) -> PathBuf {
        self.project_dir
            .clone()
            .unwrap_or_else(crate::util::current_dir)
    }
}
