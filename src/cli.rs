use std::path::PathBuf;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct CLI {
    /// Skip cloning/pulling the main repository (`--skip-fetch=false` turns it back off)
    #[clap(
        long,
        global = true,
        env = "GNO_SYNC_SKIP_FETCH",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub(crate) skip_fetch: Option<bool>,
    /// Main repository cache directory [default: ~/gno/cache/gno-main-repo]
    #[clap(long, global = true, env = "GNO_SYNC_CACHE_DIR", value_name = "PATH")]
    pub(crate) cache_dir: Option<String>,
    /// Read settings from this file instead of the default config.toml
    #[clap(long, global = true, env = "GNO_SYNC_CONFIG", value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: SyncCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum SyncCommand {
    /// Print the project directory and its gno.mod module path, then refresh the cache
    Info {
        /// Project directory containing `gno.mod`
        #[clap(default_value = ".")]
        project_dir: String,
    },
    /// Push examples to the main repository (unimplemented!)
    Push,
    /// Refresh the cache, then pull examples from it (unimplemented!)
    Pull,
    /// Remove the main repository cache directory
    Clean,
}
