use anyhow::{bail, Result};
use gno_sync_examples::cache::{destroy, refresh, MAIN_REPO_URL};
use gno_sync_examples::config::{Config, Overrides};
use gno_sync_examples::gnomod::read_module_path;
use crate::cli::{SyncCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    let overrides = Overrides {
        cache_dir: cli.cache_dir,
        skip_fetch: cli.skip_fetch,
        config_path: cli.config,
    };
    let config = Config::resolve(&overrides)?;
    log::debug!("resolved {:?}", config);
    match cli.command {
        SyncCommand::Info { project_dir } => {
            execute_info(&config, &project_dir)
        }
        SyncCommand::Push => {
            execute_push(&config)
        }
        SyncCommand::Pull => {
            execute_pull(&config)
        }
        SyncCommand::Clean => {
            execute_clean(&config)
        }
    }
}

pub fn execute_info(config: &Config, project_dir: &str) -> Result<()> {
    println!("projectDir: {:?}", project_dir);
    let module_path = read_module_path(project_dir)?;
    println!("modulePath: {:?}", module_path);
    refresh(config, MAIN_REPO_URL)?;
    Ok(())
}

pub fn execute_push(_config: &Config) -> Result<()> {
    bail!("push: not implemented")
}

pub fn execute_pull(config: &Config) -> Result<()> {
    // the cache is refreshed even though nothing is copied out of it yet
    refresh(config, MAIN_REPO_URL)?;
    bail!("pull: not implemented")
}

pub fn execute_clean(config: &Config) -> Result<()> {
    destroy(&config.cache_dir)
}
