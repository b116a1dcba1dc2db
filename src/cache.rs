use std::ffi::OsStr;
use std::path::Path;
use anyhow::{Context, Result};
use crate::config::Config;
use crate::util::run_command;

/// Upstream repository the cache mirrors.
pub const MAIN_REPO_URL: &str = "https://github.com/gnolang/gno.git";

/// What a cache refresh ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheRefresh {
    /// Fetching was disabled, nothing was touched.
    Skipped,
    /// The cache directory did not exist and was cloned.
    Cloned,
    /// The cache directory existed and was pulled.
    Pulled,
}

/// Makes sure `cache_dir` holds an up-to-date working copy of `remote_url`.
///
/// Clones when the directory is absent, otherwise runs `git pull` inside it.
/// git's own output goes straight to our stdout/stderr. There is no retry.
///
/// # Errors
/// Returns an error if the clone or pull fails for any reason.
pub fn ensure_fresh<P: AsRef<Path>>(cache_dir: P, remote_url: &str) -> Result<CacheRefresh> {
    let cache_dir = cache_dir.as_ref();
    let exists = cache_dir.try_exists()
        .with_context(|| format!("Could not inspect cache dir {}", cache_dir.display()))?;
    if !exists {
        log::info!("cloning {} into {}", remote_url, cache_dir.display());
        run_command("git", [
            OsStr::new("clone"),
            OsStr::new("--"),
            OsStr::new(remote_url),
            cache_dir.as_os_str(),
        ]).context("Failed to clone repo")?;
        Ok(CacheRefresh::Cloned)
    }
    else {
        log::info!("pulling {}", cache_dir.display());
        run_command("git", [
            OsStr::new("-C"),
            cache_dir.as_os_str(),
            OsStr::new("pull"),
        ]).context("Failed to pull repo")?;
        Ok(CacheRefresh::Pulled)
    }
}

/// Refreshes the configured cache unless `skip_fetch` is set.
///
/// With `skip_fetch` the filesystem is not inspected and no process is spawned.
pub fn refresh(config: &Config, remote_url: &str) -> Result<CacheRefresh> {
    if config.skip_fetch {
        log::debug!("skipping fetch of {}", remote_url);
        return Ok(CacheRefresh::Skipped);
    }
    ensure_fresh(&config.cache_dir, remote_url)
}

/// Removes the cache directory and everything in it.
///
/// A path that is already gone counts as success; a plain file or symlink in
/// its place is removed as well.
///
/// # Errors
/// Returns an error, wrapped with context, if the path can't be removed.
pub fn destroy<P: AsRef<Path>>(cache_dir: P) -> Result<()> {
    let cache_dir = cache_dir.as_ref();
    let removed = match std::fs::symlink_metadata(cache_dir) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(cache_dir),
        Ok(_) => std::fs::remove_file(cache_dir),
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => {
            log::debug!("removed {}", cache_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| {
            format!("Failed to clean main repo dir {}", cache_dir.display())
        }),
    }
}
