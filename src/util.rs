use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;

/// Returns the home directory of the invoking user.
///
/// # Errors
/// Returns an error if the platform cannot report a home directory.
pub fn home_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| anyhow!("Failed to get current user's home directory"))?;
    Ok(base_dirs.home_dir().to_path_buf())
}

/// Expands a leading `~` in `path` to the invoking user's home directory.
///
/// # Errors
/// Returns an error if the home directory is unknown.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let home = home_dir()?;
    Ok(expand_home_with(path, &home))
}

/// Same as [`expand_home`] but with an explicit home directory.
///
/// `~user` forms are not expanded.
pub fn expand_home_with(path: &str, home: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde_with_context(path, || Some(home.to_string_lossy())).into_owned())
}

/// Runs `program` with `args`, passing stdout and stderr straight through to ours,
/// and waits for it to finish.
///
/// # Errors
/// Returns an error if the process cannot be spawned or exits unsuccessfully.
pub fn run_command<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    log::debug!("running {:?}", cmd);
    let status = cmd.status()
        .with_context(|| format!("Could not start `{}`", program))?;
    if !status.success() {
        bail!("`{}` failed: {}", program, status);
    }
    Ok(())
}

/// Checks whether a working `git` executable is on the `PATH`.
#[cfg(test)]
pub(crate) fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
