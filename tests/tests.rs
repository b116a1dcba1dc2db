use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use gno_sync_examples::*;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

/// Builds an origin repository with an `examples/` tree and a gno.mod, the way
/// the main repository lays them out.
fn setup_tests() -> TempDir {
    let origin = TempDir::new().unwrap();
    let example = origin.path().join("examples").join("gno.land").join("p").join("demo").join("avl");
    std::fs::create_dir_all(&example).unwrap();
    std::fs::write(example.join("gno.mod"), "module gno.land/p/demo/avl\n").unwrap();
    std::fs::write(example.join("avl.gno"), "package avl\n").unwrap();
    git(origin.path(), &["init", "-q"]);
    git(origin.path(), &["add", "."]);
    git(origin.path(), &[
        "-c", "user.name=test", "-c", "user.email=test@example.com",
        "commit", "-q", "-m", "examples",
    ]);
    origin
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_clone_read_and_clean() {
        if !git_available() {
            return;
        }
        let origin = setup_tests();
        let url = origin.path().to_string_lossy().to_string();
        let work = TempDir::new().unwrap();
        let config = Config {
            cache_dir: work.path().join("gno-main-repo"),
            skip_fetch: false,
        };

        assert_eq!(refresh(&config, &url).unwrap(), CacheRefresh::Cloned);
        assert!(config.cache_dir.join(".git").exists());

        let example = config.cache_dir.join("examples/gno.land/p/demo/avl");
        assert_eq!(read_module_path(&example).unwrap(), "gno.land/p/demo/avl");

        // new upstream commit reaches the cache on the next refresh
        std::fs::write(origin.path().join("examples").join("README.md"), "examples\n").unwrap();
        git(origin.path(), &["add", "."]);
        git(origin.path(), &[
            "-c", "user.name=test", "-c", "user.email=test@example.com",
            "commit", "-q", "-m", "readme",
        ]);
        assert_eq!(refresh(&config, &url).unwrap(), CacheRefresh::Pulled);
        assert!(config.cache_dir.join("examples").join("README.md").exists());

        destroy(&config.cache_dir).unwrap();
        assert!(!config.cache_dir.exists());
        destroy(&config.cache_dir).unwrap();
    }

    #[test]
    fn test_skip_fetch_never_touches_cache() {
        let work = TempDir::new().unwrap();
        let config = Config {
            cache_dir: work.path().join("gno-main-repo"),
            skip_fetch: true,
        };
        assert_eq!(refresh(&config, MAIN_REPO_URL).unwrap(), CacheRefresh::Skipped);
        assert!(!config.cache_dir.exists());

        std::fs::create_dir_all(&config.cache_dir).unwrap();
        assert_eq!(refresh(&config, MAIN_REPO_URL).unwrap(), CacheRefresh::Skipped);
        assert!(!config.cache_dir.join(".git").exists());
    }

    #[test]
    fn test_cache_dir_home_expansion() {
        let overrides = Overrides {
            cache_dir: Some("~/x".to_string()),
            ..Overrides::default()
        };
        let config = Config::merge(&overrides, FileConfig::default()).unwrap();
        assert_eq!(config.cache_dir, home_dir().unwrap().join("x"));
    }
}
