use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use crate::util::expand_home;

/// Cache directory used when neither a flag nor the config file names one.
pub const DEFAULT_CACHE_DIR: &str = "~/gno/cache/gno-main-repo";
/// File name of the config file inside the global config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Settings shared by every subcommand, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the main repository working copy lives, with `~` already expanded.
    pub cache_dir: PathBuf,
    /// Skip cloning/pulling the main repository.
    pub skip_fetch: bool,
}

/// Contents of the optional `config.toml` file. Every key may be omitted.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub cache_dir: Option<String>,
    pub skip_fetch: Option<bool>,
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub cache_dir: Option<String>,
    pub skip_fetch: Option<bool>,
    pub config_path: Option<PathBuf>,
}

impl FileConfig {
    /// Loads a `FileConfig` from a file path.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }
    /// Loads the config file from the global config directory, or the default
    /// (empty) config when that file does not exist.
    pub fn load_default() -> Result<FileConfig> {
        let path = get_global_config_dir()?.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Ok(FileConfig::default());
        }
        log::debug!("using config file {}", path.display());
        FileConfig::load(path)
    }
}

impl Config {
    /// Resolves the effective configuration from command-line overrides and the
    /// config file. Flags win over the file, the file wins over built-in defaults.
    ///
    /// # Errors
    /// Returns an error if an explicitly named config file is missing, any config
    /// file is malformed, or the home directory is needed but unknown.
    pub fn resolve(overrides: &Overrides) -> Result<Config> {
        let file = match &overrides.config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::load_default()?,
        };
        Config::merge(overrides, file)
    }

    /// Combines overrides and an already loaded config file.
    pub fn merge(overrides: &Overrides, file: FileConfig) -> Result<Config> {
        let raw_dir = overrides.cache_dir.clone()
            .or(file.cache_dir)
            .unwrap_or_else(|| DEFAULT_CACHE_DIR.to_string());
        let cache_dir = expand_home(&raw_dir)?;
        let skip_fetch = overrides.skip_fetch.or(file.skip_fetch).unwrap_or(false);
        Ok(Config { cache_dir, skip_fetch })
    }
}

/// Returns the platform config directory for this tool.
pub fn get_global_config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("land", "gno", "gno-sync-examples")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::home_dir;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::merge(&Overrides::default(), FileConfig::default()).unwrap();
        assert_eq!(config.cache_dir, home_dir().unwrap().join("gno/cache/gno-main-repo"));
        assert!(!config.skip_fetch);
    }

    #[test]
    fn test_flags_override_file() {
        let overrides = Overrides {
            cache_dir: Some("/tmp/from-flag".to_string()),
            skip_fetch: Some(false),
            config_path: None,
        };
        let file = FileConfig {
            cache_dir: Some("/tmp/from-file".to_string()),
            skip_fetch: Some(true),
        };
        let config = Config::merge(&overrides, file).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/from-flag"));
        assert!(!config.skip_fetch);
    }

    #[test]
    fn test_unset_flag_falls_back_to_file() {
        let file = FileConfig {
            cache_dir: None,
            skip_fetch: Some(true),
        };
        let config = Config::merge(&Overrides::default(), file).unwrap();
        assert!(config.skip_fetch);

        let overrides = Overrides {
            skip_fetch: Some(true),
            ..Overrides::default()
        };
        let config = Config::merge(&overrides, FileConfig::default()).unwrap();
        assert!(config.skip_fetch);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig {
            cache_dir: Some("~/elsewhere".to_string()),
            skip_fetch: None,
        };
        let config = Config::merge(&Overrides::default(), file).unwrap();
        assert_eq!(config.cache_dir, home_dir().unwrap().join("elsewhere"));
        assert!(!config.skip_fetch);
    }

    #[test]
    fn test_resolve_with_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cache_dir = \"/tmp/gno-cache\"\nskip_fetch = true\n").unwrap();
        let overrides = Overrides {
            config_path: Some(path),
            ..Overrides::default()
        };
        let config = Config::resolve(&overrides).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/gno-cache"));
        assert!(config.skip_fetch);
    }

    #[test]
    fn test_resolve_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let overrides = Overrides {
            config_path: Some(dir.path().join("nope.toml")),
            ..Overrides::default()
        };
        let err = Config::resolve(&overrides).unwrap_err();
        assert!(err.to_string().contains("Could not read config file"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "remote = \"https://example.com\"\n").unwrap();
        let err = FileConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Could not parse config file"));
    }
}
