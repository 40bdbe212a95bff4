//! 標準環境変数解決実装（std::env を委譲）

use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const PROFILES_FILENAME: &str = "profiles.json";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl StdEnvResolver {
    fn non_empty_var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }
}

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<PathBuf, Error> {
        if let Some(home) = Self::non_empty_var("KWGEN_HOME") {
            return Ok(PathBuf::from(home));
        }

        let config_base = Self::non_empty_var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| Self::non_empty_var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok_or_else(|| Error::env("HOME is not set"))?;

        Ok(config_base.join("kwgen"))
    }

    fn resolve_data_dir(&self) -> Result<PathBuf, Error> {
        if let Some(data) = Self::non_empty_var("KWGEN_DATA") {
            return Ok(PathBuf::from(data));
        }

        let data_base = Self::non_empty_var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                Self::non_empty_var("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
            .ok_or_else(|| Error::env("HOME is not set"))?;

        Ok(data_base.join("kwgen"))
    }

    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.join(PROFILES_FILENAME))
    }

    fn var(&self, name: &str) -> Option<String> {
        Self::non_empty_var(name)
    }

    fn set_var(&self, name: &str, value: &str) {
        env::set_var(name, value);
    }
}
