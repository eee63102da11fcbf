//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "capgate";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

impl EnvResolver for StdEnvResolver {
    fn home_dir_from_env(&self) -> Option<HomeDir> {
        non_empty_var("CAPGATE_HOME").map(HomeDir::new)
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if let Some(home) = self.home_dir_from_env() {
            return Ok(dirs_for_home(&home));
        }

        let home = non_empty_var("HOME");
        let config_base = non_empty_var("XDG_CONFIG_HOME")
            .or_else(|| home.as_ref().map(|h| h.join(".config")))
            .ok_or_else(|| Error::env("HOME is not set"))?;
        let state_base = non_empty_var("XDG_STATE_HOME")
            .or_else(|| home.as_ref().map(|h| h.join(".local/state")))
            .ok_or_else(|| Error::env("HOME is not set"))?;

        Ok(Dirs {
            config_dir: config_base.join(APP_DIR),
            state_dir: state_base.join(APP_DIR),
        })
    }
}

/// CAPGATE_HOME 配下の config / state
pub fn dirs_for_home(home: &HomeDir) -> Dirs {
    Dirs {
        config_dir: home.join("config"),
        state_dir: home.join("state"),
    }
}
