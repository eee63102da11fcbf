//! platform.json で権限・ロールの状態を持つ擬似プラットフォーム
//!
//! 端末上でパイプラインを動かすためのもの。起動時に読み込み、問い合わせはメモリ上の
//! スナップショットに答える。システムダイアログの回答（GrantRecorder）はファイルへ書き戻す。

use crate::ports::outbound::{GrantPlatform, GrantRecorder, PermissionState};
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn default_level() -> u32 {
    34
}

fn default_available_roles() -> Vec<String> {
    vec!["call_screening".to_string()]
}

/// platform.json のスキーマ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFile {
    #[serde(default = "default_level")]
    pub level: u32,
    /// 記載の無い権限は Denied
    #[serde(default)]
    pub permissions: BTreeMap<String, PermissionState>,
    #[serde(default = "default_available_roles")]
    pub available_roles: Vec<String>,
    #[serde(default)]
    pub held_roles: Vec<String>,
}

impl Default for PlatformFile {
    fn default() -> Self {
        Self {
            level: default_level(),
            permissions: BTreeMap::new(),
            available_roles: default_available_roles(),
            held_roles: Vec::new(),
        }
    }
}

pub struct FileGrantPlatform {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    state: Mutex<PlatformFile>,
}

impl FileGrantPlatform {
    /// ファイルが無ければ既定値で始める（初回の書き戻しで作成される）
    pub fn load(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let state = if fs.exists(&path) {
            let s = fs.read_to_string(&path)?;
            serde_json::from_str(&s)
                .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))?
        } else {
            PlatformFile::default()
        };
        Ok(Self {
            fs,
            path,
            state: Mutex::new(state),
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&PlatformFile) -> T) -> T {
        let guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn update(&self, f: impl FnOnce(&mut PlatformFile)) -> Result<(), Error> {
        let json = {
            let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut guard);
            serde_json::to_string_pretty(&*guard)?
        };
        self.fs.write_atomic(&self.path, &json)
    }
}

impl GrantPlatform for FileGrantPlatform {
    fn level(&self) -> u32 {
        self.with_state(|s| s.level)
    }

    fn permission_state(&self, permission: &str) -> PermissionState {
        self.with_state(|s| s.permissions.get(permission).copied().unwrap_or_default())
    }

    fn is_role_available(&self, role: &str) -> bool {
        self.with_state(|s| s.available_roles.iter().any(|r| r == role))
    }

    fn is_role_held(&self, role: &str) -> bool {
        self.with_state(|s| s.held_roles.iter().any(|r| r == role))
    }
}

impl GrantRecorder for FileGrantPlatform {
    fn record_permission(&self, permission: &str, granted: bool) -> Result<(), Error> {
        let state = if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        self.update(|s| {
            s.permissions.insert(permission.to_string(), state);
        })
    }

    fn record_role(&self, role: &str, held: bool) -> Result<(), Error> {
        self.update(|s| {
            s.held_roles.retain(|r| r != role);
            if held {
                s.held_roles.push(role.to_string());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let p = FileGrantPlatform::load(Arc::new(StdFileSystem), dir.path().join("platform.json"))
            .unwrap();
        assert_eq!(p.level(), 34);
        assert_eq!(p.permission_state("READ_CALL_LOG"), PermissionState::Denied);
        assert!(p.is_role_available("call_screening"));
        assert!(!p.is_role_held("call_screening"));
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("platform.json");
        std::fs::write(
            &path,
            r#"{"level": 28, "permissions": {"A": "granted", "B": "denied_permanently"}, "available_roles": []}"#,
        )
        .unwrap();
        let p = FileGrantPlatform::load(Arc::new(StdFileSystem), &path).unwrap();
        assert_eq!(p.level(), 28);
        assert_eq!(p.permission_state("A"), PermissionState::Granted);
        assert_eq!(p.permission_state("B"), PermissionState::DeniedPermanently);
        assert!(!p.is_role_available("call_screening"));
    }

    #[test]
    fn test_recorded_answers_are_written_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state/platform.json");
        let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
        let p = FileGrantPlatform::load(Arc::clone(&fs), &path).unwrap();
        p.record_permission("A", true).unwrap();
        p.record_role("call_screening", true).unwrap();
        p.record_role("call_screening", true).unwrap();
        assert_eq!(p.permission_state("A"), PermissionState::Granted);

        let reloaded = FileGrantPlatform::load(fs, &path).unwrap();
        assert_eq!(reloaded.permission_state("A"), PermissionState::Granted);
        assert!(reloaded.is_role_held("call_screening"));
        assert_eq!(reloaded.with_state(|s| s.held_roles.len()), 1);
    }
}
