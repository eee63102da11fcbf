//! ゲート設定（gate.json）の読み込み（adapter 層）

use crate::domain::GateConfig;
use crate::ports::outbound::GateConfigLoader;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileGateConfigLoader {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    /// --config で明示されたファイルは存在しなければエラー
    required: bool,
}

impl FileGateConfigLoader {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>, required: bool) -> Self {
        Self {
            fs,
            path: path.into(),
            required,
        }
    }
}

impl GateConfigLoader for FileGateConfigLoader {
    fn load(&self) -> Result<GateConfig, Error> {
        if !self.fs.exists(&self.path) {
            if self.required {
                return Err(Error::invalid_argument(format!(
                    "config file '{}' does not exist",
                    self.path.display()
                )));
            }
            return Ok(GateConfig::default());
        }
        let s = self.fs.read_to_string(&self.path)?;
        let config: GateConfig = serde_json::from_str(&s)
            .map_err(|e| Error::config(format!("{}: {}", self.path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use tempfile::tempdir;

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loader =
            FileGateConfigLoader::new(Arc::new(StdFileSystem), dir.path().join("gate.json"), false);
        assert_eq!(loader.load().unwrap(), GateConfig::default());
    }

    #[test]
    fn test_missing_required_file_is_usage_error() {
        let dir = tempdir().unwrap();
        let loader =
            FileGateConfigLoader::new(Arc::new(StdFileSystem), dir.path().join("gate.json"), true);
        let err = loader.load().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gate.json");
        std::fs::write(&path, r#"{"consent_capability": "screenSms", "permissions": ["READ_SMS"]}"#)
            .unwrap();
        let config = FileGateConfigLoader::new(Arc::new(StdFileSystem), &path, true)
            .load()
            .unwrap();
        assert_eq!(config.consent_capability, "screenSms");
        assert_eq!(config.permissions, vec!["READ_SMS".to_string()]);
        assert_eq!(config.role.as_deref(), Some("call_screening"));
    }

    #[test]
    fn test_invalid_names_are_config_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gate.json");
        std::fs::write(&path, r#"{"role": "not valid"}"#).unwrap();
        let err = FileGateConfigLoader::new(Arc::new(StdFileSystem), &path, false)
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
