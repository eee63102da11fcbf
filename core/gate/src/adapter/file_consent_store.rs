//! 同意記録を consent.json（フラットな JSON オブジェクト）で保存するアダプタ
//!
//! `{"agree-recognizeCall": true, ...}` の形式。書き込みは一時ファイル経由で置き換える。

use crate::ports::outbound::ConsentStore;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileConsentStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileConsentStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, bool>, Error> {
        if !self.fs.exists(&self.path) {
            return Ok(BTreeMap::new());
        }
        let s = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&s).map_err(|e| {
            Error::json(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl ConsentStore for FileConsentStore {
    fn get(&self, key: &str) -> Result<Option<bool>, Error> {
        Ok(self.load()?.get(key).copied())
    }

    fn put(&self, key: &str, value: bool) -> Result<(), Error> {
        let mut records = self.load()?;
        records.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&records)?;
        self.fs.write_atomic(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use tempfile::tempdir;

    fn store(dir: &std::path::Path) -> FileConsentStore {
        FileConsentStore::new(Arc::new(StdFileSystem), dir.join("state/consent.json"))
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(store(dir.path()).get("agree-x").unwrap(), None);
    }

    #[test]
    fn test_put_then_get_and_overwrite() {
        let dir = tempdir().unwrap();
        let s = store(dir.path());
        s.put("agree-x", true).unwrap();
        s.put("agree-y", false).unwrap();
        assert_eq!(s.get("agree-x").unwrap(), Some(true));
        s.put("agree-x", false).unwrap();
        assert_eq!(s.get("agree-x").unwrap(), Some(false));
        assert_eq!(s.get("agree-y").unwrap(), Some(false));

        let raw = std::fs::read_to_string(dir.path().join("state/consent.json")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["agree-x"], false);
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempdir().unwrap();
        store(dir.path()).put("agree-recognizeCall", true).unwrap();
        assert_eq!(
            store(dir.path()).get("agree-recognizeCall").unwrap(),
            Some(true)
        );
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("state")).unwrap();
        std::fs::write(dir.path().join("state/consent.json"), "not json").unwrap();
        let err = store(dir.path()).get("agree-x").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
