//! 文字列 KV ストアのファイル実装とテスト用インメモリ実装
//!
//! キーごとに 1 ファイル（`<dir>/<key>.json`）。キーは呼び出し側が固定文字列で
//! 管理する前提のため、パス区切りを含むキーは拒否する。

use crate::error::Error;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// キーごとに 1 ファイルで永続化する KeyValueStore 実装
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        if key.is_empty() || key.contains(|c| c == '/' || c == '\\' || c == '.') {
            return Err(Error::invalid_argument(format!("invalid store key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let s = std::fs::read_to_string(&path)
            .map_err(|e| Error::io_msg(format!("read {}: {}", path.display(), e)))?;
        Ok(Some(s))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::io_msg(format!("mkdir {}: {}", self.dir.display(), e)))?;
        std::fs::write(&path, value)
            .map_err(|e| Error::io_msg(format!("write {}: {}", path.display(), e)))?;
        Ok(())
    }
}

/// テスト用のインメモリ KeyValueStore 実装
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_get_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get("saved_keywords").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        store.set("saved_keywords", "[1,2,3]").unwrap();
        assert_eq!(store.get("saved_keywords").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("saved_keywords.json").exists());
    }

    #[test]
    fn test_file_store_set_creates_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("kwgen");
        let store = FileKeyValueStore::new(&nested);
        store.set("saved_keywords", "[]").unwrap();
        assert_eq!(store.get("saved_keywords").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert!(store.get("../etc/passwd").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }
}
