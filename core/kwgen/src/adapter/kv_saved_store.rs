//! KV ストア上の保存済みキーワード永続化（ベストエフォート）
//!
//! 使うキーは `saved_keywords` の 1 つだけ。値は保存コレクション全体の JSON。
//! スキーマバージョンは持たない（形式変更時は別途マイグレーションが必要）。

use std::sync::Arc;

use common::ports::outbound::{KeyValueStore, Log, LogLevel, LogRecord};
use serde_json::json;

use crate::domain::KeywordRecord;
use crate::ports::outbound::SavedKeywordStore;

/// 保存コレクションの格納キー
pub const SAVED_KEYWORDS_KEY: &str = "saved_keywords";

/// KeyValueStore に保存コレクションを丸ごと書き込む実装
///
/// 読み書きの失敗はログに記録するだけで、呼び出し側には返さない。
pub struct KvSavedKeywordStore {
    store: Arc<dyn KeyValueStore>,
    log: Arc<dyn Log>,
}

impl KvSavedKeywordStore {
    pub fn new(store: Arc<dyn KeyValueStore>, log: Arc<dyn Log>) -> Self {
        Self { store, log }
    }

    fn log_failure(&self, message: &str, detail: String) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, message)
                .layer("adapter")
                .kind("store")
                .field("key", json!(SAVED_KEYWORDS_KEY))
                .field("detail", json!(detail)),
        );
    }
}

impl SavedKeywordStore for KvSavedKeywordStore {
    fn load(&self) -> Vec<KeywordRecord> {
        let raw = match self.store.get(SAVED_KEYWORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                self.log_failure("failed to load saved keywords", e.to_string());
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<KeywordRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                self.log_failure("stored saved keywords are not parseable", e.to_string());
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[KeywordRecord]) {
        let value = match serde_json::to_string(records) {
            Ok(value) => value,
            Err(e) => {
                self.log_failure("failed to serialize saved keywords", e.to_string());
                return;
            }
        };
        if let Err(e) = self.store.set(SAVED_KEYWORDS_KEY, &value) {
            self.log_failure("failed to persist saved keywords", e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CompetitionLevel, Difficulty, RecordId, SearchVolume, SerpFeature,
    };
    use common::adapter::{MemoryKeyValueStore, NoopLog};
    use common::error::Error;

    fn record(id: &str, keyword: &str) -> KeywordRecord {
        KeywordRecord {
            id: RecordId::new(id),
            keyword: keyword.to_string(),
            difficulty: Difficulty::Medium,
            search_volume: SearchVolume::V100To1K,
            competition_level: CompetitionLevel::Low,
            estimated_cpc: "N/A".to_string(),
            content_ideas: vec!["idea".to_string()],
            serp_features: vec![SerpFeature::new("Sitelinks")],
        }
    }

    fn store_over(kv: Arc<dyn KeyValueStore>) -> KvSavedKeywordStore {
        KvSavedKeywordStore::new(kv, Arc::new(NoopLog))
    }

    #[test]
    fn test_load_empty_store_returns_empty() {
        let store = store_over(Arc::new(MemoryKeyValueStore::new()));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip_preserves_order_and_fields() {
        let store = store_over(Arc::new(MemoryKeyValueStore::new()));
        let records = vec![record("b", "second"), record("a", "first")];
        store.save(&records);
        let loaded = store.load();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_corrupted_value_returns_empty() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(SAVED_KEYWORDS_KEY, "not json").unwrap();
        let store = store_over(kv);
        assert!(store.load().is_empty());
    }

    // 常に失敗する KV ストア
    struct FailingKv;

    impl KeyValueStore for FailingKv {
        fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::io_msg("disk on fire"))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::io_msg("disk on fire"))
        }
    }

    #[test]
    fn test_store_failures_never_propagate() {
        let store = store_over(Arc::new(FailingKv));
        assert!(store.load().is_empty());
        // save はエラーを返さない（ログに残るのみ）
        store.save(&[record("a", "first")]);
    }
}
