//! 文字列 KV ストア Outbound ポート
//!
//! ホスト環境が提供する get/set のみの不透明なストア。値の構造には関知しない。

use crate::error::Error;

/// 文字列キー・文字列値のストア抽象
///
/// 実装は `common::adapter::FileKeyValueStore`（キーごとに 1 ファイル）や
/// テスト用の `MemoryKeyValueStore` など。
pub trait KeyValueStore: Send + Sync {
    /// キーに対応する値を返す。キーが存在しなければ Ok(None)
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// キーに値を書き込む（上書き）
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}
