//! キーワード生成 Outbound ポート

use crate::domain::{KeywordRecord, SeedKeyword};
use thiserror::Error as ThisError;

/// 生成クライアントのエラー分類
///
/// どのエラーもプロセスを落とさない。次の成功した操作で回復する。
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GenerationError {
    /// サービスがクレデンシャルを拒否した
    ///
    /// サービスはこのケースに固有のエラーコードを返さないため、
    /// 既知の「entity not found」系の失敗シグネチャで検出する。
    #[error("credential rejected by generation service: {0}")]
    Unauthorized(String),
    /// 応答本文が JSON でない、または要求した形に一致しない
    #[error("malformed response from generation service: {0}")]
    MalformedResponse(String),
    /// その他のサービス失敗（ネットワーク・クォータ・内部エラー）
    #[error("generation service failure: {0}")]
    Transient(String),
}

/// キーワード生成の抽象（Outbound ポート）
///
/// 実装は `adapter::LlmKeywordGenerator` やテスト用の Stub など。
/// 1 回の呼び出し＝1 回のネットワーク往復で、内部リトライはしない。
pub trait KeywordGenerator: Send + Sync {
    /// seed の関連キーワードを count 件（以下）生成する
    ///
    /// 返るレコードには呼び出しごとに新しく採番された一意な `id` が付く。
    fn generate(&self, seed: &SeedKeyword, count: u8)
        -> Result<Vec<KeywordRecord>, GenerationError>;
}
