//! キーワードセッション（アプリケーション状態の所有者）
//!
//! 生成バッチ・保存コレクション・フィルタ・クレデンシャル可否・busy・直近エラーを
//! 1 箇所で所有し、定義された操作経由でのみ変更する。プレゼンテーション層は
//! この構造体を注入されて使う。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::json;

use crate::domain::{KeywordFilter, KeywordRecord, RecordId, SeedKeyword};
use crate::ports::outbound::{
    CredentialProvider, GenerationError, KeywordGenerator, SavedKeywordStore,
};

/// クレデンシャル未設定時のユーザー向けメッセージ
pub const NO_CREDENTIAL_MESSAGE: &str =
    "API key is not configured. Set it before generating keywords.";
/// クレデンシャル拒否時のユーザー向けメッセージ
pub const UNAUTHORIZED_MESSAGE: &str =
    "The API key was rejected by the generation service. Set a valid key and try again.";

/// アプリケーション状態を所有するセッション
pub struct KeywordSession {
    generator: Arc<dyn KeywordGenerator>,
    store: Arc<dyn SavedKeywordStore>,
    credential: Arc<dyn CredentialProvider>,
    log: Arc<dyn Log>,

    /// 直近の生成バッチ（生成のたびに丸ごと置き換え）
    generated_batch: Vec<KeywordRecord>,
    /// 保存コレクション（挿入順。追加・削除・全削除のみ）
    saved_records: Vec<KeywordRecord>,
    /// 表示用フィルタ（セッション限りの一時状態）
    filter: KeywordFilter,
    credential_available: bool,
    busy: bool,
    last_error: Option<String>,
}

impl KeywordSession {
    pub fn new(
        generator: Arc<dyn KeywordGenerator>,
        store: Arc<dyn SavedKeywordStore>,
        credential: Arc<dyn CredentialProvider>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            generator,
            store,
            credential,
            log,
            generated_batch: Vec::new(),
            saved_records: Vec::new(),
            filter: KeywordFilter::default(),
            credential_available: false,
            busy: false,
            last_error: None,
        }
    }

    /// 起動時の初期化: 保存コレクションを読み込み、クレデンシャル可否を確認する
    pub fn bootstrap(&mut self) {
        self.saved_records = self.store.load();
        self.credential_available = self.credential.has_credential();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "session bootstrapped")
                .layer("usecase")
                .kind("session")
                .field("saved", json!(self.saved_records.len()))
                .field("credential", json!(self.credential_available)),
        );
    }

    /// キーワード生成を要求する
    ///
    /// クレデンシャル未設定なら生成クライアントを呼ばずに last_error を立てて戻る。
    /// 成功時はバッチを丸ごと置き換え、Unauthorized では加えて
    /// credential_available を false に倒す（再設定まで次の生成をゲート）。
    /// busy は成功・失敗を問わず必ず下ろす。
    pub fn request_generation(&mut self, seed: &SeedKeyword, count: u8) {
        if !self.credential_available {
            self.last_error = Some(NO_CREDENTIAL_MESSAGE.to_string());
            return;
        }

        self.busy = true;
        self.generated_batch.clear();
        self.last_error = None;

        match self.generator.generate(seed, count) {
            Ok(records) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "generation succeeded")
                        .layer("usecase")
                        .kind("session")
                        .field("requested", json!(count))
                        .field("returned", json!(records.len())),
                );
                self.generated_batch = records;
            }
            Err(GenerationError::Unauthorized(detail)) => {
                self.credential_available = false;
                self.last_error = Some(UNAUTHORIZED_MESSAGE.to_string());
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "generation rejected: credential")
                        .layer("usecase")
                        .kind("session")
                        .field("detail", json!(detail)),
                );
            }
            Err(err) => {
                self.last_error = Some(format!("Keyword generation failed: {}", err));
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "generation failed")
                        .layer("usecase")
                        .kind("session")
                        .field("detail", json!(err.to_string())),
                );
            }
        }

        self.busy = false;
    }

    /// レコードを保存コレクションに追加する（同一 id があれば no-op）
    ///
    /// インメモリ状態を先に更新し、その後に永続化する。永続化の失敗は
    /// インメモリ状態を巻き戻さない。
    pub fn save_record(&mut self, record: KeywordRecord) {
        if self.is_saved(&record.id) {
            return;
        }
        self.saved_records.push(record);
        self.store.save(&self.saved_records);
    }

    /// 保存コレクションから 1 件削除する（存在しなければ no-op）
    pub fn remove_saved(&mut self, id: &RecordId) {
        let before = self.saved_records.len();
        self.saved_records.retain(|r| &r.id != id);
        if self.saved_records.len() != before {
            self.store.save(&self.saved_records);
        }
    }

    /// 保存コレクションを全削除し、フィルタも全軸リセットする
    ///
    /// フィルタを残すと空リストが「一致なし」に見えてしまうため、ここで必ず戻す。
    pub fn clear_saved(&mut self) {
        self.saved_records.clear();
        self.store.save(&self.saved_records);
        self.filter.reset();
    }

    /// 部分的なフィルタ条件をマージする（純粋・同期・I/O なし）
    pub fn set_filter(&mut self, partial: KeywordFilter) {
        self.filter.merge(partial);
    }

    /// フィルタを全軸リセットする
    pub fn reset_filter(&mut self) {
        self.filter.reset();
    }

    /// フィルタ適用後の保存コレクション（挿入順を保持した導出ビュー）
    pub fn visible_saved(&self) -> Vec<&KeywordRecord> {
        self.saved_records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    /// 指定 id のレコードが保存済みか
    pub fn is_saved(&self, id: &RecordId) -> bool {
        self.saved_records.iter().any(|r| &r.id == id)
    }

    /// クレデンシャルを対話的に取得する
    ///
    /// 成功したら再確認せず楽観的に利用可能へ倒す。取得が静かに失敗して
    /// いた場合は次の生成試行で Unauthorized として表面化する。
    pub fn request_credential(&mut self) -> Result<(), Error> {
        self.credential.request_credential()?;
        self.credential_available = true;
        Ok(())
    }

    pub fn generated_batch(&self) -> &[KeywordRecord] {
        &self.generated_batch
    }

    pub fn saved_records(&self) -> &[KeywordRecord] {
        &self.saved_records
    }

    pub fn filter(&self) -> &KeywordFilter {
        &self.filter
    }

    pub fn credential_available(&self) -> bool {
        self.credential_available
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
