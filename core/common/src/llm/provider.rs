//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// サンプリング設定
///
/// 値は妥当性寄りのチューニングであり、正しさの契約ではない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// 温度（0.0〜1.0）
    pub temperature: f32,
    /// nucleus サンプリングの確率質量
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echoなど）はこのトレイトを実装する。
/// 呼び出しは 1 往復のみで、リトライはプロバイダの責務外。
pub trait LlmProvider {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - ユーザープロンプト
    /// * `system_instruction` - システム指示（オプション）
    /// * `response_schema` - 期待する応答 JSON のスキーマ（オプション。
    ///   指定時は応答本文が単一の JSON ドキュメントであることをサービス契約にする）
    fn make_request_payload(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        response_schema: Option<&Value>,
    ) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - HTTP 失敗または API のエラー応答
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキスト（応答本文）を抽出
    ///
    /// # Returns
    /// * `Ok(Option<String>)` - 抽出したテキスト（存在しない場合はNone）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;
}
