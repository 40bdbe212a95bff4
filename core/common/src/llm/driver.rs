//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → 本文抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::Value;

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 1 往復のリクエストを実行して応答本文のテキストを返す
    ///
    /// # Arguments
    /// * `prompt` - ユーザープロンプト
    /// * `system_instruction` - システム指示（オプション）
    /// * `response_schema` - 期待する応答 JSON のスキーマ（オプション）
    ///
    /// # Returns
    /// * `Ok(String)` - 応答本文テキスト
    /// * `Err(Error)` - ペイロード生成・HTTP・本文抽出のいずれかの失敗
    pub fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        response_schema: Option<&Value>,
    ) -> Result<String, Error> {
        let payload =
            self.provider
                .make_request_payload(prompt, system_instruction, response_schema)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        let text = self
            .provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::json("No text in response".to_string()))?;

        Ok(text)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // モックプロバイダ
    struct MockProvider;

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn make_request_payload(
            &self,
            prompt: &str,
            _system_instruction: Option<&str>,
            _response_schema: Option<&Value>,
        ) -> Result<Value, Error> {
            Ok(serde_json::json!({ "prompt": prompt }))
        }

        fn make_http_request(&self, _request_json: &str) -> Result<String, Error> {
            Ok(r#"{"candidates":[{"content":{"parts":[{"text":"[]"}]}}]}"#.to_string())
        }

        fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
            let v: Value = serde_json::from_str(response_json)
                .map_err(|e| Error::json(format!("Failed to parse JSON: {}", e)))?;
            Ok(v["candidates"][0]["content"]["parts"][0]["text"]
                .as_str()
                .map(|s| s.to_string()))
        }
    }

    #[test]
    fn test_llm_driver_generate() {
        let driver = LlmDriver::new(MockProvider);
        let result = driver.generate("test", None, None);
        assert_eq!(result.unwrap(), "[]");
    }

    #[test]
    fn test_llm_driver_provider_accessor() {
        let driver = LlmDriver::new(MockProvider);
        assert_eq!(driver.provider().name(), "mock");
    }

    // 本文が無い場合のモック
    struct NoTextProvider;

    impl LlmProvider for NoTextProvider {
        fn name(&self) -> &str {
            "no_text"
        }

        fn make_request_payload(
            &self,
            _prompt: &str,
            _system_instruction: Option<&str>,
            _response_schema: Option<&Value>,
        ) -> Result<Value, Error> {
            Ok(serde_json::json!({}))
        }

        fn make_http_request(&self, _request_json: &str) -> Result<String, Error> {
            Ok("{}".to_string())
        }

        fn parse_response_text(&self, _response_json: &str) -> Result<Option<String>, Error> {
            Ok(None)
        }
    }

    #[test]
    fn test_llm_driver_generate_no_text() {
        let driver = LlmDriver::new(NoTextProvider);
        let err = driver.generate("test", None, None).unwrap_err();
        assert!(err.to_string().contains("No text in response"));
    }

    #[test]
    fn test_llm_driver_with_echo_provider() {
        use crate::llm::echo::EchoProvider;
        let driver = LlmDriver::new(EchoProvider::new());
        let text = driver.generate("Hello, echo!", None, None).unwrap();
        assert!(serde_json::from_str::<Value>(&text).unwrap().is_array());
    }
}
