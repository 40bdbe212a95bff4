//! Gemini プロバイダの実装（generateContent・構造化出力）

use crate::error::Error;
use crate::llm::provider::{LlmProvider, SamplingConfig};
use serde_json::{json, Value};
use std::env;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini プロバイダ
///
/// API キーは構築時ではなくリクエスト時に環境変数から読む。
/// キー未設定のまま構築でき、対話的に設定された後のリクエストから有効になる。
pub struct GeminiProvider {
    model: String,
    api_key_env: String,
    sampling: SamplingConfig,
}

impl GeminiProvider {
    /// 新しい Gemini プロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-2.5-flash"）
    /// * `api_key_env` - API キーを読む環境変数名（デフォルト: GEMINI_API_KEY）
    /// * `temperature` - 温度（デフォルトは SamplingConfig::default）
    pub fn new(
        model: Option<String>,
        api_key_env: Option<String>,
        temperature: Option<f32>,
    ) -> Self {
        let mut sampling = SamplingConfig::default();
        if let Some(t) = temperature {
            sampling.temperature = t;
        }
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key_env: api_key_env.unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            sampling,
        }
    }

    /// API キーを読む環境変数名
    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    fn api_key(&self) -> Result<String, Error> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::env(format!(
                    "{} environment variable is not set",
                    self.api_key_env
                ))
            })
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        response_schema: Option<&Value>,
    ) -> Result<Value, Error> {
        let mut payload = json!({});

        // システム指示を追加
        if let Some(system) = system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        payload["contents"] = json!([{
            "role": "user",
            "parts": [{"text": prompt}]
        }]);

        // 生成設定。responseSchema を渡すと応答本文は単一の JSON ドキュメントになる
        let mut generation_config = json!({
            "temperature": self.sampling.temperature,
            "topP": self.sampling.top_p,
        });
        if let Some(schema) = response_schema {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = schema.clone();
        }
        payload["generationConfig"] = generation_config;

        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model,
            self.api_key()?
        );

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = if let Ok(v) = serde_json::from_str::<Value>(&response_text) {
                v["error"]["message"]
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
            } else {
                format!("HTTP {}: {}", status, response_text)
            };
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        // エラーチェック
        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        // テキストを抽出
        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|s| s.to_string());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(None, None, None)
    }

    #[test]
    fn test_new_defaults() {
        let p = provider();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.api_key_env(), "GEMINI_API_KEY");
        assert_eq!(p.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_make_request_payload_simple() {
        let payload = provider()
            .make_request_payload("Hello", None, None)
            .unwrap();
        assert!(payload["contents"].is_array());
        assert_eq!(payload["contents"][0]["role"], "user");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Hello");
        assert!(payload["generationConfig"]["responseSchema"].is_null());
        assert!(payload["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_make_request_payload_with_system() {
        let payload = provider()
            .make_request_payload("Hello", Some("You are an SEO analyst"), None)
            .unwrap();
        assert_eq!(
            payload["systemInstruction"]["parts"][0]["text"],
            "You are an SEO analyst"
        );
    }

    #[test]
    fn test_make_request_payload_with_schema_sets_json_mime() {
        let schema = json!({"type": "ARRAY", "items": {"type": "OBJECT"}});
        let payload = provider()
            .make_request_payload("Hello", None, Some(&schema))
            .unwrap();
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(payload["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_make_request_payload_custom_temperature() {
        let p = GeminiProvider::new(None, None, Some(0.2));
        let payload = p.make_request_payload("Hello", None, None).unwrap();
        let t = payload["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((t - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response_text_extracts_first_text_part() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"keyword\":\"x\"}]"}]}}]}"#;
        let text = provider().parse_response_text(body).unwrap();
        assert_eq!(text.as_deref(), Some("[{\"keyword\":\"x\"}]"));
    }

    #[test]
    fn test_parse_response_text_no_candidates() {
        let text = provider().parse_response_text("{}").unwrap();
        assert!(text.is_none());
    }

    #[test]
    fn test_parse_response_text_error_body() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found."}}"#;
        let err = provider().parse_response_text(body).unwrap_err();
        assert!(err.to_string().contains("Requested entity was not found"));
    }

    #[test]
    fn test_parse_response_text_invalid_json() {
        let err = provider().parse_response_text("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_api_key_missing_env() {
        env::remove_var("KWGEN_TEST_MISSING_KEY");
        let p = GeminiProvider::new(None, Some("KWGEN_TEST_MISSING_KEY".to_string()), None);
        let err = p.api_key().unwrap_err();
        assert!(err.to_string().contains("KWGEN_TEST_MISSING_KEY"));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_api_key_reads_env_at_request_time() {
        let p = GeminiProvider::new(None, Some("KWGEN_TEST_LATE_KEY".to_string()), None);
        env::remove_var("KWGEN_TEST_LATE_KEY");
        assert!(p.api_key().is_err());
        // 構築後に設定されたキーも拾う
        env::set_var("KWGEN_TEST_LATE_KEY", "k");
        assert_eq!(p.api_key().unwrap(), "k");
        env::remove_var("KWGEN_TEST_LATE_KEY");
    }
}
