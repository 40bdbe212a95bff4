//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、スキーマに沿った固定の応答を返します。
//! デバッグやオフラインでの動作確認用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// 固定のキーワード配列（ワイヤ形式と同じフィールド名）
const CANNED_RESPONSE: &str = r#"[
  {
    "keyword": "echo keyword ideas for beginners",
    "difficulty": "Low",
    "searchVolume": "100-1K",
    "competitionLevel": "Low",
    "estimatedCpc": "$0.10 - $0.40",
    "contentIdeas": ["Beginner's guide", "Checklist post"],
    "serpFeatures": ["Featured Snippet", "People Also Ask"]
  },
  {
    "keyword": "best echo keyword tools compared",
    "difficulty": "Medium",
    "searchVolume": "1K-10K",
    "competitionLevel": "Medium",
    "estimatedCpc": "$1.20 - $2.50",
    "contentIdeas": ["Comparison table"],
    "serpFeatures": ["Reviews"]
  }
]"#;

/// Echoプロバイダ
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for EchoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        response_schema: Option<&Value>,
    ) -> Result<Value, Error> {
        let mut payload = json!({
            "prompt": prompt,
        });
        if let Some(system) = system_instruction {
            payload["system_instruction"] = json!(system);
        }
        if let Some(schema) = response_schema {
            payload["response_schema"] = schema.clone();
        }
        Ok(payload)
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // リクエスト内容を表示（実際のAPI呼び出しは行わない）
        eprintln!("[echo provider] request JSON:");
        eprintln!("{}", request_json);
        Ok(r#"{"echo": true}"#.to_string())
    }

    fn parse_response_text(&self, _response_json: &str) -> Result<Option<String>, Error> {
        Ok(Some(CANNED_RESPONSE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_provider_name() {
        assert_eq!(EchoProvider::new().name(), "echo");
    }

    #[test]
    fn test_echo_provider_make_request_payload() {
        let provider = EchoProvider::new();
        let schema = json!({"type": "ARRAY"});
        let payload = provider
            .make_request_payload("Hello", Some("system"), Some(&schema))
            .unwrap();
        assert_eq!(payload["prompt"], "Hello");
        assert_eq!(payload["system_instruction"], "system");
        assert_eq!(payload["response_schema"], schema);
    }

    #[test]
    fn test_echo_provider_canned_response_is_valid_json_array() {
        let provider = EchoProvider::new();
        let text = provider.parse_response_text("{}").unwrap().unwrap();
        let v: Value = serde_json::from_str(&text).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        for item in arr {
            assert!(item["keyword"].is_string());
            assert!(item["contentIdeas"].is_array());
            assert!(item["serpFeatures"].is_array());
        }
    }
}
