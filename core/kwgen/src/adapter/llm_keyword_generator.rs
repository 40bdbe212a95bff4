//! LLM を使うキーワード生成の標準実装
//!
//! プロンプトと応答スキーマの契約を組み立てて 1 往復のリクエストを行い、
//! 応答を検証して KeywordRecord の列に変換する。`id` はここで必ず採番する。

use std::sync::{Arc, OnceLock};

use common::error::Error;
use common::llm::{LlmDriver, LlmProvider};
use common::ports::outbound::{IdGenerator, Log, LogLevel, LogRecord};
use regex::Regex;
use serde_json::{json, Value};

use crate::domain::{
    CompetitionLevel, Difficulty, KeywordRecord, RecordId, SearchVolume, SeedKeyword, SerpFeature,
};
use crate::ports::outbound::{GenerationError, KeywordGenerator};

const SYSTEM_INSTRUCTION: &str = "You are an expert SEO and keyword research analyst.";

/// クレデンシャル拒否の失敗シグネチャ
///
/// サービスは無効な API キーに固有のエラーコードを返さず、
/// 「Requested entity was not found」という 404 系メッセージになる。
fn unauthorized_signature() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)requested entity was not found").unwrap())
}

/// LLM ドライバー + ID 採番でキーワードを生成する標準実装
pub struct LlmKeywordGenerator<P: LlmProvider> {
    driver: LlmDriver<P>,
    id_gen: Arc<dyn IdGenerator>,
    log: Arc<dyn Log>,
}

impl<P: LlmProvider> LlmKeywordGenerator<P> {
    pub fn new(driver: LlmDriver<P>, id_gen: Arc<dyn IdGenerator>, log: Arc<dyn Log>) -> Self {
        Self {
            driver,
            id_gen,
            log,
        }
    }

    /// 応答本文を検証して KeywordRecord の列に変換する
    ///
    /// 必須フィールドの欠落・列挙値の範囲外は MalformedResponse。
    /// 未知のフィールド・未知の SERP タグは許容する。
    fn parse_records(&self, body: &str) -> Result<Vec<KeywordRecord>, GenerationError> {
        let value: Value = serde_json::from_str(body.trim()).map_err(|e| {
            GenerationError::MalformedResponse(format!("response body is not valid JSON: {}", e))
        })?;
        let items = value.as_array().ok_or_else(|| {
            GenerationError::MalformedResponse("top-level JSON value is not an array".to_string())
        })?;

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                GenerationError::MalformedResponse(format!("item {} is not an object", index))
            })?;

            let keyword = required_str(obj, "keyword", index)?.trim().to_string();
            if keyword.is_empty() {
                return Err(GenerationError::MalformedResponse(format!(
                    "item {}: 'keyword' is empty",
                    index
                )));
            }

            let difficulty = parse_enum(obj, "difficulty", index, Difficulty::parse)?;
            let search_volume = parse_enum(obj, "searchVolume", index, SearchVolume::parse)?;
            let competition_level =
                parse_enum(obj, "competitionLevel", index, CompetitionLevel::parse)?;
            let estimated_cpc = required_str(obj, "estimatedCpc", index)?.to_string();
            let content_ideas = required_string_array(obj, "contentIdeas", index)?;
            let serp_features = required_string_array(obj, "serpFeatures", index)?
                .into_iter()
                .map(SerpFeature::new)
                .collect();

            records.push(KeywordRecord {
                id: RecordId::new(self.id_gen.next_id()),
                keyword,
                difficulty,
                search_volume,
                competition_level,
                estimated_cpc,
                content_ideas,
                serp_features,
            });
        }
        Ok(records)
    }
}

impl<P: LlmProvider + Send + Sync> KeywordGenerator for LlmKeywordGenerator<P> {
    fn generate(
        &self,
        seed: &SeedKeyword,
        count: u8,
    ) -> Result<Vec<KeywordRecord>, GenerationError> {
        let prompt = build_prompt(seed, count);
        let schema = response_schema();

        let body = self
            .driver
            .generate(&prompt, Some(SYSTEM_INSTRUCTION), Some(&schema))
            .map_err(classify_service_error)?;

        let records = self.parse_records(&body)?;

        // サービスは count 件以下を返す契約。超過分は受け入れるが必ずログに残す
        if records.len() > count as usize {
            let _ = self.log.log(
                &LogRecord::new(
                    LogLevel::Warn,
                    "generation service returned more records than requested",
                )
                .layer("adapter")
                .kind("generator")
                .field("requested", json!(count))
                .field("returned", json!(records.len())),
            );
        }
        Ok(records)
    }
}

/// 生成タスクのプロンプトを組み立てる
fn build_prompt(seed: &SeedKeyword, count: u8) -> String {
    format!(
        "Generate a list of exactly {count} long-tail keyword variations related to the seed keyword \"{seed}\". \
         For every keyword, estimate its ranking difficulty, monthly search volume bucket, competition level \
         and cost-per-click range (a currency range such as \"$0.50 - $1.50\", or \"N/A\"), suggest 1-3 content \
         ideas, and list the SERP features the keyword is likely to trigger. Respond with JSON only.",
        count = count,
        seed = seed.as_ref(),
    )
}

/// 応答スキーマ: 7 フィールドのオブジェクトの配列（3 フィールドは列挙制約付き）
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "keyword": {
                    "type": "STRING",
                    "description": "The long-tail keyword phrase."
                },
                "difficulty": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High", "Very High"]
                },
                "searchVolume": {
                    "type": "STRING",
                    "enum": ["0-10", "10-100", "100-1K", "1K-10K", "10K-100K", "100K+"]
                },
                "competitionLevel": {
                    "type": "STRING",
                    "enum": ["Low", "Medium", "High", "Very High"]
                },
                "estimatedCpc": {
                    "type": "STRING",
                    "description": "Estimated cost per click range, e.g. \"$0.50 - $1.50\", or \"N/A\"."
                },
                "contentIdeas": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "serpFeatures": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": [
                "keyword",
                "difficulty",
                "searchVolume",
                "competitionLevel",
                "estimatedCpc",
                "contentIdeas",
                "serpFeatures"
            ]
        }
    })
}

/// ドライバーのエラーを GenerationError に分類する
fn classify_service_error(err: Error) -> GenerationError {
    match err {
        Error::Json(msg) => GenerationError::MalformedResponse(msg),
        Error::Http(msg) => {
            if unauthorized_signature().is_match(&msg) {
                GenerationError::Unauthorized(msg)
            } else {
                GenerationError::Transient(msg)
            }
        }
        other => GenerationError::Transient(other.to_string()),
    }
}

fn required_str<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<&'a str, GenerationError> {
    obj.get(field).and_then(|v| v.as_str()).ok_or_else(|| {
        GenerationError::MalformedResponse(format!(
            "item {}: required field '{}' is missing or not a string",
            index, field
        ))
    })
}

fn required_string_array(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    index: usize,
) -> Result<Vec<String>, GenerationError> {
    let items = obj.get(field).and_then(|v| v.as_array()).ok_or_else(|| {
        GenerationError::MalformedResponse(format!(
            "item {}: required field '{}' is missing or not an array",
            index, field
        ))
    })?;
    items
        .iter()
        .map(|v| {
            v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                GenerationError::MalformedResponse(format!(
                    "item {}: '{}' contains a non-string element",
                    index, field
                ))
            })
        })
        .collect()
}

fn parse_enum<T>(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    index: usize,
    parse: fn(&str) -> Option<T>,
) -> Result<T, GenerationError> {
    let raw = required_str(obj, field, index)?;
    parse(raw).ok_or_else(|| {
        GenerationError::MalformedResponse(format!(
            "item {}: '{}' has a value outside the declared set: '{}'",
            index, field, raw
        ))
    })
}
