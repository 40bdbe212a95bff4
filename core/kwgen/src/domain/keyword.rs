//! キーワードレコードと列挙フィールドの定義
//!
//! ワイヤ形式（生成サービスとの契約・永続化）は元のフィールド名
//! （searchVolume / competitionLevel / estimatedCpc / contentIdeas / serpFeatures）を使う。

use serde::{Deserialize, Serialize};

/// レコード ID の newtype
///
/// サービス側からは供給されず、クライアント側で生成時に必ず採番する。
/// 保存コレクション内の同一性判定はこの ID のみで行う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// キーワード難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// ワイヤ形式のラベル
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// ワイヤ形式のラベルから解析（宣言された値以外は None）
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }

    /// CLI 入力から解析（大文字小文字・区切りに寛容: "very-high" / "veryhigh" 等）
    pub fn parse_cli(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().replace(' ', "").to_lowercase() == normalized)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 月間検索ボリュームの区間（宣言順＝昇順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SearchVolume {
    #[serde(rename = "0-10")]
    V0To10,
    #[serde(rename = "10-100")]
    V10To100,
    #[serde(rename = "100-1K")]
    V100To1K,
    #[serde(rename = "1K-10K")]
    V1KTo10K,
    #[serde(rename = "10K-100K")]
    V10KTo100K,
    #[serde(rename = "100K+")]
    V100KPlus,
}

impl SearchVolume {
    pub const ALL: [Self; 6] = [
        Self::V0To10,
        Self::V10To100,
        Self::V100To1K,
        Self::V1KTo10K,
        Self::V10KTo100K,
        Self::V100KPlus,
    ];

    /// ワイヤ形式のラベル
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V0To10 => "0-10",
            Self::V10To100 => "10-100",
            Self::V100To1K => "100-1K",
            Self::V1KTo10K => "1K-10K",
            Self::V10KTo100K => "10K-100K",
            Self::V100KPlus => "100K+",
        }
    }

    /// ワイヤ形式のラベルから解析（宣言された値以外は None）
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// CLI 入力から解析（大文字小文字に寛容: "1k-10k" 等）
    pub fn parse_cli(s: &str) -> Option<Self> {
        let upper = s.to_uppercase();
        Self::ALL.iter().copied().find(|v| v.as_str() == upper)
    }
}

impl std::fmt::Display for SearchVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 競合レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CompetitionLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// ワイヤ形式のラベル
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// ワイヤ形式のラベルから解析（宣言された値以外は None）
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// CLI 入力から解析（大文字小文字・区切りに寛容）
    pub fn parse_cli(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == normalized)
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SERP フィーチャーのタグ
///
/// 既知の語彙から緩く選ばれるが、未知のタグも拒否せず保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerpFeature(String);

impl SerpFeature {
    /// 既知の語彙（表示ラベルと同一）
    pub const KNOWN: [&'static str; 10] = [
        "Featured Snippet",
        "People Also Ask",
        "Image Pack",
        "Video Carousel",
        "Knowledge Panel",
        "Local Pack",
        "Top Stories",
        "Shopping Results",
        "Reviews",
        "Sitelinks",
    ];

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// 既知の語彙に含まれるタグか
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SerpFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 生成・保存されるキーワード 1 件分のレコード
///
/// 生成後は不変。ワイヤ形式（サービス応答・永続化）と同じフィールド名で
/// シリアライズされる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub id: RecordId,
    pub keyword: String,
    pub difficulty: Difficulty,
    #[serde(rename = "searchVolume")]
    pub search_volume: SearchVolume,
    #[serde(rename = "competitionLevel")]
    pub competition_level: CompetitionLevel,
    #[serde(rename = "estimatedCpc")]
    pub estimated_cpc: String,
    #[serde(rename = "contentIdeas")]
    pub content_ideas: Vec<String>,
    #[serde(rename = "serpFeatures")]
    pub serp_features: Vec<SerpFeature>,
}
