//! シードキーワードと件数のドメイン型
//!
//! バリデーションはネットワーク呼び出しの前（CLI 境界）で行う。

use common::error::Error;

/// 1 回の生成で要求できる最小件数
pub const MIN_COUNT: u8 = 1;
/// 1 回の生成で要求できる最大件数
pub const MAX_COUNT: u8 = 20;

/// シードキーワード（空白のみ・空文字を拒否する newtype）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedKeyword(String);

impl SeedKeyword {
    /// 前後の空白を除去して生成する。空になる入力は Usage エラー
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let trimmed = s.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(Error::invalid_argument(
                "Seed keyword must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed))
    }
}

impl AsRef<str> for SeedKeyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeedKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 件数が [MIN_COUNT, MAX_COUNT] に収まっているか検証する
pub fn validate_count(count: u8) -> Result<u8, Error> {
    if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
        return Err(Error::invalid_argument(format!(
            "Count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, count
        )));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_keyword_trims() {
        let seed = SeedKeyword::new("  sustainable living tips  ").unwrap();
        assert_eq!(seed.as_ref(), "sustainable living tips");
    }

    #[test]
    fn test_seed_keyword_rejects_empty() {
        assert!(SeedKeyword::new("").is_err());
        assert!(SeedKeyword::new("   ").is_err());
        let err = SeedKeyword::new("\t\n").unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_validate_count_bounds() {
        assert!(validate_count(0).is_err());
        assert_eq!(validate_count(1).unwrap(), 1);
        assert_eq!(validate_count(20).unwrap(), 20);
        assert!(validate_count(21).is_err());
        let err = validate_count(42).unwrap_err();
        assert!(err.to_string().contains("42"));
    }
}
