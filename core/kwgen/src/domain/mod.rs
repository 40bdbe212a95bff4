//! ドメイン型（キーワードレコード・フィルタ・シード）

pub mod command;
pub mod filter;
pub mod keyword;
pub mod seed;

pub use command::Command;
pub use filter::KeywordFilter;
pub use keyword::{
    CompetitionLevel, Difficulty, KeywordRecord, RecordId, SearchVolume, SerpFeature,
};
pub use seed::{validate_count, SeedKeyword, MAX_COUNT, MIN_COUNT};
