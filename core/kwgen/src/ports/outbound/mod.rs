//! Outbound ポート: セッションが生成サービス・永続ストア・クレデンシャルを使うための trait

pub mod credential;
pub mod keyword_generator;
pub mod saved_store;

pub use credential::CredentialProvider;
pub use keyword_generator::{GenerationError, KeywordGenerator};
pub use saved_store::SavedKeywordStore;
