//! アダプター（ポートの標準実装）

pub mod credential;
pub mod kv_saved_store;
pub mod llm_keyword_generator;
pub mod stub_generator;

pub use credential::{CliCredentialProvider, StaticCredentialProvider};
pub use kv_saved_store::KvSavedKeywordStore;
pub use llm_keyword_generator::LlmKeywordGenerator;

#[cfg(test)]
pub use stub_generator::StubKeywordGenerator;
