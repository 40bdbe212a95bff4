//! LLM ドライバーとプロバイダ
//!
//! 1 回のリクエストで 1 つの JSON ドキュメントを返す構造化出力モードのみを扱う。
//! ストリーミング・会話履歴・ツール呼び出しはこのアプリでは使わない。

pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod gemini;
pub mod provider;
pub mod resolver;

pub use config::{ProfilesConfig, ProviderProfile, ProviderTypeKind};
pub use driver::LlmDriver;
pub use echo::EchoProvider;
pub use factory::{create_provider, AnyProvider, ProviderType};
pub use gemini::GeminiProvider;
pub use provider::{LlmProvider, SamplingConfig};
pub use resolver::{load_profiles_config, resolve_provider, ResolvedProvider};
