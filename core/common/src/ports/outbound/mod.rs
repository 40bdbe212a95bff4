//! Outbound ポート: アプリが外界（環境変数・時刻・KV ストア・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod id_generator;
pub mod key_value_store;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use id_generator::IdGenerator;
pub use key_value_store::KeyValueStore;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
