//! アダプター（外界の I/O を trait で抽象化した標準実装）
//!
//! usecase は ports の trait 経由でのみ環境変数・時刻・ストア・ログに触れる。
//! 実装は標準実装（Std* / File*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod file_kv_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use file_kv_store::{FileKeyValueStore, MemoryKeyValueStore};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_id_generator::StdIdGenerator;
