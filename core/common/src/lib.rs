//! kwgen 共通ライブラリ
//!
//! CLI 本体（`kwgen`）から使う基盤機能を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン共通の値型（プロバイダ名・モデル名）
pub mod domain;

/// Outbound ポート定義
pub mod ports;

/// 標準アダプタ実装
pub mod adapter;

/// LLM ドライバーとプロバイダ
pub mod llm;

pub use error::Error;
