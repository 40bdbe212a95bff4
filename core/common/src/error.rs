//! エラーハンドリング
//!
//! 全レイヤーで共通のエラー型。メッセージと sysexits 互換の終了コードを持つ。

use thiserror::Error as ThisError;

/// 共通エラー型
///
/// バリアントは発生源の分類。終了コードは `exit_code()` で取り出す。
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数・使い方の誤り（EX_USAGE）
    #[error("{0}")]
    Usage(String),
    /// 環境変数・設定の不足（EX_CONFIG）
    #[error("{0}")]
    Env(String),
    /// HTTP リクエスト失敗・API エラー応答
    #[error("{0}")]
    Http(String),
    /// JSON のパース・シリアライズ失敗
    #[error("{0}")]
    Json(String),
    /// ファイル I/O 失敗
    #[error("{0}")]
    Io(String),
    /// その他のシステムエラー（EX_SOFTWARE）
    #[error("{0}")]
    System(String),
}

impl Error {
    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// 環境変数・設定エラー
    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    /// HTTP エラー
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// JSON エラー
    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// I/O エラー
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// システムエラー
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方の誤りなら true（main で usage を表示するか判定する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// sysexits 互換の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 64,
            Self::Env(_) => 78,
            Self::Http(_) | Self::Json(_) | Self::Io(_) => 74,
            Self::System(_) => 70,
        }
    }
}
