//! 環境変数解決 Outbound ポート
//!
//! 設定ディレクトリ・データディレクトリ・個別の環境変数を解決する。
//! usecase と adapter はこの trait 経由でのみ環境変数にアクセスする。

use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 設定ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. KWGEN_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/kwgen
    /// 3. $HOME/.config/kwgen
    fn resolve_home_dir(&self) -> Result<PathBuf, Error>;

    /// データディレクトリ（保存キーワード・ログの置き場所）を解決する
    ///
    /// 優先順位:
    /// 1. KWGEN_DATA（設定されていれば）
    /// 2. $XDG_DATA_HOME/kwgen
    /// 3. $HOME/.local/share/kwgen
    fn resolve_data_dir(&self) -> Result<PathBuf, Error>;

    /// プロバイダプロファイル設定ファイルのパス（resolve_home_dir() 直下の profiles.json）
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error>;

    /// 任意の環境変数を取得（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// 環境変数をこのプロセスに設定する（対話的に入力された API キー用）
    fn set_var(&self, name: &str, value: &str);
}
