//! クレデンシャル確認・取得の標準実装
//!
//! 環境変数に API キーが入っているかの確認と、標準入出力での対話的な取得。

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::EnvResolver;

use crate::ports::outbound::CredentialProvider;

/// 環境変数を確認し、無ければ標準入力からキーを受け取る実装
pub struct CliCredentialProvider {
    env: Arc<dyn EnvResolver>,
    api_key_env: String,
}

impl CliCredentialProvider {
    pub fn new(env: Arc<dyn EnvResolver>, api_key_env: impl Into<String>) -> Self {
        Self {
            env,
            api_key_env: api_key_env.into(),
        }
    }
}

impl CredentialProvider for CliCredentialProvider {
    fn has_credential(&self) -> bool {
        self.env.var(&self.api_key_env).is_some()
    }

    fn request_credential(&self) -> Result<(), Error> {
        eprint!("Enter the API key to store in {}: ", self.api_key_env);
        let _ = io::stderr().flush();

        let stdin = io::stdin();
        let mut line = String::new();
        stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;

        let key = line.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument("No API key entered".to_string()));
        }
        // このプロセスにのみ設定する。シェル環境には書き戻さない
        self.env.set_var(&self.api_key_env, key);
        Ok(())
    }
}

/// 固定の結果を返す実装（echo プロバイダ用・テスト用）
pub struct StaticCredentialProvider {
    available: bool,
}

impl StaticCredentialProvider {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn has_credential(&self) -> bool {
        self.available
    }

    fn request_credential(&self) -> Result<(), Error> {
        Ok(())
    }
}
