//! 配線: 標準アダプタで KeywordSession を組み立てる

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileKeyValueStore, NoopLog, StdClock, StdEnvResolver, StdIdGenerator,
};
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::{create_provider, load_profiles_config, resolve_provider, LlmDriver, ProviderType};
use common::ports::outbound::{EnvResolver, IdGenerator, Log};

use crate::adapter::{
    CliCredentialProvider, KvSavedKeywordStore, LlmKeywordGenerator, StaticCredentialProvider,
};
use crate::ports::outbound::{CredentialProvider, KeywordGenerator, SavedKeywordStore};
use crate::usecase::KeywordSession;

const LOG_FILENAME: &str = "log.jsonl";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 配線で組み立てたアプリ（main の Command ディスパッチで利用）
pub struct App {
    pub session: KeywordSession,
}

/// 配線: プロファイルを解決し、標準アダプタで App を組み立てる
pub fn wire_kwgen(
    profile: Option<&ProviderName>,
    model: Option<&ModelName>,
) -> Result<App, Error> {
    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);

    // ログはデータディレクトリ直下の JSONL。パスが解決できなければ Noop にフォールバック
    let log: Arc<dyn Log> = env
        .resolve_data_dir()
        .map(|dir| Arc::new(FileJsonLog::new(dir.join(LOG_FILENAME))) as Arc<dyn Log>)
        .unwrap_or_else(|_| Arc::new(NoopLog));

    let cfg = load_profiles_config(env.as_ref())?;
    let resolved = resolve_provider(profile, cfg.as_ref())?;

    // -m 指定 > プロファイルの model > プロバイダのデフォルト
    let model_override = model
        .map(|m| m.as_ref().to_string())
        .or_else(|| resolved.model.clone());

    let provider = create_provider(
        resolved.provider_type,
        model_override,
        resolved.api_key_env.clone(),
        resolved.temperature,
    )?;

    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(Arc::new(StdClock)));
    let generator: Arc<dyn KeywordGenerator> = Arc::new(LlmKeywordGenerator::new(
        LlmDriver::new(provider),
        id_gen,
        Arc::clone(&log),
    ));

    let data_dir = env.resolve_data_dir()?;
    let store: Arc<dyn SavedKeywordStore> = Arc::new(KvSavedKeywordStore::new(
        Arc::new(FileKeyValueStore::new(data_dir)),
        Arc::clone(&log),
    ));

    // echo プロバイダはクレデンシャル不要
    let credential: Arc<dyn CredentialProvider> = match resolved.provider_type {
        ProviderType::Gemini => {
            let key_env = resolved
                .api_key_env
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
            Arc::new(CliCredentialProvider::new(Arc::clone(&env), key_env))
        }
        ProviderType::Echo => Arc::new(StaticCredentialProvider::new(true)),
    };

    let session = KeywordSession::new(generator, store, credential, log);
    Ok(App { session })
}
