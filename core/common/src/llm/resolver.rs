//! profiles.json の読み込みとプロバイダ解決

use crate::domain::ProviderName;
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::EnvResolver;

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "gemini", "offline"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(env: &dyn EnvResolver) -> Result<Option<ProfilesConfig>, Error> {
    let path = env.resolve_profiles_config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Gemini => ProviderType::Gemini,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["gemini", "echo"]
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or("gemini")
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(cfg) = cfg {
        if let Some(profile) = cfg.providers.get(effective_name) {
            let provider_type = provider_type_kind_to_provider_type(profile.type_);
            return Ok(ResolvedProvider {
                profile_name: effective_name.to_string(),
                provider_type,
                model: profile.model.clone(),
                api_key_env: profile.api_key_env.clone(),
                temperature: profile.temperature,
            });
        }
    }

    // 2) ビルトイン (ProviderType::from_str) を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            model: None,
            api_key_env: None,
            temperature: None,
        });
    }

    // 3) どれも無ければ usage エラー
    let mut available: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !available.contains(k) {
                available.push(k.clone());
            }
        }
    }
    available.sort();
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::config::{ProviderProfile, ProviderTypeKind};
    use std::collections::HashMap;

    #[test]
    fn test_resolve_provider_no_cfg_requested_none() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "gemini");
        assert_eq!(r.provider_type, ProviderType::Gemini);
        assert!(r.model.is_none());
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_echo() {
        let name = ProviderName::new("echo");
        let r = resolve_provider(Some(&name), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_resolve_provider_no_cfg_unknown() {
        let name = ProviderName::new("unknown_provider");
        let e = resolve_provider(Some(&name), None).unwrap_err();
        assert!(e.is_usage());
        assert!(e.to_string().contains("Unknown provider"));
        assert!(e.to_string().contains("unknown_provider"));
        assert!(e.to_string().contains("Available"));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let cfg = ProfilesConfig {
            default_provider: Some("my_gemini".to_string()),
            providers: {
                let mut m = HashMap::new();
                m.insert(
                    "my_gemini".to_string(),
                    ProviderProfile {
                        type_: ProviderTypeKind::Gemini,
                        model: Some("gemini-2.5-pro".to_string()),
                        api_key_env: Some("MY_KEY".to_string()),
                        temperature: Some(0.4),
                    },
                );
                m
            },
        };
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "my_gemini");
        assert_eq!(r.provider_type, ProviderType::Gemini);
        assert_eq!(r.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(r.api_key_env.as_deref(), Some("MY_KEY"));
        assert_eq!(r.temperature, Some(0.4));
    }

    #[test]
    fn test_resolve_provider_cfg_requested_overrides_default() {
        let cfg = ProfilesConfig {
            default_provider: Some("gemini".to_string()),
            providers: HashMap::new(),
        };
        let name = ProviderName::new("echo");
        let r = resolve_provider(Some(&name), Some(&cfg)).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_resolve_provider_cfg_unknown_provider_lists_available() {
        let cfg = ProfilesConfig {
            default_provider: None,
            providers: {
                let mut m = HashMap::new();
                m.insert(
                    "my_custom".to_string(),
                    ProviderProfile {
                        type_: ProviderTypeKind::Echo,
                        model: None,
                        api_key_env: None,
                        temperature: None,
                    },
                );
                m
            },
        };
        let name = ProviderName::new("nonexistent");
        let e = resolve_provider(Some(&name), Some(&cfg)).unwrap_err();
        assert!(e.is_usage());
        let msg = e.to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("my_custom"));
        assert!(msg.contains("gemini"));
    }

    #[test]
    fn test_load_profiles_config_missing_file() {
        use crate::ports::outbound::EnvResolver;
        use std::path::PathBuf;

        struct FixedEnv(PathBuf);
        impl EnvResolver for FixedEnv {
            fn resolve_home_dir(&self) -> Result<PathBuf, Error> {
                Ok(self.0.clone())
            }
            fn resolve_data_dir(&self) -> Result<PathBuf, Error> {
                Ok(self.0.clone())
            }
            fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
                Ok(self.0.join("profiles.json"))
            }
            fn var(&self, _name: &str) -> Option<String> {
                None
            }
            fn set_var(&self, _name: &str, _value: &str) {}
        }

        let dir = tempfile::TempDir::new().unwrap();
        let env = FixedEnv(dir.path().to_path_buf());
        assert!(load_profiles_config(&env).unwrap().is_none());

        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{ "default": "echo", "providers": { "echo": { "type": "echo" } } }"#,
        )
        .unwrap();
        let cfg = load_profiles_config(&env).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("echo"));

        std::fs::write(dir.path().join("profiles.json"), "not json").unwrap();
        assert!(load_profiles_config(&env).is_err());
    }
}
