use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

pub const CONFIG_FILE: &str = "cardiaguard.toml";
pub const ENV_PREFIX: &str = "CARDIAGUARD_";

/// Environment variables consulted for the Gemini key when the layered
/// config leaves it empty, in priority order.
const API_KEY_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub llm: LLMConfig,
}

pub struct ConfigService;

impl ConfigService {
    /// Defaults, then `cardiaguard.toml`, then `CARDIAGUARD_*` variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<AppConfig> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!(error = %err, "Failed to read .env file");
            }
        }

        let mut config = Self::extract(Self::figment())?;
        config.llm.api_key =
            resolve_api_key(config.llm.api_key.take(), |name| std::env::var(name).ok());

        if config.llm.api_key.is_none() {
            warn!("No Gemini API key configured; analysis requests will fail");
        }
        info!(
            host = %config.server.host,
            port = config.server.port,
            model = %config.llm.model,
            "Configuration loaded"
        );

        Ok(config)
    }

    pub fn extract(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}

fn resolve_api_key<F>(configured: Option<String>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            API_KEY_FALLBACKS
                .iter()
                .filter_map(|name| lookup(name))
                .find(|key| !key.trim().is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    #[test]
    fn test_defaults() {
        let config = ConfigService::extract(base()).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.llm.model, "gemini-3-pro-preview");
        assert_eq!(config.llm.timeout_secs, 120);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = base().merge(Toml::string(
            r#"
            [server]
            port = 8088

            [llm]
            model = "gemini-2.5-flash"
            temperature = 0.2
            "#,
        ));
        let config = ConfigService::extract(figment).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.llm.temperature, Some(0.2));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let figment = base().merge(Toml::string("[llm]\nmodel = \"\"\n"));
        assert!(matches!(
            ConfigService::extract(figment),
            Err(AppError::ConfigError(_))
        ));

        let figment = base().merge(Toml::string("[server]\nport = 0\n"));
        assert!(ConfigService::extract(figment).is_err());
    }

    #[test]
    fn test_api_key_fallbacks() {
        let lookup = |name: &str| match name {
            "API_KEY" => Some("from-api-key".to_string()),
            _ => None,
        };
        assert_eq!(
            resolve_api_key(None, lookup),
            Some("from-api-key".to_string())
        );
        assert_eq!(
            resolve_api_key(Some("configured".to_string()), lookup),
            Some("configured".to_string())
        );
        assert_eq!(
            resolve_api_key(Some(" ".to_string()), |_| None),
            None
        );

        let both = |name: &str| Some(format!("key-{}", name));
        assert_eq!(
            resolve_api_key(None, both),
            Some("key-GEMINI_API_KEY".to_string())
        );
    }
}
