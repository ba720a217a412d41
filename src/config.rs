use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Healio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-pro";
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEEPSEEK_DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "healio=info,healio_lib=info,tower_http=info"
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Connection settings for one text-generation provider.
///
/// `api_key` is `None` when the credential is absent from the environment;
/// such providers are left out of the fallback chain.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ProviderSettings {
    fn from_env(key_var: &'static str, prefix: &str, base_url: &str, model: &str) -> Self {
        Self {
            api_key: non_empty_var(key_var),
            base_url: non_empty_var(&format!("{prefix}_BASE_URL"))
                .unwrap_or_else(|| base_url.to_string()),
            model: non_empty_var(&format!("{prefix}_MODEL")).unwrap_or_else(|| model.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub provider_timeout: Duration,
    pub session_ttl: Duration,
    pub gemini: ProviderSettings,
    pub openai: ProviderSettings,
    pub deepseek: ProviderSettings,
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw =
            non_empty_var("HEALIO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: "HEALIO_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            bind_addr,
            provider_timeout: Duration::from_secs(secs_var(
                "HEALIO_PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )?),
            session_ttl: Duration::from_secs(secs_var(
                "HEALIO_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
            gemini: ProviderSettings::from_env(
                "GOOGLE_AI_KEY",
                "GEMINI",
                GEMINI_DEFAULT_BASE_URL,
                GEMINI_DEFAULT_MODEL,
            ),
            openai: ProviderSettings::from_env(
                "OPENAI_API_KEY",
                "OPENAI",
                OPENAI_DEFAULT_BASE_URL,
                OPENAI_DEFAULT_MODEL,
            ),
            deepseek: ProviderSettings::from_env(
                "DEEPSEEK_API_KEY",
                "DEEPSEEK",
                DEEPSEEK_DEFAULT_BASE_URL,
                DEEPSEEK_DEFAULT_MODEL,
            ),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A positive number of seconds. Zero would expire every call or session at once.
fn secs_var(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match non_empty_var(var) {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidValue { var, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_healio() {
        assert_eq!(APP_NAME, "Healio");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn secs_var_falls_back_to_default() {
        let secs = secs_var("HEALIO_TEST_UNSET_TIMEOUT_VAR", 42).unwrap();
        assert_eq!(secs, 42);
    }

    #[test]
    fn secs_var_rejects_zero_and_garbage() {
        std::env::set_var("HEALIO_TEST_ZERO_SECS_VAR", "0");
        assert!(matches!(
            secs_var("HEALIO_TEST_ZERO_SECS_VAR", 60),
            Err(ConfigError::InvalidValue { value, .. }) if value == "0"
        ));

        std::env::set_var("HEALIO_TEST_WORDY_SECS_VAR", "sixty");
        assert!(secs_var("HEALIO_TEST_WORDY_SECS_VAR", 60).is_err());

        std::env::set_var("HEALIO_TEST_GOOD_SECS_VAR", " 15 ");
        assert_eq!(secs_var("HEALIO_TEST_GOOD_SECS_VAR", 60).unwrap(), 15);
    }

    #[test]
    fn provider_without_key_is_not_configured() {
        let settings = ProviderSettings::from_env(
            "HEALIO_TEST_UNSET_KEY_VAR",
            "HEALIO_TEST_UNSET_PREFIX",
            "http://localhost:1",
            "model-x",
        );
        assert!(!settings.is_configured());
        assert_eq!(settings.base_url, "http://localhost:1");
        assert_eq!(settings.model, "model-x");
    }

    #[test]
    fn default_log_filter_targets_crate() {
        assert!(default_log_filter().contains("healio"));
    }
}
