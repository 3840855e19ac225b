//! LLM provider implementations for mnemo.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use mnemo_config::AppConfig;
use mnemo_core::error::ProviderError;
use mnemo_core::provider::Provider;
use std::sync::Arc;

/// Build the model transport named by the configuration.
///
/// `base_url` overrides the provider's default endpoint when set; the API
/// key defaults to a placeholder for local servers that ignore it.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config.api_key.clone().unwrap_or_else(|| "none".into());
    let base_url = config.base_url.as_deref();

    let provider: Arc<dyn Provider> = match config.provider.as_str() {
        "lmstudio" => Arc::new(OpenAiCompatProvider::lmstudio(base_url)),
        "ollama" => Arc::new(OpenAiCompatProvider::ollama(base_url)),
        "openai" => {
            if config.api_key.is_none() {
                return Err(ProviderError::NotConfigured(
                    "openai provider requires an API key (MNEMO_API_KEY)".into(),
                ));
            }
            Arc::new(OpenAiCompatProvider::openai(api_key))
        }
        other => {
            return Err(ProviderError::NotConfigured(format!(
                "unsupported provider: {other}"
            )))
        }
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_local_provider_without_api_key() {
        let config = AppConfig::default();
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "lmstudio");
    }

    #[test]
    fn openai_requires_api_key() {
        let config = AppConfig {
            provider: "openai".into(),
            ..AppConfig::default()
        };
        assert!(build_from_config(&config).is_err());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = AppConfig {
            provider: "magic".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            build_from_config(&config),
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
