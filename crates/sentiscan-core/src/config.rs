use crate::app_config::{AppConfig, ClassifierBackend};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Source credentials are optional here; a missing credential only fails the
/// fetcher that needs it (see [`AppConfig::reddit_credentials`]).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("SENTISCAN_LOG_LEVEL", "info");
    let output_path = PathBuf::from(or_default("SENTISCAN_OUTPUT_PATH", "sentimentvalue.json"));

    let classifier = or_default("SENTISCAN_CLASSIFIER", "tei")
        .parse::<ClassifierBackend>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "SENTISCAN_CLASSIFIER".to_string(),
            reason,
        })?;
    let tei_url = or_default("SENTISCAN_TEI_URL", "http://localhost:8080");

    let request_timeout_secs = parse_u64("SENTISCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SENTISCAN_USER_AGENT", "sentiscan/0.1 (keyword-sentiment)");
    let source_limit = parse_usize("SENTISCAN_SOURCE_LIMIT", "100")?;
    if source_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTISCAN_SOURCE_LIMIT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        output_path,
        classifier,
        tei_url,
        request_timeout_secs,
        user_agent,
        source_limit,
        reddit_client_id: optional("REDDIT_CLIENT_ID"),
        reddit_client_secret: optional("REDDIT_CLIENT_SECRET"),
        reddit_username: optional("REDDIT_USERNAME"),
        reddit_password: optional("REDDIT_PASSWORD"),
        twitter_consumer_key: optional("TWITTER_CONSUMER_KEY"),
        twitter_consumer_secret: optional("TWITTER_CONSUMER_SECRET"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
