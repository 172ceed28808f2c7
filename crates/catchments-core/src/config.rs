use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Kept separate from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let optional_url = |var: &str| -> Result<Option<String>, ConfigError> {
        match lookup(var) {
            Ok(raw) => {
                let raw = raw.trim();
                if raw.starts_with("http://") || raw.starts_with("https://") {
                    Ok(Some(raw.to_string()))
                } else {
                    Err(ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: format!("expected an http(s) URL, got '{raw}'"),
                    })
                }
            }
            Err(_) => Ok(None),
        }
    };

    let log_level = or_default("CATCHMENTS_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("CATCHMENTS_OUTPUT_DIR", "."));
    let request_timeout_secs = optional_u64("CATCHMENTS_REQUEST_TIMEOUT_SECS")?;
    let user_agent = or_default("CATCHMENTS_USER_AGENT", "catchments/0.1");
    let skobbler_base_url = optional_url("CATCHMENTS_SKOBBLER_BASE_URL")?;
    let here_base_url = optional_url("CATCHMENTS_HERE_BASE_URL")?;

    Ok(AppConfig {
        log_level,
        output_dir,
        request_timeout_secs,
        user_agent,
        skobbler_base_url,
        here_base_url,
    })
}
