use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so the only failure mode is a value that
/// does not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<Decimal>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_sign_negative() {
            return Err(invalid(var, "must not be negative".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("SHOPDESK_ENV", "development"));
    let log_level = or_default("SHOPDESK_LOG_LEVEL", "info");

    let max_combinations = parse_usize("SHOPDESK_MAX_COMBINATIONS", "500")?;
    if max_combinations == 0 {
        return Err(invalid(
            "SHOPDESK_MAX_COMBINATIONS",
            "must be at least 1".to_string(),
        ));
    }
    let default_price = parse_decimal("SHOPDESK_DEFAULT_PRICE", "0")?;
    let default_stock = parse_u32("SHOPDESK_DEFAULT_STOCK", "0")?;

    Ok(AppConfig {
        env,
        log_level,
        max_combinations,
        default_price,
        default_stock,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
