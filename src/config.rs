//! Configuration loader — merges env vars, .env file, and config.toml.

use common::config::LookupConfig;
use common::Error;
use std::path::{Path, PathBuf};

/// Largest accepted adjustment, in minutes, either direction.
const MAX_ADJUSTMENT_MINUTES: i64 = 720;

fn parse_minutes(raw: &str, env_name: &str) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::Config(format!("{env_name} must be a whole number of minutes")))
}

fn validate_config(config: &LookupConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.city.trim().is_empty() {
        issues.push("city must not be empty".into());
    }
    if config.zone.trim().parse::<chrono_tz::Tz>().is_err() {
        issues.push(format!("zone {:?} is not a known IANA time zone", config.zone));
    }
    if let Some(path) = &config.data_path {
        if !path.is_file() {
            issues.push(format!("data_path {} does not exist", path.display()));
        }
    }
    for (name, minutes) in config.adjustments.entries() {
        if minutes.abs() > MAX_ADJUSTMENT_MINUTES {
            issues.push(format!(
                "adjustments.{name} must be within ±{MAX_ADJUSTMENT_MINUTES} minutes"
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply `LONDON_TIMES_*` overrides; `var` reads one variable.
fn apply_env_overrides<F>(config: &mut LookupConfig, var: F) -> Result<(), Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(city) = var("LONDON_TIMES_CITY") {
        config.city = city.trim().to_string();
    }
    if let Some(zone) = var("LONDON_TIMES_ZONE") {
        config.zone = zone.trim().to_string();
    }
    if let Some(path) = var("LONDON_TIMES_DATA") {
        let trimmed = path.trim();
        config.data_path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
    }

    let prayers = ["fajr", "sunrise", "dhuhr", "asr", "maghrib", "isha"];
    for name in prayers {
        let env_name = format!("LONDON_TIMES_ADJUST_{}", name.to_ascii_uppercase());
        if let Some(raw) = var(&env_name) {
            let minutes = parse_minutes(&raw, &env_name)?;
            if let Some(slot) = config.adjustments.slot_mut(name) {
                *slot = minutes;
            }
        }
    }

    Ok(())
}

/// Load lookup configuration from environment and optional config file.
pub fn load_config() -> Result<LookupConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = LookupConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    validate_config(&config)?;

    Ok(config)
}
