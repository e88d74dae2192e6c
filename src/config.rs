use crate::core::constants::DEFAULT_ROSTER;
use crate::core::errors::SplitshotError;
use crate::core::models::User;
use crate::core::settlement::validate_roster;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub log_level: String,
    /// `id:name` pairs separated by commas
    pub roster_spec: String,
    pub report_title: String,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            roster_spec: env::var("ROSTER").unwrap_or_else(|_| DEFAULT_ROSTER.to_string()),
            report_title: env::var("REPORT_TITLE").unwrap_or_else(|_| "Shared Expenses Report".to_string()),
        }
    }

    pub fn roster(&self) -> Result<Vec<User>, SplitshotError> {
        parse_roster(&self.roster_spec)
    }
}

/// Parses `"1:Juan,2:María"` into a validated roster.
pub fn parse_roster(spec: &str) -> Result<Vec<User>, SplitshotError> {
    let roster = spec
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<User, SplitshotError> {
            let (id, name) = entry
                .split_once(':')
                .ok_or_else(|| SplitshotError::ConfigError(format!("Roster entry `{}` is not `id:name`", entry)))?;
            let (id, name) = (id.trim(), name.trim());
            if id.is_empty() || name.is_empty() {
                return Err(SplitshotError::ConfigError(format!(
                    "Roster entry `{}` has an empty id or name",
                    entry
                )));
            }
            Ok(User::new(id, name))
        })
        .collect::<Result<Vec<User>, SplitshotError>>()?;

    validate_roster(&roster)?;
    Ok(roster)
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
