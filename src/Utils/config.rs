//! Calculator settings read from an optional TOML file.
//!
//! ```toml
//! [calculator]
//! error_flash_ms = 700
//! double_click_ms = 400
//! no_variable_message = "No variable found"
//! invalid_expression_message = "Invalid expression."
//!
//! [logging]
//! level = "info"          # off, error, warn, info, debug, trace
//! console = true
//! file = "calc_{timestamp}.log"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.
use std::path::Path;
use std::time::Duration;

use simplelog::LevelFilter;
use thiserror::Error;
use toml::{Table, Value};

use crate::Utils::logger::LogSettings;

pub const DEFAULT_ERROR_FLASH_MS: u64 = 700;
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 400;
pub const DEFAULT_NO_VARIABLE_MESSAGE: &str = "No variable found";
pub const DEFAULT_INVALID_EXPRESSION_MESSAGE: &str = "Invalid expression.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// how long the error animation runs before the display reverts
    pub error_flash: Duration,
    /// two presses of the clear control closer than this are a double click
    pub double_click: Duration,
    pub no_variable_message: String,
    pub invalid_expression_message: String,
    pub logging: LogSettings,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            error_flash: Duration::from_millis(DEFAULT_ERROR_FLASH_MS),
            double_click: Duration::from_millis(DEFAULT_DOUBLE_CLICK_MS),
            no_variable_message: DEFAULT_NO_VARIABLE_MESSAGE.to_string(),
            invalid_expression_message: DEFAULT_INVALID_EXPRESSION_MESSAGE.to_string(),
            logging: LogSettings::default(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: format!("{}.{}", section, key),
        reason: reason.to_string(),
    }
}

fn lookup<'a>(table: &'a Table, section: &str, key: &str) -> Option<&'a Value> {
    table.get(section).and_then(|s| s.get(key))
}

fn get_millis(table: &Table, section: &str, key: &str) -> Result<Option<Duration>, ConfigError> {
    match lookup(table, section, key) {
        None => Ok(None),
        Some(Value::Integer(ms)) if *ms >= 0 => Ok(Some(Duration::from_millis(*ms as u64))),
        Some(Value::Integer(_)) => Err(invalid(section, key, "must not be negative")),
        Some(_) => Err(invalid(section, key, "expected an integer number of milliseconds")),
    }
}

fn get_string(table: &Table, section: &str, key: &str) -> Result<Option<String>, ConfigError> {
    match lookup(table, section, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(section, key, "expected a string")),
    }
}

fn get_bool(table: &Table, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    match lookup(table, section, key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(section, key, "expected true or false")),
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

impl CalculatorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: Table = text.parse()?;
        let mut config = CalculatorConfig::default();

        if let Some(flash) = get_millis(&table, "calculator", "error_flash_ms")? {
            config.error_flash = flash;
        }
        if let Some(window) = get_millis(&table, "calculator", "double_click_ms")? {
            config.double_click = window;
        }
        if let Some(message) = get_string(&table, "calculator", "no_variable_message")? {
            config.no_variable_message = message;
        }
        if let Some(message) = get_string(&table, "calculator", "invalid_expression_message")? {
            config.invalid_expression_message = message;
        }

        if let Some(level) = get_string(&table, "logging", "level")? {
            config.logging.level = parse_level(&level).ok_or_else(|| {
                invalid("logging", "level", "expected off, error, warn, info, debug or trace")
            })?;
        }
        if let Some(console) = get_bool(&table, "logging", "console")? {
            config.logging.console = console;
        }
        config.logging.file = get_string(&table, "logging", "file")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Defaults when no path is given, the file's settings otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
