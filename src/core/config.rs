use std::env;

use thiserror::Error;

use crate::schemas::exam::SchoolInfo;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Environment-driven settings for the render CLI and any embedding host.
/// Everything has a default; only malformed values error.
#[derive(Debug, Clone)]
pub struct Settings {
    school: SchoolSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct SchoolSettings {
    pub school_name: String,
    pub school_address: String,
    pub academic_session: String,
    pub current_term: String,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let school = SchoolSettings {
            school_name: env_or_default("EXAMCRAFT_SCHOOL_NAME", "School Name"),
            school_address: env_or_default("EXAMCRAFT_SCHOOL_ADDRESS", "School Address"),
            academic_session: env_or_default("EXAMCRAFT_ACADEMIC_SESSION", "Academic Session"),
            current_term: env_or_default("EXAMCRAFT_CURRENT_TERM", "Term"),
        };

        let log_level = env_or_default("EXAMCRAFT_LOG_LEVEL", "info");
        let json = match env_optional("EXAMCRAFT_LOG_JSON") {
            Some(raw) => parse_bool("EXAMCRAFT_LOG_JSON", &raw)?,
            None => false,
        };

        Ok(Self { school, telemetry: TelemetrySettings { log_level, json } })
    }

    pub fn school(&self) -> &SchoolSettings {
        &self.school
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    /// The settings object handed to the document generator.
    pub fn school_info(&self) -> SchoolInfo {
        SchoolInfo {
            school_name: self.school.school_name.clone(),
            school_address: self.school.school_address.clone(),
            academic_session: self.school.academic_session.clone(),
            current_term: self.school.current_term.clone(),
        }
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { field, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "ON").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
