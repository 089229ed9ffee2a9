use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationError};

use log::warn;

use crate::geonis::i18n::ENV_LANGUAGE;
use crate::geonis::{consts, FixedLanguage, Language, LanguageCache, LanguageSource};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Connection settings of a ClickHouse database holding GEONIS tables
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickHouseSettings {
    /// HTTP endpoint, e.g. `http://localhost:8123`
    #[validate(length(min = 1, message = "ClickHouse URL cannot be empty"))]
    pub url: String,

    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Database (workspace) containing the GEONIS tables
    #[validate(length(min = 1, message = "ClickHouse database cannot be empty"))]
    pub database: String,
}

impl ClickHouseSettings {
    /// Settings from `CLICKHOUSE_URL`, `CLICKHOUSE_USER`, `CLICKHOUSE_PASSWORD`
    /// and `CLICKHOUSE_DATABASE`; `None` unless all are set
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: env::var("CLICKHOUSE_URL").ok()?,
            user: env::var("CLICKHOUSE_USER").ok()?,
            password: env::var("CLICKHOUSE_PASSWORD").ok()?,
            database: env::var("CLICKHOUSE_DATABASE").ok()?,
        })
    }
}

/// gntools configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
pub struct GntoolsConfig {
    /// Solution code whose definition table is read (e.g. `ele`)
    #[validate(custom(function = "validate_solution"))]
    #[serde(default = "default_solution")]
    pub solution: String,

    /// GEONIS language; when unset it is read from `GNTOOLS_LANGUAGE` once
    /// per process
    #[serde(default)]
    pub language: Option<Language>,

    /// YAML workspace snapshot to read tables from
    #[serde(default)]
    pub workspace: Option<PathBuf>,

    /// ClickHouse database to read tables from when no snapshot is given
    #[validate(nested)]
    #[serde(default)]
    pub clickhouse: Option<ClickHouseSettings>,
}

fn default_solution() -> String {
    consts::MEDIA_ELECTRIC.to_lowercase()
}

fn validate_solution(solution: &str) -> Result<(), ValidationError> {
    let code = solution.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("solution");
        err.message = Some("Solution must be a non-empty alphanumeric code".into());
        return Err(err);
    }
    Ok(())
}

impl Default for GntoolsConfig {
    fn default() -> Self {
        Self {
            solution: default_solution(),
            language: None,
            workspace: None,
            clickhouse: None,
        }
    }
}

impl GntoolsConfig {
    /// Create configuration from environment variables with validation.
    ///
    /// An unrecognised `GNTOOLS_LANGUAGE` leaves the language unset, so the
    /// description field falls back to German.
    pub fn from_env() -> Result<Self, ConfigError> {
        let language = env::var(ENV_LANGUAGE).ok().and_then(|code| {
            let language = Language::from_code(&code);
            if language.is_none() {
                warn!("Unknown GEONIS language '{}' in {}, using German", code, ENV_LANGUAGE);
            }
            language
        });

        let config = Self {
            solution: env::var("GNTOOLS_SOLUTION").unwrap_or_else(|_| default_solution()),
            language,
            workspace: env::var("GNTOOLS_WORKSPACE").ok().map(PathBuf::from),
            clickhouse: ClickHouseSettings::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation.
    ///
    /// The base comes from `cli.config` when given, from the environment
    /// otherwise; options set on the command line win over both.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::from_env()?,
        };

        if let Some(solution) = cli.solution {
            config.solution = solution;
        }
        if let Some(language) = cli.language {
            config.language = Some(parse_value("language", language)?);
        }
        if cli.workspace.is_some() {
            config.workspace = cli.workspace;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Language source for name resolution: a fixed language when one is
    /// configured, the process-wide language otherwise
    pub fn language_source(&self) -> LanguageSource {
        match self.language {
            Some(language) => LanguageSource::new(
                Arc::new(LanguageCache::new()),
                Arc::new(FixedLanguage(Some(language))),
            ),
            None => LanguageSource::process(),
        }
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub solution: Option<String>,
    pub language: Option<String>,
    pub workspace: Option<PathBuf>,
}

fn parse_value<T: std::str::FromStr>(field: &str, value: String) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Parse {
        field: field.to_string(),
        source: e.to_string().into(),
        value,
    })
}
