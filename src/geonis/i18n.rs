//! GEONIS language selection.
//!
//! The language decides which description field a solution exposes. It is
//! determined once per process and then reused forever: the first call to
//! [`LanguageCache::get_or_init`] asks a [`LanguageProvider`], every later
//! call returns the stored answer, even if the provider would now answer
//! differently. An unknown language is cached as well.
//!
//! [`LanguageSource::process`] pairs the process-wide cache with the
//! environment provider. Tests and embedders can inject their own cache and
//! provider through [`LanguageSource::new`].

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use super::consts::description;

/// Environment variable read by [`EnvLanguageProvider`]
pub const ENV_LANGUAGE: &str = "GNTOOLS_LANGUAGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "c")]
    Custom,
    #[serde(alias = "de")]
    German,
    #[serde(alias = "en")]
    English,
    #[serde(alias = "fr")]
    French,
    #[serde(alias = "it")]
    Italian,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Custom,
        Language::German,
        Language::English,
        Language::French,
        Language::Italian,
    ];

    /// Short GEONIS language code
    pub fn code(self) -> &'static str {
        match self {
            Language::Custom => "custom",
            Language::German => "de",
            Language::English => "en",
            Language::French => "fr",
            Language::Italian => "it",
        }
    }

    /// Accepts the short code or the English name, ignoring case
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "custom" | "c" => Some(Language::Custom),
            "de" | "german" => Some(Language::German),
            "en" | "english" => Some(Language::English),
            "fr" | "french" => Some(Language::French),
            "it" | "italian" => Some(Language::Italian),
            _ => None,
        }
    }

    pub fn description_field(self) -> &'static str {
        match self {
            Language::Custom => description::CUSTOM,
            Language::German => description::DE,
            Language::English => description::EN,
            Language::French => description::FR,
            Language::Italian => description::IT,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unknown GEONIS language '{}'", s))
    }
}

/// Description field for an optional language; German when unknown
pub fn description_field(language: Option<Language>) -> &'static str {
    language
        .map(Language::description_field)
        .unwrap_or(description::DE)
}

/// Answers which language GEONIS runs in (`None` when it cannot tell)
pub trait LanguageProvider: Send + Sync {
    fn get_language(&self) -> Option<Language>;
}

/// Reads the language code from an environment variable
#[derive(Debug, Clone)]
pub struct EnvLanguageProvider {
    var: String,
}

impl EnvLanguageProvider {
    pub fn new(var: impl Into<String>) -> Self {
        EnvLanguageProvider { var: var.into() }
    }
}

impl Default for EnvLanguageProvider {
    fn default() -> Self {
        Self::new(ENV_LANGUAGE)
    }
}

impl LanguageProvider for EnvLanguageProvider {
    fn get_language(&self) -> Option<Language> {
        env::var(&self.var)
            .ok()
            .and_then(|code| Language::from_code(&code))
    }
}

/// Always answers the same language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLanguage(pub Option<Language>);

impl LanguageProvider for FixedLanguage {
    fn get_language(&self) -> Option<Language> {
        self.0
    }
}

/// Compute-once store for the current language
#[derive(Debug, Default)]
pub struct LanguageCache {
    cell: OnceLock<Option<Language>>,
}

impl LanguageCache {
    pub const fn new() -> Self {
        LanguageCache {
            cell: OnceLock::new(),
        }
    }

    /// Stored language, asking `provider` only if nothing is stored yet
    pub fn get_or_init(&self, provider: &dyn LanguageProvider) -> Option<Language> {
        *self.cell.get_or_init(|| {
            let language = provider.get_language();
            debug!("GEONIS language determined: {:?}", language);
            language
        })
    }

    /// Stored language, if it has been determined
    pub fn get(&self) -> Option<Option<Language>> {
        self.cell.get().copied()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

lazy_static! {
    /// Language of this process, shared by every solution definition
    static ref PROCESS_LANGUAGE: Arc<LanguageCache> = Arc::new(LanguageCache::new());
}

/// Cache plus the provider used to fill it
#[derive(Clone)]
pub struct LanguageSource {
    cache: Arc<LanguageCache>,
    provider: Arc<dyn LanguageProvider>,
}

impl LanguageSource {
    pub fn new(cache: Arc<LanguageCache>, provider: Arc<dyn LanguageProvider>) -> Self {
        LanguageSource { cache, provider }
    }

    /// Process-wide cache filled from [`ENV_LANGUAGE`]
    pub fn process() -> Self {
        Self::new(
            PROCESS_LANGUAGE.clone(),
            Arc::new(EnvLanguageProvider::default()),
        )
    }

    /// Private cache that will always hold `language`
    pub fn fixed(language: Option<Language>) -> Self {
        Self::new(Arc::new(LanguageCache::new()), Arc::new(FixedLanguage(language)))
    }

    pub fn language(&self) -> Option<Language> {
        self.cache.get_or_init(self.provider.as_ref())
    }

    pub fn description_field(&self) -> &'static str {
        description_field(self.language())
    }

    pub fn cache(&self) -> &Arc<LanguageCache> {
        &self.cache
    }
}

impl fmt::Debug for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageSource")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
