//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `faqmatch.toml` +
//! `faqmatch.<env>.toml` + `FAQMATCH_*` env vars. Provides helpers to expand
//! `~` and `${VAR}` and to resolve relative paths against a known base
//! directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::QueryClass;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file("faqmatch.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("faqmatch.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("faqmatch.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("faqmatch.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FAQMATCH_").split("__"));

        let config = Self { figment };
        config.engine()?;
        Ok(config)
    }

    /// Defaults overlaid with an inline TOML document. No files or env vars.
    pub fn from_toml_str(toml: &str) -> Self {
        let figment = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::string(toml));
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// The typed engine settings, validated.
    pub fn engine(&self) -> Result<EngineConfig> {
        let engine: EngineConfig = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        engine.validate()?;
        Ok(engine)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub data: DataConfig,
    pub thresholds: Thresholds,
    pub weights: ClassWeights,
    pub cache: CacheConfig,
    pub semantic: SemanticConfig,
    pub linguistics: LinguisticsConfig,
    /// Curated domain keywords, keyed by lowercased category name.
    pub vocabulary: BTreeMap<String, Vec<String>>,
    pub help_topics: Vec<String>,
    pub max_suggestions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            thresholds: Thresholds::default(),
            weights: ClassWeights::default(),
            cache: CacheConfig::default(),
            semantic: SemanticConfig::default(),
            linguistics: LinguisticsConfig::default(),
            vocabulary: default_vocabulary(),
            help_topics: ["admissions", "academics", "fees", "scholarships", "examinations"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_suggestions: 3,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("direct", t.direct),
            ("clarify", t.clarify),
            ("fast_path", t.fast_path),
            ("suggestion_floor", t.suggestion_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("thresholds.{} must be within [0, 1], got {}", name, value)));
            }
        }
        if t.clarify >= t.direct {
            return Err(Error::InvalidConfig(format!(
                "thresholds.clarify ({}) must be below thresholds.direct ({})",
                t.clarify, t.direct
            )));
        }
        for class in [QueryClass::Short, QueryClass::Normal, QueryClass::Complex] {
            let w = self.weights.for_class(class);
            let parts = [w.semantic, w.fuzzy, w.keyword, w.category];
            if parts.iter().any(|p| *p < 0.0) {
                return Err(Error::InvalidConfig(format!("negative weight for {:?} queries", class)));
            }
            let sum: f32 = parts.iter().sum();
            if (sum - 1.0).abs() > 1e-3 {
                return Err(Error::InvalidConfig(format!("weights for {:?} queries sum to {}, expected 1.0", class, sum)));
            }
        }
        if self.cache.capacity == 0 {
            return Err(Error::InvalidConfig("cache.capacity must be at least 1".to_string()));
        }
        if self.semantic.ngram_max == 0 {
            return Err(Error::InvalidConfig("semantic.ngram_max must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Curated keywords for a record category, if any.
    ///
    /// Vocabulary keys match a category case-insensitively, also when one is
    /// the plural of the other ("admission" / "Admissions").
    pub fn category_keywords(&self, category: &str) -> Option<&[String]> {
        let category = category.trim().to_lowercase();
        self.vocabulary
            .iter()
            .find(|(key, _)| {
                let key = key.to_lowercase();
                key == category || key.trim_end_matches('s') == category.trim_end_matches('s')
            })
            .map(|(_, words)| words.as_slice())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub corpus_path: String,
}

impl Default for DataConfig {
    fn default() -> Self { Self { corpus_path: "university_faq_chatbot.json".to_string() } }
}

impl DataConfig {
    pub fn resolved_corpus_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.corpus_path) }
}

/// Cascade cut-offs. All comparisons are strict (`score > threshold`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    pub direct: f32,
    pub clarify: f32,
    pub fast_path: f32,
    pub suggestion_floor: f32,
}

impl Default for Thresholds {
    fn default() -> Self { Self { direct: 0.3, clarify: 0.15, fast_path: 0.5, suggestion_floor: 0.1 } }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignalWeights {
    pub semantic: f32,
    pub fuzzy: f32,
    pub keyword: f32,
    pub category: f32,
}

impl SignalWeights {
    pub const fn new(semantic: f32, fuzzy: f32, keyword: f32, category: f32) -> Self {
        Self { semantic, fuzzy, keyword, category }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassWeights {
    pub short: SignalWeights,
    pub normal: SignalWeights,
    pub complex: SignalWeights,
}

impl Default for ClassWeights {
    fn default() -> Self {
        Self {
            short: SignalWeights::new(0.20, 0.30, 0.40, 0.10),
            normal: SignalWeights::new(0.40, 0.25, 0.25, 0.10),
            complex: SignalWeights::new(0.50, 0.20, 0.20, 0.10),
        }
    }
}

impl ClassWeights {
    pub fn for_class(&self, class: QueryClass) -> &SignalWeights {
        match class {
            QueryClass::Short => &self.short,
            QueryClass::Normal => &self.normal,
            QueryClass::Complex => &self.complex,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self { Self { capacity: 1024 } }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    pub enabled: bool,
    pub max_features: usize,
    /// Terms present in more than this fraction of records are dropped.
    pub max_df: f32,
    pub ngram_max: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self { Self { enabled: true, max_features: 1000, max_df: 0.9, ngram_max: 2 } }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinguisticsConfig {
    pub enabled: bool,
}

impl Default for LinguisticsConfig {
    fn default() -> Self { Self { enabled: true } }
}

fn default_vocabulary() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 8] = [
        ("admissions", &["admission", "admissions", "apply", "application", "eligibility", "requirements", "criteria", "entry"]),
        ("academic", &["gpa", "cgpa", "grade", "grades", "credit", "course", "courses", "semester", "attendance"]),
        ("fees", &["fee", "fees", "tuition", "payment", "installment", "charges", "cost"]),
        ("scholarships", &["scholarship", "scholarships", "financial", "aid", "merit", "waiver"]),
        ("examinations", &["exam", "exams", "examination", "midterm", "final", "result", "results"]),
        ("transport", &["transport", "bus", "shuttle", "route", "pickup"]),
        ("hostel", &["hostel", "accommodation", "housing", "residence", "dorm"]),
        ("general", &["contact", "campus", "location", "timings"]),
    ];
    entries
        .iter()
        .map(|(category, words)| (category.to_string(), words.iter().map(|w| w.to_string()).collect()))
        .collect()
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
