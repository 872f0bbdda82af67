use providers::RawLabel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Preferred label provider: `http`, `fixed` or `noop`.
    pub provider: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Labels served by the `fixed` provider.
    #[serde(default)]
    pub fixed_labels: Vec<RawLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub top_labels: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { top_labels: 5 }
    }
}

/// Loads `path` (or `config/default` when present), then applies
/// `GEMSTONE_`-prefixed environment overrides, e.g. `GEMSTONE_DATABASE__PATH`.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder()
        .set_default("database.path", "data/gemstone.db")?
        .set_default("classifier.provider", "fixed")?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("GEMSTONE")
            .prefix_separator("_")
            .separator("__"),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
