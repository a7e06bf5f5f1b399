use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub range: RangeConfig,
}

/// Scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Pause before each paginated match-listing fetch.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    #[serde(default = "default_page_jitter_ms")]
    pub page_jitter_ms: u64,
}

/// Windowed (day-by-day) scrape configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RangeConfig {
    /// Width of each per-day scrape window, in days.
    #[serde(default = "default_width_days")]
    pub width_days: i64,

    /// Pause between per-day scrapes.
    #[serde(default = "default_window_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_window_jitter_ms")]
    pub jitter_ms: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://www.hltv.org/stats".to_string()
}
fn default_page_delay_ms() -> u64 {
    5000
}
fn default_page_jitter_ms() -> u64 {
    1000
}
fn default_width_days() -> i64 {
    30
}
fn default_window_delay_ms() -> u64 {
    3000
}
fn default_window_jitter_ms() -> u64 {
    500
}
fn default_true() -> bool {
    true
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("HLTV").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig {
                base_url: default_base_url(),
                headless: true,
                page_delay_ms: default_page_delay_ms(),
                page_jitter_ms: default_page_jitter_ms(),
            },
            range: RangeConfig {
                width_days: default_width_days(),
                delay_ms: default_window_delay_ms(),
                jitter_ms: default_window_jitter_ms(),
            },
        }
    }
}
