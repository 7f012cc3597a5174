use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub cache: CacheConfig,
    pub platforms: PlatformsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    /// Catalog feed returning `{"threads": [...]}`.
    pub url: String,
    /// Board root used to derive thread permalinks.
    pub board_url: String,
    pub fetch_timeout_seconds: u64,
    /// Lower-cased prefixes of rendered titles to hide from listings.
    #[serde(deserialize_with = "string_or_list")]
    pub blocked_title_prefixes: Vec<String>,
    /// Leading entries dropped after sorting (pinned threads).
    pub skip_first_n: usize,
}

impl CatalogConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlatformsConfig {
    pub yandex: PlatformConfig,
    pub vk: PlatformConfig,
    pub sber: PlatformConfig,
}

/// Per-platform pagination knobs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlatformConfig {
    pub enabled: bool,
    /// Threads per listing page.
    pub page_size: usize,
    pub char_budget_per_response: usize,
    pub post_separator_overhead_chars: usize,
    /// Posts from the previous turn repeated at the start of the next one.
    pub overlap_count: usize,
    /// Protocol version echoed back to the platform.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl PlatformConfig {
    pub fn with_budget(page_size: usize, char_budget_per_response: usize) -> Self {
        Self {
            enabled: true,
            page_size,
            char_budget_per_response,
            post_separator_overhead_chars: 0,
            overlap_count: 2,
            version: default_version(),
        }
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::One(joined) => joined.split(',').map(str::to_string).collect(),
        Raw::Many(items) => items,
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect())
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::builder()?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 1217_i64)?
            .set_default("catalog.url", "https://2ch.hk/b/catalog.json")?
            .set_default("catalog.board_url", "https://2ch.hk/b")?
            .set_default("catalog.fetch_timeout_seconds", 60_i64)?
            .set_default("catalog.blocked_title_prefixes", Vec::<String>::new())?
            .set_default("catalog.skip_first_n", 0_i64)?
            .set_default("cache.ttl_seconds", 3600_i64)?
            .set_default("cache.sweep_interval_seconds", 3600_i64)?;

        let defaults = [
            ("yandex", PlatformConfig::with_budget(10, 1024)),
            ("vk", PlatformConfig::with_budget(10, 5000)),
            ("sber", PlatformConfig::with_budget(10, 7000)),
        ];

        let mut builder = builder;
        for (name, platform) in defaults {
            let key = |field: &str| format!("platforms.{}.{}", name, field);
            builder = builder
                .set_default(key("enabled"), platform.enabled)?
                .set_default(key("page_size"), platform.page_size as i64)?
                .set_default(
                    key("char_budget_per_response"),
                    platform.char_budget_per_response as i64,
                )?
                .set_default(
                    key("post_separator_overhead_chars"),
                    platform.post_separator_overhead_chars as i64,
                )?
                .set_default(key("overlap_count"), platform.overlap_count as i64)?
                .set_default(key("version"), platform.version)?;
        }

        Ok(builder)
    }

    /// Settings built from defaults only.
    pub fn defaults() -> Result<Self> {
        let settings = Self::builder()?.build()?.try_deserialize()?;
        Ok(settings)
    }
}
