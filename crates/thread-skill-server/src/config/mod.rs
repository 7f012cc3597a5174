pub mod settings;

pub use settings::{CacheConfig, CatalogConfig, PlatformConfig, PlatformsConfig, ServerConfig, Settings};
