use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{PlatformConfig, Settings};
use crate::platforms::{PlatformAdapter, SberAdapter, VkAdapter, YandexAdapter};
use crate::services::conversation::{Backends, Dispatcher, Pagination, PostCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    dispatchers: Arc<HashMap<&'static str, Arc<Dispatcher>>>,
    pub posts: Arc<PostCache>,
}

impl AppState {
    /// One dispatcher per enabled platform, all sharing `backends`.
    pub fn new(settings: &Settings, backends: Backends) -> Self {
        let platforms = &settings.platforms;
        let candidates: [(&PlatformConfig, Arc<dyn PlatformAdapter>); 3] = [
            (&platforms.yandex, Arc::new(YandexAdapter::new(platforms.yandex.version.clone()))),
            (&platforms.vk, Arc::new(VkAdapter::new())),
            (&platforms.sber, Arc::new(SberAdapter::new())),
        ];

        let dispatchers = candidates
            .into_iter()
            .filter(|(config, _)| config.enabled)
            .map(|(config, adapter)| {
                let dispatcher = Dispatcher::new(adapter, backends.clone(), Pagination::from(config));
                (dispatcher.platform(), Arc::new(dispatcher))
            })
            .collect();

        Self {
            dispatchers: Arc::new(dispatchers),
            posts: backends.posts,
        }
    }

    pub fn dispatcher(&self, platform: &str) -> Option<Arc<Dispatcher>> {
        self.dispatchers.get(platform).cloned()
    }

    pub fn platforms(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.dispatchers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn active_users(&self) -> usize {
        self.dispatchers.values().map(|d| d.active_users()).sum()
    }
}
