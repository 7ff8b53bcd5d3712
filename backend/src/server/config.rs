//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use noticeboard::domain::news::NEWS_COUNT_ON_HOME_PAGE;

use super::state_builders::AppStores;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) news_page_size: usize,
    pub(crate) stores: AppStores,
}

impl ServerConfig {
    /// Construct a server configuration with empty stores and the default
    /// news page size.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            news_page_size: NEWS_COUNT_ON_HOME_PAGE,
            stores: AppStores::default(),
        }
    }

    /// Override the number of news items on the news home page.
    #[must_use]
    pub fn with_news_page_size(mut self, news_page_size: usize) -> Self {
        self.news_page_size = news_page_size;
        self
    }

    /// Serve from `stores`, typically after seeding them.
    #[must_use]
    pub fn with_stores(mut self, stores: AppStores) -> Self {
        self.stores = stores;
        self
    }
}
