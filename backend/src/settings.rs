//! Application settings loaded via OrthoConfig.
//!
//! Values come from `NOTICEBOARD_*` environment variables, command-line flags
//! or a configuration file, in OrthoConfig's usual precedence.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::news::NEWS_COUNT_ON_HOME_PAGE;

const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the noticeboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTICEBOARD")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Number of news items shown on the news home page.
    pub news_page_size: Option<usize>,
    /// JSON file of news items loaded at startup.
    pub news_seed_path: Option<PathBuf>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Return the home page size, falling back to
    /// [`NEWS_COUNT_ON_HOME_PAGE`]. Zero is treated as unset.
    #[must_use]
    pub fn news_page_size(&self) -> usize {
        self.news_page_size
            .filter(|size| *size > 0)
            .unwrap_or(NEWS_COUNT_ON_HOME_PAGE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "NOTICEBOARD_BIND_ADDR",
        "NOTICEBOARD_NEWS_PAGE_SIZE",
        "NOTICEBOARD_NEWS_SEED_PATH",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("noticeboard")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("address"));
        assert_eq!(settings.news_page_size(), NEWS_COUNT_ON_HOME_PAGE);
        assert!(settings.news_seed_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("NOTICEBOARD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("NOTICEBOARD_NEWS_PAGE_SIZE", Some("3".to_owned())),
            (
                "NOTICEBOARD_NEWS_SEED_PATH",
                Some("/srv/news.json".to_owned()),
            ),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr(),
            "127.0.0.1:9000".parse().expect("address")
        );
        assert_eq!(settings.news_page_size(), 3);
        assert_eq!(
            settings.news_seed_path,
            Some(PathBuf::from("/srv/news.json"))
        );
    }

    #[rstest]
    fn zero_page_size_falls_back_to_default() {
        let settings = AppSettings {
            bind_addr: None,
            news_page_size: Some(0),
            news_seed_path: None,
        };
        assert_eq!(settings.news_page_size(), NEWS_COUNT_ON_HOME_PAGE);
    }
}
