//! HTTP inbound adapter exposing the notes, news and account endpoints.

pub mod accounts;
pub mod error;
pub mod forms;
pub mod health;
pub mod login_redirect;
pub mod news;
pub mod notes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every application route group.
///
/// Health probes are mounted separately by the server because they carry
/// their own state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(notes::configure)
        .configure(news::configure)
        .configure(accounts::configure);
}
