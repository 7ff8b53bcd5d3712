//! Noticeboard backend: private per-user notes and a commented news feed
//! behind session authentication.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod news_seed;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
