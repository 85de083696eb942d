// Encore API library
// Decision: Router assembly lives in the library so integration tests can
// drive the same app the binary serves

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod openapi;
pub mod services;

pub use app::{build_app, build_router_with_prefix, AppContext};
pub use config::AppConfig;
