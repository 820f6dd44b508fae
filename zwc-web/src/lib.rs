//! zwc-web library - Zynthian web configurator
//!
//! Dashboard, hardware wiring and keyboard binding pages served as JSON.
//! Every request reads the appliance state afresh; nothing is cached between
//! requests.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use zwc_common::config::Settings;
use zwc_common::{CommandRunner, EnvStore};

pub mod api;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod keybind;
pub mod status;
pub mod wiring;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Appliance configuration environment (read-only)
    pub env: Arc<dyn EnvStore>,
    pub runner: CommandRunner,
}

impl AppState {
    /// Create new application state; external programs get the configured
    /// probe timeout
    pub fn new(settings: Settings, env: Arc<dyn EnvStore>) -> Self {
        let runner = CommandRunner::new(settings.probe_timeout);
        Self {
            settings: Arc::new(settings),
            env,
            runner,
        }
    }

    /// Whether protected routes require a session cookie
    pub fn session_required(&self) -> bool {
        self.settings
            .session_token
            .as_deref()
            .map(|token| !token.is_empty())
            .unwrap_or(false)
    }
}

/// Build application router
///
/// Health and build info are public; every page route goes through the
/// session check.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let protected = Router::new()
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/dashboard/issue-url", get(api::get_issue_url))
        .route(
            "/api/hw-wiring",
            get(api::get_wiring).post(api::post_wiring),
        )
        .route("/api/hw-wiring/profiles", get(api::get_wiring_profiles))
        .route(
            "/api/ui-keybind",
            get(api::get_keybind).post(api::post_keybind),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    let public = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
