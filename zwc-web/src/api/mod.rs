//! HTTP API handlers for zwc-web

pub mod auth;
pub mod buildinfo;
pub mod dashboard;
pub mod health;
pub mod keybind;
pub mod wiring;

pub use auth::auth_middleware;
pub use buildinfo::get_build_info;
pub use dashboard::{get_dashboard, get_issue_url};
pub use health::health_routes;
pub use keybind::{get_keybind, post_keybind};
pub use wiring::{get_wiring, get_wiring_profiles, post_wiring};
