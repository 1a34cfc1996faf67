//! NuGet v2 download endpoints

pub mod symbol_packages;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v2 API router
pub fn create_v2_router() -> Router<AppState> {
    Router::new().route(
        "/symbolpackage/{id}/{version}",
        get(symbol_packages::download_symbol_package),
    )
}
