//! # tt-api
//!
//! The web routing and orchestration layer for TripTogether.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the discover surface and its JSON twin.
///
/// # Developer Note
/// Kept as a `ServiceConfig` hook so the binary and the handler tests mount
/// exactly the same routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/", web::get().to(handlers::index))
            .route("/discover", web::get().to(handlers::discover))
            .route("/discover/reload", web::post().to(handlers::reload))
            .route("/sign-out", web::post().to(handlers::sign_out))
            .route("/api/trips", web::get().to(handlers::list_trips))
            .route("/api/categories", web::get().to(handlers::list_categories))
            .route("/api/options", web::get().to(handlers::list_options))
            .route("/api/session", web::get().to(handlers::session_status))
            .route("/api/status", web::get().to(handlers::discovery_status)),
    );
}
