// Library exports for the API binary, tools and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use middleware::auth::JwtSecret;
use services::booking::BookingContext;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn booking_context(&self) -> BookingContext {
        BookingContext {
            today: self.config.today(),
            window_months: self.config.booking_window_months,
        }
    }
}

fn cors_layer(base_url: &str) -> CorsLayer {
    // Allow the app base domain and its subdomains; localhost is always allowed.
    let base = base_url.to_string();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        if o == base {
            return true;
        }
        if let Some(idx) = base.find("://") {
            let after_scheme = &base[idx + 3..];
            let domain = after_scheme.split('/').next().unwrap_or(after_scheme);
            let domain_clean = domain.split(':').next().unwrap_or(domain);
            if o.ends_with(&format!(".{domain_clean}")) {
                return true;
            }
        }
        false
    });

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin)
}

pub fn build_router(state: AppState) -> Router {
    let jwt_secret = JwtSecret(state.config.jwt_secret.clone());
    let cors = cors_layer(&state.config.app_base_url);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Chef profile
        .route(
            "/chef/profile",
            get(routes::chef::get_profile).put(routes::chef::update_profile),
        )
        .route("/chef/dashboard", get(routes::chef::dashboard))
        .route("/chef/share-link", get(routes::chef::share_link))
        // Chef calendar
        .route(
            "/chef/schedule",
            get(routes::schedule::get_week).put(routes::schedule::toggle_slot),
        )
        // Dishes
        .route("/dishes", get(routes::dishes::list_dishes).post(routes::dishes::create_dish))
        .route(
            "/dishes/{id}",
            put(routes::dishes::update_dish).delete(routes::dishes::delete_dish),
        )
        // Menus
        .route("/menus", get(routes::menu::list_menus).post(routes::menu::create_menu))
        .route(
            "/menus/{id}",
            put(routes::menu::update_menu).delete(routes::menu::delete_menu),
        )
        .route("/menus/{id}/items", post(routes::menu::add_item))
        .route("/menus/{id}/items/{item_id}", delete(routes::menu::remove_item))
        .route("/menus/{id}/duplicate", post(routes::menu::duplicate_menu))
        .route("/menus/{id}/import", post(routes::menu::import_items))
        // Orders
        .route("/orders", get(routes::orders::list_orders))
        .route("/orders/{id}", get(routes::orders::get_order))
        .route("/orders/{id}/status", put(routes::orders::change_status))
        // Public share page
        .route("/share/{chef_id}", get(routes::share::get_share_page))
        .route("/share/{chef_id}/calendar", get(routes::share::get_calendar))
        .route("/share/{chef_id}/bookings", post(routes::share::create_booking))
        .route("/bookings/{booking_code}", get(routes::bookings::lookup_booking))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
