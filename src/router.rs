use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::state::AppState;

/// Options for the HTTP layers wrapped around the route table
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            enable_request_logging: false,
            max_request_size_bytes: 10 * 1024 * 1024,
            cors_origins: Vec::new(),
        }
    }
}

impl From<&AppConfig> for RouterOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            enable_request_logging: config.api.enable_request_logging,
            max_request_size_bytes: config.api.max_request_size_bytes,
            cors_origins: config.security.cors_origins.clone(),
        }
    }
}

/// Full gateway router with default layers
pub fn app(state: AppState) -> Router {
    app_with_options(state, &RouterOptions::default())
}

pub fn app_with_options(state: AppState, options: &RouterOptions) -> Router {
    let router = Router::new()
        .route("/health", get(public::health_get))
        .nest("/api/v1", api_routes())
        .fallback(public::no_route)
        .layer(DefaultBodyLimit::max(options.max_request_size_bytes))
        .layer(cors_layer(&options.cors_origins))
        .with_state(state);

    if options.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Public: token acquisition
        .route("/version", get(public::version_get))
        .route("/signup", post(public::signup_post))
        .route("/login", post(public::login_post))
        .route("/checkToken", post(public::check_token_post))
        // Protected: listing before the record route so `_all_docs` is never a doc id
        .route("/:username/_all_docs", get(protected::all_docs_get))
        .route(
            "/:username/:doc_id",
            get(protected::record_get)
                .post(protected::record_post)
                .put(protected::record_put)
                .delete(protected::record_delete),
        )
        // An empty doc id never matches the route above
        .route(
            "/:username/",
            get(protected::record_without_id)
                .post(protected::record_without_id)
                .put(protected::record_without_id)
                .delete(protected::record_without_id),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(allowed))
}
