/// Application state and router builder
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /v1/                       # API v1 (versioned)
///     ├── /auth/                 # Authentication (public)
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── /users/GET /me         # Authenticated user (guarded)
///     ├── /boards/               # Board CRUD (guarded)
///     │   ├── POST   /
///     │   ├── GET    /
///     │   ├── GET    /:id
///     │   ├── DELETE /:id
///     │   └── POST   /:id/stories
///     └── /stories/              # Story CRUD (guarded)
///         ├── POST   /
///         ├── GET    /
///         ├── GET    /:id
///         └── DELETE /:id
/// ```
///
/// Every guarded route runs behind the authentication guard, which attaches
/// the resolved user before the handler executes.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use storyboard_shared::models::{board::Board, story::Story};

use crate::{config::Config, middleware::auth_guard::auth_guard, routes, routes::crud};

/// Shared application state
///
/// Cloned into each request handler via axum's `State` extractor; the pool
/// and config are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: no guard
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let user_routes = Router::new().route("/me", get(routes::users::me));

    let board_routes = Router::new()
        .route(
            "/",
            post(routes::boards::create_board).get(crud::find_all::<Board>),
        )
        .route(
            "/:id",
            get(crud::find_one::<Board>).delete(crud::delete::<Board>),
        )
        .route("/:id/stories", post(routes::boards::add_story));

    let story_routes = Router::new()
        .route(
            "/",
            post(routes::stories::create_story).get(crud::find_all::<Story>),
        )
        .route(
            "/:id",
            get(crud::find_one::<Story>).delete(crud::delete::<Story>),
        );

    // Everything below runs behind the authentication guard
    let guarded_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/boards", board_routes)
        .nest("/stories", story_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_guard,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(guarded_routes);

    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
