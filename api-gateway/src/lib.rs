//! HTTP gateway for the accounts storage service
//!
//! Builds the axum router that maps `/accounts` requests onto the
//! [`AccountService`], plus health and OpenAPI documentation routes.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

use std::sync::Arc;
use std::time::Duration;

use account_service::AccountService;
use axum::{
    extract::Request,
    middleware,
    routing::get,
    Router,
};
use common::Context;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::account::{create_account, delete_account, get_account, list_accounts, update_account};
use crate::api::health::health;
use crate::api::response::REQUEST_ID_HEADER;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::account::create_account,
        api::account::list_accounts,
        api::account::get_account,
        api::account::update_account,
        api::account::delete_account,
        api::health::health,
    ),
    components(
        schemas(
            api::account::CreateAccountRequest,
            api::account::UpdateAccountRequest,
            api::account::CreatedAccount,
            api::health::HealthStatus,
            common::model::account::Account,
            common::model::account::AccountCreate,
            common::model::account::AccountUpdate,
        )
    ),
    tags(
        (name = "account", description = "Account record management endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Accounts Storage API",
        version = "1.0.0",
        description = "CRUD API for stored account records"
    )
)]
pub struct ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
    /// Cancelled when the server shuts down; parent of every request context
    pub shutdown: CancellationToken,
    /// Deadline applied to each request's storage operations
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(account_service: AccountService, shutdown: CancellationToken, request_timeout: Duration) -> Self {
        Self {
            account_service: Arc::new(account_service),
            shutdown,
            request_timeout,
        }
    }

    /// Operation context for one request
    pub fn request_context(&self) -> Context {
        Context::from_parent(&self.shutdown).with_timeout(self.request_timeout)
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/health", get(health));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::span!(
                Level::INFO,
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_request(DefaultOnRequest::new().level(log_level))
        .on_response(DefaultOnResponse::new().level(log_level));

    // Layers run bottom-up: the request ID is set before tracing sees the request
    Router::new()
        .merge(api_routes)
        .merge(swagger_ui)
        .layer(middleware::from_fn(error::attach_request_id))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
