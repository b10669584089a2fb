//! Account API handlers
//!
//! Handles endpoints related to account records:
//! - Create account
//! - List accounts
//! - Get account details
//! - Update account (partial, empty fields are kept)
//! - Delete account

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use common::error::Error;
use common::model::account::{Account, AccountCreate, AccountUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::response::{request_id, ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Fields of the new account
    pub account: AccountCreate,
}

/// Update account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    /// Fields to change; empty fields keep their stored value
    pub account: AccountUpdate,
}

/// ID of a newly created account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedAccount {
    pub id: Uuid,
}

/// Parse an account ID path segment
pub fn parse_account_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|e| ApiError::Common(Error::ValidationError(format!("invalid account id {:?}: {}", raw, e))))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created", body = CreatedAccount),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<CreatedAccount>), ApiError> {
    let Json(request) = payload?;

    let ctx = state.request_context();
    let id = state.account_service.create_account(&ctx, request.account).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::new(CreatedAccount { id }).with_request_id(request_id(&headers)),
    ))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/accounts",
    responses(
        (status = 200, description = "All stored accounts", body = [Account]),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<ApiListResponse<Account>, ApiError> {
    let ctx = state.request_context();
    let accounts = state.account_service.list_accounts(&ctx).await?;

    Ok(ApiListResponse::new(accounts, request_id(&headers)))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully", body = Account),
        (status = 400, description = "Malformed account ID"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<ApiResponse<Account>, ApiError> {
    let id = parse_account_id(&id)?;

    let ctx = state.request_context();
    let account = state.account_service.get_account(&ctx, id).await?;

    Ok(ApiResponse::new(account).with_request_id(request_id(&headers)))
}

/// Update an account
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 204, description = "Account updated"),
        (status = 400, description = "Malformed account ID or body"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;
    let Json(request) = payload?;

    let ctx = state.request_context();
    state.account_service.update_account(&ctx, id, request.account).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Malformed account ID"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_account_id(&id)?;

    let ctx = state.request_context();
    state.account_service.delete_account(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
