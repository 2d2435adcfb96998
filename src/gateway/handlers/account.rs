//! Account and entry handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateAccountRequest, PageQuery, ok};
use crate::models::{Account, Entry};

/// Create an account with a zero starting balance
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", content_type = "application/json"),
        (status = 400, description = "Invalid owner or currency"),
        (status = 500, description = "Store failure")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Account> {
    if req.owner.trim().is_empty() {
        return ApiError::bad_request("owner must not be empty").into_err();
    }

    match state.store.create_account(&req.owner, req.currency).await {
        Ok(account) => {
            tracing::info!(account_id = account.id, owner = %account.owner, "Account created");
            ok(account)
        }
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// Get one account by id
///
/// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", content_type = "application/json"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Account> {
    match state.store.get_account(id).await {
        Ok(account) => ok(account),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// List accounts
///
/// GET /api/v1/accounts?limit=&offset=
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(
        ("limit" = i64, Query, description = "Page size (1-100, default 20)"),
        ("offset" = i64, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Account page", content_type = "application/json"),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "Account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Vec<Account>> {
    if let Err(e) = page.validate() {
        return e.into_err();
    }

    match state.store.list_accounts(page.limit, page.offset).await {
        Ok(accounts) => ok(accounts),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// Get one ledger entry by id
///
/// GET /api/v1/entries/{id}
#[utoipa::path(
    get,
    path = "/api/v1/entries/{id}",
    params(("id" = i64, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry", content_type = "application/json"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Ledger"
)]
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Entry> {
    match state.store.get_entry(id).await {
        Ok(entry) => ok(entry),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// List entries for one account
///
/// GET /api/v1/accounts/{id}/entries?limit=&offset=
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/entries",
    params(
        ("id" = i64, Path, description = "Account id"),
        ("limit" = i64, Query, description = "Page size (1-100, default 20)"),
        ("offset" = i64, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Entry page", content_type = "application/json"),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "Account not found")
    ),
    tag = "Ledger"
)]
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Vec<Entry>> {
    if let Err(e) = page.validate() {
        return e.into_err();
    }

    // 404 for a nonexistent account instead of an empty page
    if let Err(e) = state.store.get_account(id).await {
        return ApiError::from_store(e).into_err();
    }

    match state.store.list_entries(id, page.limit, page.offset).await {
        Ok(entries) => ok(entries),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}
