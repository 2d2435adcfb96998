//! Transfer handlers
//!
//! The gateway owns the request-level validation the core deliberately does
//! not repeat: positive amount, distinct accounts, both accounts present and
//! in the same currency. After validation it hands off to
//! [`Store::transfer_tx`] and maps the outcome once.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateTransferRequest, PageQuery, ok};
use crate::models::{Account, Transfer};
use crate::store::{Store, TransferTxParams, TransferTxResult};

/// Execute an atomic money transfer
///
/// POST /api/v1/transfers
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer committed", content_type = "application/json"),
        (status = 400, description = "Invalid amount, same account, or currency mismatch"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransferRequest>,
) -> ApiResult<TransferTxResult> {
    if req.amount <= 0 {
        return ApiError::bad_request("amount must be positive").into_err();
    }
    if req.from_account_id == req.to_account_id {
        return ApiError::bad_request("from and to accounts must differ").into_err();
    }

    let from = match valid_account(&state.store, req.from_account_id).await {
        Ok(account) => account,
        Err(e) => return e.into_err(),
    };
    let to = match valid_account(&state.store, req.to_account_id).await {
        Ok(account) => account,
        Err(e) => return e.into_err(),
    };

    if from.currency != to.currency {
        return ApiError::new(
            axum::http::StatusCode::BAD_REQUEST,
            super::super::types::error_codes::CURRENCY_MISMATCH,
            format!(
                "currency mismatch: account {} is {}, account {} is {}",
                from.id, from.currency, to.id, to.currency
            ),
        )
        .into_err();
    }

    let params = TransferTxParams {
        from_account_id: req.from_account_id,
        to_account_id: req.to_account_id,
        amount: req.amount,
    };

    match state.store.transfer_tx(params).await {
        Ok(result) => {
            tracing::info!(
                transfer_id = result.transfer.id,
                from = req.from_account_id,
                to = req.to_account_id,
                amount = req.amount,
                "Transfer committed"
            );
            ok(result)
        }
        Err(e) => {
            tracing::error!("Transfer failed: {}", e);
            ApiError::from_store(e).into_err()
        }
    }
}

/// Get one transfer by id
///
/// GET /api/v1/transfers/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    params(("id" = i64, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer", content_type = "application/json"),
        (status = 404, description = "Transfer not found")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Transfer> {
    match state.store.get_transfer(id).await {
        Ok(transfer) => ok(transfer),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// List transfers touching one account
///
/// GET /api/v1/accounts/{id}/transfers?limit=&offset=
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/transfers",
    params(
        ("id" = i64, Path, description = "Account id"),
        ("limit" = i64, Query, description = "Page size (1-100, default 20)"),
        ("offset" = i64, Query, description = "Rows to skip")
    ),
    responses(
        (status = 200, description = "Transfer page", content_type = "application/json"),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "Account not found")
    ),
    tag = "Transfer"
)]
pub async fn list_transfers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Vec<Transfer>> {
    if let Err(e) = page.validate() {
        return e.into_err();
    }

    if let Err(e) = state.store.get_account(id).await {
        return ApiError::from_store(e).into_err();
    }

    match state
        .store
        .list_transfers(id, page.limit, page.offset)
        .await
    {
        Ok(transfers) => ok(transfers),
        Err(e) => ApiError::from_store(e).into_err(),
    }
}

/// Fetch a transfer party, turning store errors into terminal responses.
async fn valid_account(store: &Store, id: i64) -> Result<Account, ApiError> {
    store.get_account(id).await.map_err(ApiError::from_store)
}
