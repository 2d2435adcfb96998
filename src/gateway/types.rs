//! Gateway request/response types and error mapping
//!
//! All endpoints answer with the unified `ApiResponse { code, msg, data }`
//! envelope. Store errors are mapped to HTTP statuses in exactly one place
//! ([`ApiError::from_store`]); handlers early-return on every failure branch
//! so a request gets exactly one terminal response.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Currency;
use crate::store::StoreError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const CONSTRAINT_VIOLATION: i32 = 1002;
    pub const CURRENCY_MISMATCH: i32 = 1003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// ApiError / ApiResult
// ============================================================================

/// Handler result: success data in the envelope, or a terminal [`ApiError`].
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap success data in the response envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// A terminal error response: HTTP status + envelope error code + message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    /// Map a store failure onto an HTTP response. Nothing is downgraded:
    /// the store error text travels in the envelope message.
    pub fn from_store(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound => Self::not_found("Not found"),
            StoreError::ConstraintViolation(msg) => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::CONSTRAINT_VIOLATION,
                msg.clone(),
            ),
            StoreError::Connectivity(_) => Self::service_unavailable(err.to_string()),
            StoreError::Rollback { .. } | StoreError::Database(_) => {
                Self::internal(err.to_string())
            }
        }
    }

    /// Convenience for `return ApiError::...(..).into_err();`
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.code, self.msg);
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// POST /api/v1/accounts
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub owner: String,
    /// "USD" | "EUR"
    pub currency: Currency,
}

/// Pagination query for list endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl PageQuery {
    /// Reject nonsense pagination before it reaches the store.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.limit < 1 || self.limit > 100 {
            return Err(ApiError::bad_request("limit must be between 1 and 100"));
        }
        if self.offset < 0 {
            return Err(ApiError::bad_request("offset must be non-negative"));
        }
        Ok(())
    }
}

/// POST /api/v1/transfers
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Smallest currency unit; must be positive.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(42);
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::NOT_FOUND, "missing");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("data"));
        assert!(json.contains("missing"));
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from_store(StoreError::NotFound);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::NOT_FOUND);
    }

    #[test]
    fn test_store_constraint_maps_to_400() {
        let err = ApiError::from_store(StoreError::ConstraintViolation("fk".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::CONSTRAINT_VIOLATION);
    }

    #[test]
    fn test_store_connectivity_maps_to_503() {
        let err = ApiError::from_store(StoreError::Connectivity(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_create_account_request_rejects_unknown_currency() {
        let result: Result<CreateAccountRequest, _> =
            serde_json::from_str(r#"{"owner":"alice","currency":"COP"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 20);
        assert_eq!(q.offset, 0);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_page_query_rejects_bad_limit() {
        let q = PageQuery {
            limit: 0,
            offset: 0,
        };
        assert!(q.validate().is_err());

        let q = PageQuery {
            limit: 101,
            offset: 0,
        };
        assert!(q.validate().is_err());

        let q = PageQuery {
            limit: 10,
            offset: -1,
        };
        assert!(q.validate().is_err());
    }
}
