//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::health::HealthData;
use crate::gateway::types::{CreateAccountRequest, CreateTransferRequest};
use crate::models::{Account, Currency, Entry, Transfer};
use crate::store::{TransferTxParams, TransferTxResult};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Corebank Ledger API",
        version = "1.0.0",
        description = "Ledger-style money transfers with atomic, deadlock-free semantics.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::account::create_account,
        crate::gateway::handlers::account::get_account,
        crate::gateway::handlers::account::list_accounts,
        crate::gateway::handlers::account::get_entry,
        crate::gateway::handlers::account::list_entries,
        crate::gateway::handlers::transfer::create_transfer,
        crate::gateway::handlers::transfer::get_transfer,
        crate::gateway::handlers::transfer::list_transfers,
    ),
    components(
        schemas(
            HealthData,
            Account,
            Entry,
            Transfer,
            Currency,
            CreateAccountRequest,
            CreateTransferRequest,
            TransferTxParams,
            TransferTxResult,
        )
    ),
    tags(
        (name = "Health", description = "Health checks"),
        (name = "Account", description = "Account creation and queries"),
        (name = "Ledger", description = "Immutable ledger entries"),
        (name = "Transfer", description = "Atomic money transfers")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Corebank Ledger API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/accounts"));
        assert!(paths.paths.contains_key("/api/v1/accounts/{id}"));
        assert!(paths.paths.contains_key("/api/v1/transfers"));
        assert!(paths.paths.contains_key("/api/v1/transfers/{id}"));
    }

    #[test]
    fn test_openapi_json_serializable() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Corebank Ledger API"));
    }
}
