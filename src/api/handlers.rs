//! REST API handlers for ledger and registry operations

use crate::core::{parse_address, Address, LoggedEvent, OperatorName, Receipt};
use crate::governance::{OperatorBinding, RegistryError};
use crate::kernel::{CallRequest, KernelError, SharedKernel};
use crate::token::TokenError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub kernel: SharedKernel,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
    pub holder_count: usize,
    pub conserved: bool,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: Address,
    pub balance: String,
}

#[derive(Serialize)]
pub struct AllowanceResponse {
    pub owner: Address,
    pub spender: Address,
    pub allowance: String,
}

#[derive(Serialize)]
pub struct OperatorsResponse {
    pub owner: Address,
    pub count: usize,
    pub operators: Vec<OperatorBinding>,
}

#[derive(Serialize)]
pub struct OperatorResponse {
    pub index: usize,
    pub name: OperatorName,
    pub address: Address,
}

#[derive(Serialize)]
pub struct OperatorCheckResponse {
    pub address: Address,
    pub is_operator: bool,
    pub names: Vec<OperatorName>,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct EventsQuery {
    pub since: Option<u64>,
}

// ============================================================================
// Error mapping
// ============================================================================

fn bad_request(message: String) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: message }))
}

fn address_param(raw: &str) -> Result<Address, (StatusCode, Json<ApiError>)> {
    parse_address(raw).map_err(|e| bad_request(e.to_string()))
}

/// Status code a kernel rejection maps to
pub fn status_for(error: &KernelError) -> StatusCode {
    match error {
        KernelError::Registry(RegistryError::Unauthorized(_)) => StatusCode::FORBIDDEN,
        KernelError::Registry(RegistryError::InvalidArgument { .. }) => StatusCode::BAD_REQUEST,
        KernelError::Registry(RegistryError::IndexOutOfRange { .. }) => StatusCode::NOT_FOUND,
        KernelError::Token(TokenError::InsufficientBalance { .. })
        | KernelError::Token(TokenError::InsufficientAllowance { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        KernelError::Token(TokenError::ArithmeticOverflow) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kernel_error(error: KernelError) -> (StatusCode, Json<ApiError>) {
    (
        status_for(&error),
        Json(ApiError {
            error: error.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /api/token - Token metadata and supply
pub async fn get_token(State(state): State<ApiState>) -> Json<TokenInfo> {
    let info = state
        .kernel
        .read(|kernel| {
            let ledger = kernel.ledger();
            TokenInfo {
                name: ledger.name().to_string(),
                symbol: ledger.symbol().to_string(),
                decimals: ledger.decimals(),
                total_supply: ledger.total_supply().to_string(),
                holder_count: ledger.holder_count(),
                conserved: ledger.is_conserved(),
            }
        })
        .await;

    Json(info)
}

/// GET /api/balances/{address}
pub async fn get_balance(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> ApiResult<BalanceResponse> {
    let address = address_param(&address)?;
    let balance = state
        .kernel
        .read(|kernel| kernel.ledger().balance_of(&address))
        .await;

    Ok(Json(BalanceResponse {
        address,
        balance: balance.to_string(),
    }))
}

/// GET /api/allowances/{owner}/{spender}
pub async fn get_allowance(
    State(state): State<ApiState>,
    Path((owner, spender)): Path<(String, String)>,
) -> ApiResult<AllowanceResponse> {
    let owner = address_param(&owner)?;
    let spender = address_param(&spender)?;
    let allowance = state
        .kernel
        .read(|kernel| kernel.ledger().allowance(&owner, &spender))
        .await;

    Ok(Json(AllowanceResponse {
        owner,
        spender,
        allowance: allowance.to_string(),
    }))
}

/// GET /api/operators - Current generation, in definition order
pub async fn list_operators(State(state): State<ApiState>) -> Json<OperatorsResponse> {
    let response = state
        .kernel
        .read(|kernel| {
            let registry = kernel.registry();
            OperatorsResponse {
                owner: registry.owner(),
                count: registry.operator_count(),
                operators: registry.bindings().to_vec(),
            }
        })
        .await;

    Json(response)
}

/// GET /api/operators/{index}
pub async fn get_operator(
    State(state): State<ApiState>,
    Path(index): Path<usize>,
) -> ApiResult<OperatorResponse> {
    let binding = state
        .kernel
        .read(|kernel| -> Result<OperatorBinding, RegistryError> {
            let registry = kernel.registry();
            Ok(OperatorBinding {
                name: registry.operator_name(index)?,
                address: registry.operator_address(index)?,
            })
        })
        .await
        .map_err(|e| kernel_error(KernelError::from(e)))?;

    Ok(Json(OperatorResponse {
        index,
        name: binding.name,
        address: binding.address,
    }))
}

/// GET /api/operators/check/{address} - Authorization gate predicate
pub async fn check_operator(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> ApiResult<OperatorCheckResponse> {
    let address = address_param(&address)?;
    let (is_operator, names) = state
        .kernel
        .read(|kernel| {
            let gate = kernel.gate();
            (gate.is_operator(&address), gate.names_of(&address))
        })
        .await;

    Ok(Json(OperatorCheckResponse {
        address,
        is_operator,
        names,
    }))
}

/// GET /api/events?since=N - Event log
pub async fn list_events(
    State(state): State<ApiState>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<LoggedEvent>> {
    let since = query.since.unwrap_or(0);
    let events = state
        .kernel
        .read(|kernel| kernel.events().since(since).to_vec())
        .await;

    Json(events)
}

/// POST /api/calls - Execute one call for the given caller
pub async fn execute_call(
    State(state): State<ApiState>,
    Json(req): Json<CallRequest>,
) -> ApiResult<Receipt> {
    let receipt = state
        .kernel
        .execute(req.caller, req.call)
        .await
        .map_err(kernel_error)?;

    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Amount;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                KernelError::from(RegistryError::Unauthorized(Address::ZERO)),
                StatusCode::FORBIDDEN,
            ),
            (
                KernelError::from(RegistryError::InvalidArgument {
                    names: 1,
                    addresses: 0,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                KernelError::from(RegistryError::IndexOutOfRange { index: 3, count: 2 }),
                StatusCode::NOT_FOUND,
            ),
            (
                KernelError::from(TokenError::InsufficientAllowance {
                    have: Amount::ZERO,
                    need: Amount::from(1u64),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                KernelError::from(TokenError::ArithmeticOverflow),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(status_for(&error), status, "{}", error);
        }
    }
}
