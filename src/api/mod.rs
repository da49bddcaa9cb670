//! REST API module
//!
//! HTTP access to one governed token. The caller identity travels in the
//! body of each call.
//!
//! # Endpoints
//!
//! ## Ledger
//! - `GET /api/token` - Metadata and total supply
//! - `GET /api/balances/{address}` - Balance
//! - `GET /api/allowances/{owner}/{spender}` - Allowance
//!
//! ## Registry
//! - `GET /api/operators` - Current operators in definition order
//! - `GET /api/operators/{index}` - Operator at a position
//! - `GET /api/operators/check/{address}` - Is the address an operator?
//!
//! ## Calls and events
//! - `POST /api/calls` - Execute `{ caller, call }`, returns the receipt
//! - `GET /api/events?since=N` - Event log
//!
//! ## WebSocket
//! - `GET /ws` - Committed events as they happen

pub mod handlers;
pub mod routes;
pub mod websocket;

pub use handlers::ApiState;
pub use routes::create_router;
