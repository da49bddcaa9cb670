//! Composed kernel: one token ledger governed by one operator registry
//!
//! - [`GovernedToken`] owns the ledger, the registry and the event log
//! - [`Call`] names each mutating operation for external call surfaces
//! - [`SharedKernel`] serializes calls from concurrent hosts

pub mod broadcast;
pub mod call;
pub mod error;
pub mod governed;
pub mod shared;

pub use broadcast::EventBroadcaster;
pub use call::{Call, CallRequest};
pub use error::KernelError;
pub use governed::GovernedToken;
pub use shared::SharedKernel;
