//! Core value types and the event model
//!
//! This module contains the building blocks shared by every aggregate:
//! - Amounts, addresses and operator names
//! - Events, per-call receipts and the append-only event log

pub mod event;
pub mod types;

pub use event::{Event, EventLog, LoggedEvent, Receipt};
pub use types::{
    decimal, parse_address, parse_amount, unit, Address, Amount, OperatorName, ParseError,
    OPERATOR_NAME_LEN,
};
