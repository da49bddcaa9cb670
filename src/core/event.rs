//! Events emitted by ledger and registry operations
//!
//! Every successful mutating call returns a [`Receipt`] holding exactly the
//! events of that call, in emission order. Receipts are appended whole to an
//! [`EventLog`] once the call has committed.

use crate::core::types::{decimal, Address, Amount, OperatorName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured event observed by indexers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Tokens moved between two accounts
    Transfer {
        from: Address,
        to: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    /// An allowance was set to `value`
    Approval {
        owner: Address,
        spender: Address,
        #[serde(with = "decimal")]
        value: Amount,
    },
    /// The operator set was cleared; `size` is the count before clearing
    OperatorsCleared { size: usize },
    /// An operator binding was appended
    OperatorDefined {
        name: OperatorName,
        address: Address,
    },
}

impl Event {
    /// Event name as indexers see it
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer { .. } => "Transfer",
            Event::Approval { .. } => "Approval",
            Event::OperatorsCleared { .. } => "OperatorsCleared",
            Event::OperatorDefined { .. } => "OperatorDefined",
        }
    }
}

/// Events emitted by one committed call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub logs: Vec<Event>,
}

impl Receipt {
    /// Receipt carrying a single event
    pub fn single(event: Event) -> Self {
        Self { logs: vec![event] }
    }

    /// Append an event, keeping emission order
    pub fn push(&mut self, event: Event) {
        self.logs.push(event);
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.logs.iter()
    }
}

/// An event with its position in the log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Zero-based position, gap-free
    pub sequence: u64,
    pub event: Event,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only, ordered event history
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every event of a committed call, in order
    pub fn append(&mut self, receipt: &Receipt) {
        let recorded_at = Utc::now();
        for event in receipt.iter() {
            let sequence = self.entries.len() as u64;
            self.entries.push(LoggedEvent {
                sequence,
                event: event.clone(),
                recorded_at,
            });
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    /// Entries recorded at or after `sequence`
    pub fn since(&self, sequence: u64) -> &[LoggedEvent] {
        let start = usize::try_from(sequence)
            .unwrap_or(usize::MAX)
            .min(self.entries.len());
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
