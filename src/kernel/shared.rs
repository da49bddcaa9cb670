//! Serialized access to a governed token from concurrent hosts
//!
//! Every mutating call holds the write lock from its first check to its
//! last write, and publishes its events before releasing it, so subscribers
//! see events in log order. Reads share the read lock and never observe a
//! half-applied call.

use crate::config::KernelConfig;
use crate::core::{Address, LoggedEvent, Receipt};
use crate::kernel::broadcast::EventBroadcaster;
use crate::kernel::call::Call;
use crate::kernel::error::KernelError;
use crate::kernel::governed::GovernedToken;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Cloneable handle to one governed token
#[derive(Clone, Debug)]
pub struct SharedKernel {
    state: Arc<RwLock<GovernedToken>>,
    broadcaster: Arc<EventBroadcaster>,
}

impl SharedKernel {
    pub fn new(kernel: GovernedToken, event_capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(kernel)),
            broadcaster: Arc::new(EventBroadcaster::new(event_capacity)),
        }
    }

    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(GovernedToken::from_config(config), config.event_capacity)
    }

    /// Run one call as a single serialized transaction
    pub async fn execute(&self, caller: Address, call: Call) -> Result<Receipt, KernelError> {
        let mut kernel = self.state.write().await;
        let start = kernel.events().len() as u64;

        let receipt = kernel.apply(caller, call).inspect_err(|e| {
            if e.is_fatal() {
                log::error!("Fatal kernel error for {}: {}", caller, e);
            }
        })?;

        for entry in kernel.events().since(start) {
            self.broadcaster.publish(entry.clone());
        }
        Ok(receipt)
    }

    /// Read from a consistent snapshot
    pub async fn read<R>(&self, f: impl FnOnce(&GovernedToken) -> R) -> R {
        let kernel = self.state.read().await;
        f(&kernel)
    }

    /// Live stream of events committed from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LoggedEvent> {
        self.broadcaster.subscribe()
    }
}
