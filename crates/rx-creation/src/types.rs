use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RxError;

/// Hook invoked with each observer delivery failure.
pub type DeliveryErrorHook = dyn Fn(&RxError) + Send + Sync;

/// What a bridge does when an observer's `next` handler panics.
///
/// Under both policies the remaining observers still receive the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Report the failure (hook or `tracing::error!`) and carry on.
    #[default]
    Isolate,
    /// Finish the fan-out, then resume the first panic in the emitting caller.
    /// Later panics from the same emission are reported as under `Isolate`.
    Propagate,
}

/// Options for [`EventBridge`](crate::reactive::EventBridge).
pub struct BridgeOptions {
    /// Panic handling for observer `next` handlers.
    pub delivery_policy: DeliveryPolicy,
    /// Receives `ObserverDelivery` errors for every failure that is not
    /// resumed: all of them under [`DeliveryPolicy::Isolate`], all but the
    /// first of an emission under [`DeliveryPolicy::Propagate`]. When unset,
    /// failures go to `tracing::error!`.
    pub on_delivery_error: Option<Arc<DeliveryErrorHook>>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            delivery_policy: DeliveryPolicy::Isolate,
            on_delivery_error: None,
        }
    }
}

impl std::fmt::Debug for BridgeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeOptions")
            .field("delivery_policy", &self.delivery_policy)
            .field("on_delivery_error", &self.on_delivery_error.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Clone for BridgeOptions {
    fn clone(&self) -> Self {
        Self {
            delivery_policy: self.delivery_policy,
            on_delivery_error: self.on_delivery_error.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
