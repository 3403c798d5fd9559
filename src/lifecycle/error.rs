//! Lifecycle errors.

use crate::core::{PlateEvent, PlateState};
use crate::plate::{PlateId, StoreError};
use thiserror::Error;

/// Errors that can occur when firing a lifecycle event
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The table has no row for this event from the current state.
    #[error("cannot {event} plate {plate}: no transition from '{from}'")]
    InvalidTransition {
        plate: PlateId,
        event: PlateEvent,
        from: PlateState,
    },

    /// The plate refused to store the new state.
    #[error("plate {plate} failed to store state '{state}'")]
    Store {
        plate: PlateId,
        state: PlateState,
        #[source]
        source: StoreError,
    },
}

impl LifecycleError {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}
