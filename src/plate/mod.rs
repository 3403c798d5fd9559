//! The plate entity seen through the interface the lifecycle needs.
//!
//! A plate owns its identity, its purpose and its current state. The
//! lifecycle reads the state from the plate on every query and writes it
//! back through [`Plate::store_state`], which can only be called with a
//! borrowed [`StateWrite`] capability. Code outside this crate can neither
//! create one nor keep one past the call, so the lifecycle is the only
//! writer of a plate's state.

mod record;

pub use record::PlateRecord;

use crate::core::PlateState;
use crate::purpose::Purpose;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Error raised by a plate's storage hook, passed through unchanged.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque plate identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateId(Uuid);

impl PlateId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlateId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Capability to write a plate's state.
///
/// Only [`PlateLifecycle`](crate::lifecycle::PlateLifecycle) constructs this
/// token, after it has checked the transition against the table.
///
/// ```compile_fail
/// use plate_lifecycle::plate::StateWrite;
///
/// let token = StateWrite { _private: () };
/// ```
///
/// [`Plate::store_state`] only borrows the token for the length of the call,
/// and it is neither `Clone` nor `Copy`, so an implementation cannot keep it
/// to write states later:
///
/// ```compile_fail
/// use plate_lifecycle::core::PlateState;
/// use plate_lifecycle::plate::{Plate, PlateId, StateWrite, StoreError};
/// use plate_lifecycle::purpose::Purpose;
///
/// struct Hoarder {
///     id: PlateId,
///     state: PlateState,
///     purpose: Purpose,
///     kept: Option<&'static StateWrite>,
/// }
///
/// impl Plate for Hoarder {
///     fn id(&self) -> PlateId {
///         self.id
///     }
///
///     fn state(&self) -> PlateState {
///         self.state
///     }
///
///     fn purpose(&self) -> &Purpose {
///         &self.purpose
///     }
///
///     fn store_state(&mut self, state: PlateState, write: &StateWrite) -> Result<(), StoreError> {
///         self.state = state;
///         self.kept = Some(write);
///         Ok(())
///     }
/// }
/// ```
#[derive(Debug)]
pub struct StateWrite {
    _private: (),
}

impl StateWrite {
    pub(crate) fn issue() -> Self {
        Self { _private: () }
    }
}

/// The plate entity governed by a lifecycle.
///
/// Implementations own persistence. `state` must always return the latest
/// committed value, because the lifecycle never caches it.
pub trait Plate {
    fn id(&self) -> PlateId;

    fn state(&self) -> PlateState;

    fn purpose(&self) -> &Purpose;

    /// Commit a new state.
    ///
    /// Called only by the lifecycle, with a state the transition table
    /// allows. An error leaves the lifecycle's view unchanged and is
    /// reported to the caller as-is. `write` is only valid for this call.
    fn store_state(&mut self, state: PlateState, write: &StateWrite) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_ids_are_unique() {
        assert_ne!(PlateId::new(), PlateId::new());
    }

    #[test]
    fn plate_id_displays_as_uuid() {
        let uuid = Uuid::new_v4();
        let id = PlateId::from_uuid(uuid);

        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn plate_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&PlateId::from_uuid(uuid)).unwrap();

        assert_eq!(json, format!("\"{uuid}\""));
    }
}
