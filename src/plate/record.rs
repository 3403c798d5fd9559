//! In-memory plate entity.

use super::{Plate, PlateId, StateWrite, StoreError};
use crate::core::PlateState;
use crate::purpose::Purpose;
use std::sync::Arc;

/// A plate held in memory.
///
/// Useful on its own for hosts that persist plates elsewhere (load a
/// record, drive it through a lifecycle, save its state back) and as the
/// reference [`Plate`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateRecord {
    id: PlateId,
    state: PlateState,
    purpose: Arc<Purpose>,
}

impl PlateRecord {
    /// A new plate with a fresh identifier, in the `pending` state.
    pub fn new(purpose: Arc<Purpose>) -> Self {
        Self::load(PlateId::new(), purpose, PlateState::Pending)
    }

    /// A plate read back from storage in whatever state it was saved in.
    ///
    /// This is the only way to create a plate in a state other than
    /// `pending`. Attaching a lifecycle afterwards keeps that state.
    pub fn load(id: PlateId, purpose: Arc<Purpose>, state: PlateState) -> Self {
        Self { id, state, purpose }
    }

    pub fn purpose_handle(&self) -> &Arc<Purpose> {
        &self.purpose
    }
}

impl Plate for PlateRecord {
    fn id(&self) -> PlateId {
        self.id
    }

    fn state(&self) -> PlateState {
        self.state
    }

    fn purpose(&self) -> &Purpose {
        &self.purpose
    }

    fn store_state(&mut self, state: PlateState, _write: &StateWrite) -> Result<(), StoreError> {
        self.state = state;
        Ok(())
    }
}
