//! Lifecycle wrapper around a plate.

use super::error::LifecycleError;
use crate::core::{PlateEvent, PlateState, Transition, PLATE_TRANSITIONS};
use crate::plate::{Plate, StateWrite};
use crate::policy::eligible_child_purposes;
use crate::purpose::Purpose;
use std::sync::Arc;

/// Drives a plate through the lifecycle graph and answers child creation
/// questions for its current state.
///
/// The plate's own state is authoritative. Attaching adopts whatever state
/// the plate is in, and every query reads it afresh.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::core::PlateState;
/// use plate_lifecycle::lifecycle::PlateLifecycle;
/// use plate_lifecycle::plate::PlateRecord;
/// use plate_lifecycle::purpose::Purpose;
/// use std::sync::Arc;
///
/// let purpose = Purpose::new("Pulldown stock plate").with_children([
///     Arc::new(Purpose::new("Pulldown QC plate")),
///     Arc::new(Purpose::new("Library plate")),
/// ]);
/// let mut lifecycle = PlateLifecycle::attach(PlateRecord::new(Arc::new(purpose)));
///
/// lifecycle.start().unwrap();
/// lifecycle.control_child_plate_creation(|purposes| {
///     assert_eq!(purposes[0].name(), "Pulldown QC plate");
/// });
///
/// lifecycle.pass().unwrap();
/// assert_eq!(lifecycle.current_state(), PlateState::Passed);
/// assert!(lifecycle.start().is_err());
/// ```
#[derive(Debug)]
pub struct PlateLifecycle<P: Plate> {
    plate: P,
}

impl<P: Plate> PlateLifecycle<P> {
    /// Take over state management of `plate` without touching its state.
    pub fn attach(plate: P) -> Self {
        tracing::debug!(plate = %plate.id(), state = %plate.state(), "attached lifecycle");
        Self { plate }
    }

    pub fn plate(&self) -> &P {
        &self.plate
    }

    /// Release the plate.
    pub fn into_inner(self) -> P {
        self.plate
    }

    pub fn current_state(&self) -> PlateState {
        self.plate.state()
    }

    pub fn start(&mut self) -> Result<PlateState, LifecycleError> {
        self.fire(PlateEvent::Start)
    }

    pub fn pass(&mut self) -> Result<PlateState, LifecycleError> {
        self.fire(PlateEvent::Pass)
    }

    pub fn fail(&mut self) -> Result<PlateState, LifecycleError> {
        self.fire(PlateEvent::Fail)
    }

    pub fn cancel(&mut self) -> Result<PlateState, LifecycleError> {
        self.fire(PlateEvent::Cancel)
    }

    /// Fire `event`, returning the state the plate moved to.
    ///
    /// Fails with [`LifecycleError::InvalidTransition`] when the table has no
    /// row for `event` from the current state; the plate is left untouched.
    pub fn fire(&mut self, event: PlateEvent) -> Result<PlateState, LifecycleError> {
        let plate = self.plate.id();
        let from = self.current_state();

        let Some(to) = PLATE_TRANSITIONS.target(event, from) else {
            tracing::warn!(plate = %plate, %event, %from, "rejected invalid transition");
            return Err(LifecycleError::InvalidTransition { plate, event, from });
        };

        if let Err(source) = self.plate.store_state(to, &StateWrite::issue()) {
            tracing::warn!(plate = %plate, %event, %from, %to, error = %source, "plate failed to store state");
            return Err(LifecycleError::Store {
                plate,
                state: to,
                source,
            });
        }

        tracing::debug!(plate = %plate, %event, %from, %to, "plate transitioned");
        Ok(to)
    }

    pub fn can_fire(&self, event: PlateEvent) -> bool {
        PLATE_TRANSITIONS.target(event, self.current_state()).is_some()
    }

    /// Events that can fire now, in table order.
    pub fn available_events(&self) -> Vec<PlateEvent> {
        PLATE_TRANSITIONS.events_from(self.current_state())
    }

    /// Edges leaving the current state, in table order.
    pub fn transitions(&self) -> Vec<Transition<PlateState, PlateEvent>> {
        PLATE_TRANSITIONS
            .transitions_from(self.current_state())
            .collect()
    }

    /// The current state followed by every distinct state one transition
    /// away, or `None` when nothing is reachable.
    ///
    /// `None` and a one-element list are deliberately different: callers
    /// presenting choices should offer nothing rather than a lone current
    /// state.
    pub fn reachable_states(&self) -> Option<Vec<PlateState>> {
        let current = self.current_state();
        let next = PLATE_TRANSITIONS.next_states(current);
        if next.is_empty() {
            return None;
        }

        let mut states = Vec::with_capacity(next.len() + 1);
        states.push(current);
        states.extend(next);
        Some(states)
    }

    /// Invoke `f` with [`reachable_states`](Self::reachable_states) when
    /// there is at least one state to move to.
    pub fn control_state_change<F>(&self, f: F)
    where
        F: FnOnce(&[PlateState]),
    {
        if let Some(states) = self.reachable_states() {
            f(&states);
        }
    }

    /// Child purposes that may be created from the plate right now.
    pub fn child_plate_purposes(&self) -> Vec<Arc<Purpose>> {
        let state = self.current_state();
        let purposes = eligible_child_purposes(state, self.plate.purpose());
        tracing::trace!(
            plate = %self.plate.id(),
            %state,
            offered = purposes.len(),
            "evaluated child plate policy"
        );
        purposes
    }

    /// Invoke `f` with the eligible child purposes when there are any.
    ///
    /// States that forbid creation, and purposes with nothing eligible,
    /// never invoke `f`.
    pub fn control_child_plate_creation<F>(&self, f: F)
    where
        F: FnOnce(&[Arc<Purpose>]),
    {
        let purposes = self.child_plate_purposes();
        if !purposes.is_empty() {
            f(&purposes);
        }
    }
}
