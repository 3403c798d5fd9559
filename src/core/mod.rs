//! Core state machine types.
//!
//! This module contains the pure part of the plate lifecycle:
//! - Plate states via the `State` trait
//! - Events and the shared, guard-free transition table
//!
//! Nothing in this module touches a plate; it only answers questions
//! about the graph.

mod state;
mod transition;

pub use state::{ParseStateError, PlateState, State};
pub use transition::{
    PlateEvent, Transition, TransitionRule, TransitionTable, PLATE_TRANSITIONS,
};
