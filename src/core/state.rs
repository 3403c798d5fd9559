//! Plate states and the `State` trait they implement.
//!
//! States are plain values. Inspecting them never has side effects; the
//! only way a plate's state changes is through a
//! [`PlateLifecycle`](crate::lifecycle::PlateLifecycle) transition.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use thiserror::Error;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Copy`: states are small tags copied in and out of the plate entity
/// - `PartialEq`: states must be comparable for transition lookup
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable so hosts can store them
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is a final (absorbing) state.
    ///
    /// Final states have no outgoing transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Processing state of a plate.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::core::{PlateState, State};
///
/// let state: PlateState = "started".parse().unwrap();
/// assert_eq!(state, PlateState::Started);
/// assert_eq!(state.to_string(), "started");
/// assert!(PlateState::Cancelled.is_final());
/// assert!(!PlateState::Passed.is_final());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateState {
    /// Initial state of every new plate.
    #[default]
    Pending,
    /// Processing is underway.
    Started,
    /// Processing finished successfully.
    Passed,
    /// Processing finished unsuccessfully.
    Failed,
    /// Withdrawn. Absorbing.
    Cancelled,
}

impl PlateState {
    /// Every state, in declaration order.
    pub const ALL: [PlateState; 5] = [
        Self::Pending,
        Self::Started,
        Self::Passed,
        Self::Failed,
        Self::Cancelled,
    ];

    /// The canonical lowercase name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl State for PlateState {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl Display for PlateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`PlateState`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown plate state '{0}'")]
pub struct ParseStateError(pub String);

impl FromStr for PlateState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseStateError(s.to_string()))
    }
}
