//! Events and the shared transition table.

use super::state::{PlateState, State};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Named trigger that moves a plate between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateEvent {
    Start,
    Pass,
    Fail,
    Cancel,
}

impl PlateEvent {
    /// Every event, in table declaration order.
    pub const ALL: [PlateEvent; 4] = [Self::Start, Self::Pass, Self::Fail, Self::Cancel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Cancel => "cancel",
        }
    }
}

impl Display for PlateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a transition table: `event` moves any state in `from` to `to`.
#[derive(Debug)]
pub struct TransitionRule<S: 'static, E> {
    pub event: E,
    pub from: &'static [S],
    pub to: S,
}

/// A single resolved edge of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub event: E,
    pub from: S,
    pub to: S,
}

/// Immutable, declaration-ordered transition table.
///
/// Tables hold `'static` rule slices so one table can be declared as a
/// `static` and shared by every machine that uses it. Rules carry no guards:
/// an event fires exactly when the current state is listed in its `from`.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::core::{PlateEvent, PlateState, PLATE_TRANSITIONS};
///
/// assert_eq!(
///     PLATE_TRANSITIONS.target(PlateEvent::Start, PlateState::Pending),
///     Some(PlateState::Started)
/// );
/// assert_eq!(PLATE_TRANSITIONS.target(PlateEvent::Start, PlateState::Started), None);
/// assert_eq!(
///     PLATE_TRANSITIONS.next_states(PlateState::Started),
///     vec![PlateState::Passed, PlateState::Failed, PlateState::Cancelled]
/// );
/// ```
#[derive(Debug)]
pub struct TransitionTable<S: 'static, E: 'static> {
    rules: &'static [TransitionRule<S, E>],
}

impl<S: State, E: Copy + PartialEq + Debug> TransitionTable<S, E> {
    pub const fn new(rules: &'static [TransitionRule<S, E>]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [TransitionRule<S, E>] {
        self.rules
    }

    /// Target of `event` fired from `from`, if the table has a matching row.
    pub fn target(&self, event: E, from: S) -> Option<S> {
        self.rules
            .iter()
            .find(|rule| rule.event == event && rule.from.contains(&from))
            .map(|rule| rule.to)
    }

    /// Every edge leaving `from`, in declaration order.
    pub fn transitions_from(&self, from: S) -> impl Iterator<Item = Transition<S, E>> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.from.contains(&from))
            .map(move |rule| Transition {
                event: rule.event,
                from,
                to: rule.to,
            })
    }

    /// Events that can fire from `from`, in declaration order.
    pub fn events_from(&self, from: S) -> Vec<E> {
        self.transitions_from(from).map(|t| t.event).collect()
    }

    /// Distinct states one transition away from `from`, in declaration order.
    pub fn next_states(&self, from: S) -> Vec<S> {
        let mut states: Vec<S> = Vec::new();
        for transition in self.transitions_from(from) {
            if !states.contains(&transition.to) {
                states.push(transition.to);
            }
        }
        states
    }
}

/// The plate lifecycle graph.
///
/// | Event  | From                               | To        |
/// |--------|------------------------------------|-----------|
/// | start  | pending                            | started   |
/// | pass   | started                            | passed    |
/// | fail   | started                            | failed    |
/// | cancel | pending, started, passed, failed   | cancelled |
pub static PLATE_TRANSITIONS: TransitionTable<PlateState, PlateEvent> = TransitionTable::new(&[
    TransitionRule {
        event: PlateEvent::Start,
        from: &[PlateState::Pending],
        to: PlateState::Started,
    },
    TransitionRule {
        event: PlateEvent::Pass,
        from: &[PlateState::Started],
        to: PlateState::Passed,
    },
    TransitionRule {
        event: PlateEvent::Fail,
        from: &[PlateState::Started],
        to: PlateState::Failed,
    },
    TransitionRule {
        event: PlateEvent::Cancel,
        from: &[
            PlateState::Pending,
            PlateState::Started,
            PlateState::Passed,
            PlateState::Failed,
        ],
        to: PlateState::Cancelled,
    },
]);
