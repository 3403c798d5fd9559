//! Child plate creation policy.
//!
//! Whether a plate may spawn children, and of which purposes, depends only
//! on its state and on the kinds of its purpose's children:
//!
//! | State     | Offered children                   |
//! |-----------|------------------------------------|
//! | pending   | none                               |
//! | started   | quality control purposes only      |
//! | passed    | everything except quality control  |
//! | failed    | none                               |
//! | cancelled | none                               |

use crate::core::PlateState;
use crate::purpose::Purpose;
use std::sync::Arc;

/// Predicate applied to a purpose's children in states that allow creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildFilter {
    /// Keep only quality control purposes.
    QualityControlOnly,
    /// Drop quality control purposes.
    ExcludeQualityControl,
}

impl ChildFilter {
    /// Filter in force for `state`, or `None` when the state forbids
    /// child creation outright.
    pub fn for_state(state: PlateState) -> Option<Self> {
        match state {
            PlateState::Started => Some(Self::QualityControlOnly),
            PlateState::Passed => Some(Self::ExcludeQualityControl),
            PlateState::Pending | PlateState::Failed | PlateState::Cancelled => None,
        }
    }

    /// Pure predicate: does this filter let `purpose` through?
    pub fn admits(&self, purpose: &Purpose) -> bool {
        match self {
            Self::QualityControlOnly => purpose.is_quality_control(),
            Self::ExcludeQualityControl => !purpose.is_quality_control(),
        }
    }
}

/// Child purposes a plate of `purpose` may create while in `state`.
///
/// Always an order-preserving subset of `purpose.children()`. Empty when
/// the state forbids creation or nothing passes the filter.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::core::PlateState;
/// use plate_lifecycle::policy::eligible_child_purposes;
/// use plate_lifecycle::purpose::Purpose;
/// use std::sync::Arc;
///
/// let stock = Purpose::new("Pulldown stock plate").with_children([
///     Arc::new(Purpose::new("Pulldown QC plate")),
///     Arc::new(Purpose::new("Library plate")),
/// ]);
///
/// let started = eligible_child_purposes(PlateState::Started, &stock);
/// assert_eq!(started[0].name(), "Pulldown QC plate");
/// assert_eq!(started.len(), 1);
///
/// let passed = eligible_child_purposes(PlateState::Passed, &stock);
/// assert_eq!(passed[0].name(), "Library plate");
/// assert_eq!(passed.len(), 1);
///
/// assert!(eligible_child_purposes(PlateState::Pending, &stock).is_empty());
/// ```
pub fn eligible_child_purposes(state: PlateState, purpose: &Purpose) -> Vec<Arc<Purpose>> {
    let Some(filter) = ChildFilter::for_state(state) else {
        return Vec::new();
    };

    purpose
        .children()
        .iter()
        .filter(|child| filter.admits(child))
        .cloned()
        .collect()
}
