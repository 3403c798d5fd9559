//! Plate purposes: the type of a plate and the purposes it may spawn.
//!
//! A purpose's [`PurposeKind`] is settled when the purpose is defined.
//! Decision code asks [`Purpose::is_quality_control`] and never looks at
//! display names, so renaming a purpose cannot silently change policy.

mod catalog;
mod definition;
mod error;

pub use catalog::{PurposeCatalog, PurposeCatalogBuilder};
pub use definition::PurposeDefinition;
pub use error::{CatalogError, DefinitionError};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the quality control purpose singled out by the child policy.
pub const PULLDOWN_QC_PLATE: &str = "Pulldown QC plate";

/// Role a purpose plays in child creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurposeKind {
    #[default]
    Standard,
    QualityControl,
}

impl PurposeKind {
    /// Kind implied by a purpose name when a definition does not state one.
    pub fn classify(name: &str) -> Self {
        if name == PULLDOWN_QC_PLATE {
            Self::QualityControl
        } else {
            Self::Standard
        }
    }

    pub fn is_quality_control(&self) -> bool {
        matches!(self, Self::QualityControl)
    }
}

/// A plate purpose and its ordered child purposes.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::purpose::{Purpose, PurposeKind};
/// use std::sync::Arc;
///
/// let stock = Purpose::new("Pulldown stock plate").with_children([
///     Arc::new(Purpose::new("Pulldown QC plate")),
///     Arc::new(Purpose::new("Library plate")),
/// ]);
///
/// assert_eq!(stock.children().len(), 2);
/// assert_eq!(stock.children()[0].kind(), PurposeKind::QualityControl);
/// assert!(!stock.children()[1].is_quality_control());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purpose {
    name: String,
    kind: PurposeKind,
    children: Vec<Arc<Purpose>>,
}

impl Purpose {
    /// Create a childless purpose, classifying its kind from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = PurposeKind::classify(&name);
        Self::with_kind(name, kind)
    }

    /// Create a childless purpose with an explicit kind.
    pub fn with_kind(name: impl Into<String>, kind: PurposeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Replace the child purposes, keeping the given order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Arc<Purpose>>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PurposeKind {
        self.kind
    }

    pub fn is_quality_control(&self) -> bool {
        self.kind.is_quality_control()
    }

    pub fn children(&self) -> &[Arc<Purpose>] {
        &self.children
    }
}

impl Drop for Purpose {
    // Unlink descendants one at a time; dropping a deep chain must not
    // recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(mut purpose) = Arc::try_unwrap(child) {
                pending.append(&mut purpose.children);
            }
        }
    }
}
