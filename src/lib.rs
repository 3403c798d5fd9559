//! Plate lifecycle: state machine and child plate policy for laboratory
//! sample plates.
//!
//! A plate moves through a fixed, guard-free graph of states. Separately,
//! the state it is in decides which child plates may be created from it.
//! Both concerns read the same source of truth, the plate's own state.
//!
//! # Core Concepts
//!
//! - **States and events**: [`PlateState`], [`PlateEvent`] and the shared
//!   [`PLATE_TRANSITIONS`] table
//! - **Plates**: the [`Plate`] trait the host entity implements, with
//!   [`PlateRecord`] as an in-memory implementation
//! - **Purposes**: [`Purpose`] trees, usually loaded through a
//!   [`PurposeCatalog`]
//! - **Lifecycle**: [`PlateLifecycle`] fires events and answers
//!   "where can this plate go" and "what may it spawn"
//!
//! # Example
//!
//! ```rust
//! use plate_lifecycle::purpose::PurposeCatalogBuilder;
//! use plate_lifecycle::{PlateLifecycle, PlateRecord, PlateState};
//!
//! let catalog = PurposeCatalogBuilder::new()
//!     .purpose("Pulldown stock plate", ["Pulldown QC plate", "Library plate"])
//!     .purpose("Pulldown QC plate", Vec::<String>::new())
//!     .purpose("Library plate", Vec::<String>::new())
//!     .build()?;
//!
//! let plate = PlateRecord::new(catalog.require("Pulldown stock plate")?);
//! let mut lifecycle = PlateLifecycle::attach(plate);
//!
//! assert_eq!(
//!     lifecycle.reachable_states(),
//!     Some(vec![PlateState::Pending, PlateState::Started, PlateState::Cancelled])
//! );
//!
//! lifecycle.start()?;
//! lifecycle.control_child_plate_creation(|purposes| {
//!     assert_eq!(purposes.len(), 1);
//!     assert!(purposes[0].is_quality_control());
//! });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod lifecycle;
pub mod plate;
pub mod policy;
pub mod purpose;

// Re-export commonly used types
pub use crate::core::{PlateEvent, PlateState, State, PLATE_TRANSITIONS};
pub use lifecycle::{LifecycleError, PlateLifecycle};
pub use plate::{Plate, PlateId, PlateRecord};
pub use policy::{eligible_child_purposes, ChildFilter};
pub use purpose::{CatalogError, Purpose, PurposeCatalog, PurposeKind};
