//! Plate lifecycle: transitions plus the child creation policy, over a
//! [`Plate`](crate::plate::Plate).
//!
//! Every operation is synchronous and finishes before returning. Mutations
//! go through `&mut self`, so one wrapped plate is never written from two
//! places at once; serialising access across processes is the host's job.

mod error;
mod machine;

pub use error::LifecycleError;
pub use machine::PlateLifecycle;
