//! Purpose catalogue errors.

use thiserror::Error;

/// A single problem found while validating purpose definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("purpose at position {index} has an empty name")]
    EmptyName { index: usize },

    #[error("purpose '{name}' is defined more than once")]
    DuplicateName { name: String },

    #[error("purpose '{parent}' lists unknown child '{child}'")]
    UnknownChild { parent: String, child: String },

    #[error("purpose '{name}' is its own descendant")]
    Cycle { name: String },
}

/// Errors that can occur when building or querying a purpose catalogue
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Every problem found in the definitions, not just the first
    #[error("purpose catalogue has {} invalid definition(s)", .0.len())]
    Invalid(Vec<DefinitionError>),

    #[error("unknown purpose '{0}'")]
    UnknownPurpose(String),
}
