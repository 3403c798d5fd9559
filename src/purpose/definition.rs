//! Serializable purpose definitions, the catalogue's configuration format.

use super::PurposeKind;
use serde::{Deserialize, Serialize};

/// One purpose as written in configuration.
///
/// Children are referenced by name. When `kind` is absent it is derived
/// from the name with [`PurposeKind::classify`]. Hosts load a list of these
/// with any serde format and hand it to
/// [`PurposeCatalog::from_definitions`](super::PurposeCatalog::from_definitions):
///
/// ```json
/// [
///   { "name": "Pulldown stock plate", "children": ["Pulldown QC plate", "Library plate"] },
///   { "name": "Pulldown QC plate" },
///   { "name": "Library plate", "kind": "standard" }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PurposeDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PurposeKind>,

    #[serde(default)]
    pub children: Vec<String>,
}

impl PurposeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            children: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: PurposeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.children.push(name.into());
        self
    }

    pub fn children<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.children.extend(names.into_iter().map(Into::into));
        self
    }

    /// Kind stated in the definition, or the one implied by the name.
    pub fn resolved_kind(&self) -> PurposeKind {
        self.kind
            .unwrap_or_else(|| PurposeKind::classify(&self.name))
    }
}
