//! Validated, resolved set of purposes.

use super::definition::PurposeDefinition;
use super::error::{CatalogError, DefinitionError};
use super::Purpose;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// Purposes resolved from definitions, looked up by name.
///
/// Building a catalogue validates every definition and reports ALL problems
/// at once rather than stopping at the first.
///
/// # Example
///
/// ```rust
/// use plate_lifecycle::purpose::{PurposeCatalog, PurposeDefinition};
///
/// let catalog = PurposeCatalog::from_definitions(vec![
///     PurposeDefinition::new("Pulldown stock plate")
///         .children(["Pulldown QC plate", "Library plate"]),
///     PurposeDefinition::new("Pulldown QC plate"),
///     PurposeDefinition::new("Library plate"),
/// ])
/// .unwrap();
///
/// let stock = catalog.get("Pulldown stock plate").unwrap();
/// assert!(stock.children()[0].is_quality_control());
/// assert_eq!(stock.children()[1].name(), "Library plate");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PurposeCatalog {
    purposes: Vec<Arc<Purpose>>,
    index: HashMap<String, usize>,
}

impl PurposeCatalog {
    /// Validate and resolve definitions, keeping their order.
    pub fn from_definitions(definitions: Vec<PurposeDefinition>) -> Result<Self, CatalogError> {
        let edges = child_edges(&definitions);
        let components = child_first_components(&edges);

        match validate(&definitions, &edges, &components) {
            Validation::Success(_) => {}
            Validation::Failure(errors) => {
                let errors: Vec<DefinitionError> = errors.iter().cloned().collect();
                tracing::warn!(problems = errors.len(), "rejected purpose catalogue");
                return Err(CatalogError::Invalid(errors));
            }
        }

        // Components come children first and are single definitions once
        // cycles are ruled out, so every child is built before its parent.
        let mut built: Vec<Option<Arc<Purpose>>> = vec![None; definitions.len()];
        for &node in components.iter().flatten() {
            let def = &definitions[node];
            let mut children = Vec::with_capacity(edges[node].len());
            for &child in &edges[node] {
                let purpose = built[child]
                    .clone()
                    .ok_or_else(|| CatalogError::UnknownPurpose(definitions[child].name.clone()))?;
                children.push(purpose);
            }
            built[node] = Some(Arc::new(
                Purpose::with_kind(def.name.clone(), def.resolved_kind()).with_children(children),
            ));
        }

        let purposes: Vec<Arc<Purpose>> = built.into_iter().flatten().collect();
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), i))
            .collect();

        tracing::debug!(purposes = purposes.len(), "loaded purpose catalogue");
        Ok(Self { purposes, index })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Purpose>> {
        self.index.get(name).map(|&i| &self.purposes[i])
    }

    /// Like [`get`](Self::get), but an absent purpose is an error.
    pub fn require(&self, name: &str) -> Result<Arc<Purpose>, CatalogError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownPurpose(name.to_string()))
    }

    /// Purposes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Purpose>> {
        self.purposes.iter()
    }

    pub fn len(&self) -> usize {
        self.purposes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purposes.is_empty()
    }
}

/// Builder for assembling a catalogue in code.
///
/// ```rust
/// use plate_lifecycle::purpose::{PurposeCatalogBuilder, PurposeDefinition, PurposeKind};
///
/// let catalog = PurposeCatalogBuilder::new()
///     .purpose("Stock plate", ["QC plate", "Library plate"])
///     .define(PurposeDefinition::new("QC plate").kind(PurposeKind::QualityControl))
///     .purpose("Library plate", Vec::<String>::new())
///     .build()
///     .unwrap();
///
/// assert!(catalog.get("Stock plate").unwrap().children()[0].is_quality_control());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PurposeCatalogBuilder {
    definitions: Vec<PurposeDefinition>,
}

impl PurposeCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a purpose whose kind is derived from its name.
    pub fn purpose<I, N>(mut self, name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.definitions
            .push(PurposeDefinition::new(name).children(children));
        self
    }

    /// Add a fully specified definition.
    pub fn define(mut self, definition: PurposeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn build(self) -> Result<PurposeCatalog, CatalogError> {
        PurposeCatalog::from_definitions(self.definitions)
    }
}

fn validate(
    definitions: &[PurposeDefinition],
    edges: &[Vec<usize>],
    components: &[Vec<usize>],
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    let known: HashSet<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();

    for (index, def) in definitions.iter().enumerate() {
        if def.name.trim().is_empty() {
            checks.push(Validation::fail(DefinitionError::EmptyName { index }));
        }

        if !seen.insert(def.name.as_str()) && reported.insert(def.name.as_str()) {
            checks.push(Validation::fail(DefinitionError::DuplicateName {
                name: def.name.clone(),
            }));
        }

        for child in &def.children {
            if !known.contains(child.as_str()) {
                checks.push(Validation::fail(DefinitionError::UnknownChild {
                    parent: def.name.clone(),
                    child: child.clone(),
                }));
            }
        }
    }

    // A definition is on a cycle when its component has several members or
    // it lists itself as a child.
    let mut on_cycle = vec![false; definitions.len()];
    for component in components {
        if component.len() > 1 || edges[component[0]].contains(&component[0]) {
            for &node in component {
                on_cycle[node] = true;
            }
        }
    }

    let mut cyclic: HashSet<&str> = HashSet::new();
    for (def, &flag) in definitions.iter().zip(&on_cycle) {
        if flag && cyclic.insert(def.name.as_str()) {
            checks.push(Validation::fail(DefinitionError::Cycle {
                name: def.name.clone(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Child links by definition position. Unknown children are left out; a
/// repeated name resolves to its first definition.
fn child_edges(definitions: &[PurposeDefinition]) -> Vec<Vec<usize>> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(definitions.len());
    for (i, def) in definitions.iter().enumerate() {
        position.entry(def.name.as_str()).or_insert(i);
    }

    definitions
        .iter()
        .map(|def| {
            def.children
                .iter()
                .filter_map(|child| position.get(child.as_str()).copied())
                .collect()
        })
        .collect()
}

/// Strongly connected components of the child graph, each emitted only after
/// every component it links to.
///
/// Tarjan's algorithm driven by an explicit frame stack instead of recursion.
/// Runs in O(n + e).
fn child_first_components(edges: &[Vec<usize>]) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;

    let mut order = vec![UNVISITED; edges.len()];
    let mut low = vec![0; edges.len()];
    let mut on_stack = vec![false; edges.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut frames: Vec<(usize, usize)> = Vec::new();
    let mut components = Vec::new();
    let mut next = 0;

    for root in 0..edges.len() {
        if order[root] != UNVISITED {
            continue;
        }

        order[root] = next;
        low[root] = next;
        next += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;

            match edges[node].get(frame.1) {
                Some(&child) => {
                    frame.1 += 1;
                    if order[child] == UNVISITED {
                        order[child] = next;
                        low[child] = next;
                        next += 1;
                        stack.push(child);
                        on_stack[child] = true;
                        frames.push((child, 0));
                    } else if on_stack[child] {
                        low[node] = low[node].min(order[child]);
                    }
                }
                None => {
                    frames.pop();
                    if let Some(&(parent, _)) = frames.last() {
                        low[parent] = low[parent].min(low[node]);
                    }

                    if low[node] == order[node] {
                        let mut component = Vec::new();
                        while let Some(member) = stack.pop() {
                            on_stack[member] = false;
                            component.push(member);
                            if member == node {
                                break;
                            }
                        }
                        components.push(component);
                    }
                }
            }
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purpose::PurposeKind;

    fn pulldown_catalog() -> PurposeCatalog {
        PurposeCatalogBuilder::new()
            .purpose("Pulldown stock plate", ["Pulldown QC plate", "Library plate"])
            .purpose("Pulldown QC plate", Vec::<String>::new())
            .purpose("Library plate", ["Pooled plate"])
            .purpose("Pooled plate", Vec::<String>::new())
            .build()
            .unwrap()
    }

    #[test]
    fn catalog_resolves_nested_children() {
        let catalog = pulldown_catalog();
        let stock = catalog.get("Pulldown stock plate").unwrap();

        let names: Vec<_> = stock.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Pulldown QC plate", "Library plate"]);
        assert_eq!(stock.children()[1].children()[0].name(), "Pooled plate");
    }

    #[test]
    fn catalog_shares_resolved_purposes() {
        let catalog = pulldown_catalog();
        let stock = catalog.get("Pulldown stock plate").unwrap();
        let library = catalog.get("Library plate").unwrap();

        assert!(Arc::ptr_eq(&stock.children()[1], library));
    }

    #[test]
    fn catalog_keeps_definition_order() {
        let catalog = pulldown_catalog();
        let names: Vec<_> = catalog.iter().map(|p| p.name()).collect();

        assert_eq!(
            names,
            vec![
                "Pulldown stock plate",
                "Pulldown QC plate",
                "Library plate",
                "Pooled plate"
            ]
        );
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn qc_kind_is_resolved_at_definition_time() {
        let catalog = pulldown_catalog();
        assert_eq!(
            catalog.get("Pulldown QC plate").unwrap().kind(),
            PurposeKind::QualityControl
        );
        assert_eq!(
            catalog.get("Library plate").unwrap().kind(),
            PurposeKind::Standard
        );
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let result = PurposeCatalogBuilder::new()
            .purpose("", Vec::<String>::new())
            .purpose("Stock", ["Missing"])
            .purpose("Stock", Vec::<String>::new())
            .purpose("Loop A", ["Loop B"])
            .purpose("Loop B", ["Loop A"])
            .build();

        match result {
            Err(CatalogError::Invalid(errors)) => {
                assert!(errors.contains(&DefinitionError::EmptyName { index: 0 }));
                assert!(errors.contains(&DefinitionError::DuplicateName {
                    name: "Stock".to_string()
                }));
                assert!(errors.contains(&DefinitionError::UnknownChild {
                    parent: "Stock".to_string(),
                    child: "Missing".to_string(),
                }));
                assert!(errors.contains(&DefinitionError::Cycle {
                    name: "Loop A".to_string()
                }));
                assert!(errors.contains(&DefinitionError::Cycle {
                    name: "Loop B".to_string()
                }));
                assert_eq!(errors.len(), 5);
            }
            other => panic!("Expected invalid catalogue, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let result = PurposeCatalogBuilder::new()
            .purpose("Recursive", ["Recursive"])
            .build();

        assert!(matches!(
            result,
            Err(CatalogError::Invalid(ref errors))
                if errors == &vec![DefinitionError::Cycle { name: "Recursive".to_string() }]
        ));
    }

    #[test]
    fn parent_of_a_cycle_is_not_reported() {
        let result = PurposeCatalogBuilder::new()
            .purpose("Parent", ["Loop"])
            .purpose("Loop", ["Loop"])
            .build();

        match result {
            Err(CatalogError::Invalid(errors)) => {
                assert_eq!(
                    errors,
                    vec![DefinitionError::Cycle {
                        name: "Loop".to_string()
                    }]
                );
            }
            other => panic!("Expected invalid catalogue, got {other:?}"),
        }
    }

    #[test]
    fn every_member_of_a_tangled_cycle_is_reported() {
        // "C" only closes its cycle through "B", which is already finished
        // by the time "C" is explored.
        let result = PurposeCatalogBuilder::new()
            .purpose("A", ["B", "C"])
            .purpose("B", ["A"])
            .purpose("C", ["B"])
            .purpose("Leaf", Vec::<String>::new())
            .build();

        match result {
            Err(CatalogError::Invalid(errors)) => {
                let names: Vec<_> = errors
                    .iter()
                    .map(|e| match e {
                        DefinitionError::Cycle { name } => name.as_str(),
                        other => panic!("Expected only cycles, got {other:?}"),
                    })
                    .collect();
                assert_eq!(names, vec!["A", "B", "C"]);
            }
            other => panic!("Expected invalid catalogue, got {other:?}"),
        }
    }

    fn chain(length: usize) -> PurposeCatalogBuilder {
        (0..length).fold(PurposeCatalogBuilder::new(), |builder, i| {
            let children: Vec<String> = if i + 1 < length {
                vec![format!("P{}", i + 1)]
            } else {
                Vec::new()
            };
            builder.purpose(format!("P{i}"), children)
        })
    }

    #[test]
    fn deep_chain_builds_without_recursion() {
        let catalog = chain(10_000).build().unwrap();
        assert_eq!(catalog.len(), 10_000);

        let mut current = catalog.require("P0").unwrap();
        let mut depth = 0;
        while let Some(next) = current.children().first().cloned() {
            current = next;
            depth += 1;
        }

        assert_eq!(depth, 9_999);
        assert_eq!(current.name(), "P9999");
        assert!(Arc::ptr_eq(&current, catalog.get("P9999").unwrap()));
    }

    #[test]
    fn deep_chain_outlives_its_catalog() {
        let root = chain(10_000).build().unwrap().require("P0").unwrap();
        assert_eq!(root.children()[0].name(), "P1");
        drop(root);
    }

    #[test]
    fn long_cycle_reports_every_member() {
        let result = (0..10_000)
            .fold(PurposeCatalogBuilder::new(), |builder, i| {
                builder.purpose(format!("P{i}"), [format!("P{}", (i + 1) % 10_000)])
            })
            .build();

        match result {
            Err(CatalogError::Invalid(errors)) => {
                assert_eq!(errors.len(), 10_000);
                assert_eq!(
                    errors[0],
                    DefinitionError::Cycle {
                        name: "P0".to_string()
                    }
                );
            }
            other => panic!("Expected invalid catalogue, got {other:?}"),
        }
    }

    #[test]
    fn require_reports_unknown_purpose() {
        let catalog = pulldown_catalog();

        assert!(catalog.require("Library plate").is_ok());
        assert!(matches!(
            catalog.require("Sequencing plate"),
            Err(CatalogError::UnknownPurpose(name)) if name == "Sequencing plate"
        ));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = PurposeCatalog::from_definitions(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get("anything").is_none());
    }
}
