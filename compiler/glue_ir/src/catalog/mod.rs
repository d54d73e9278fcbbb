//! The resolved type catalog.
//!
//! A `TypeCatalog` is built once from the catalog service's output and then
//! only read. It keeps insertion order (the asynchronous path walks the whole
//! catalog and backends derive file layout from first-seen order), an index by
//! type name, and the run-wide skip-set.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{LeafType, SourceLocation};

/// Identifier of one catalog source (one wire-format definition file).
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct CatalogSourceId(String);

impl CatalogSourceId {
    pub fn new(id: impl Into<String>) -> Self {
        CatalogSourceId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogSourceId {
    fn from(id: &str) -> Self {
        CatalogSourceId::new(id)
    }
}

impl From<String> for CatalogSourceId {
    fn from(id: String) -> Self {
        CatalogSourceId(id)
    }
}

/// Inclusive range constraint on a scalar type.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Self {
        ValueRange { low, high }
    }
}

/// One resolved catalog type.
#[derive(Clone, PartialEq, Debug)]
pub struct TypeNode {
    pub name: String,
    pub leaf: LeafType,
    /// Synthesized by the catalog service for an inner anonymous type.
    /// Artificial nodes are never emitted on their own.
    pub artificial: bool,
    pub source: CatalogSourceId,
    pub location: SourceLocation,
    pub range: Option<ValueRange>,
}

impl TypeNode {
    pub fn new(name: impl Into<String>, leaf: LeafType, source: CatalogSourceId) -> Self {
        TypeNode {
            name: name.into(),
            leaf,
            artificial: false,
            location: SourceLocation::file_only(source.as_str()),
            source,
            range: None,
        }
    }

    #[must_use]
    pub fn artificial(mut self) -> Self {
        self.artificial = true;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Two catalog sources declared the same type name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("type '{name}' declared in {second} was already declared in {first}")]
pub struct DuplicateTypeError {
    pub name: String,
    pub first: SourceLocation,
    pub second: SourceLocation,
}

/// Resolved mapping from type name to [`TypeNode`], in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    nodes: Vec<TypeNode>,
    index: FxHashMap<String, usize>,
    skip_set: FxHashSet<String>,
    sources: Vec<CatalogSourceId>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a type. Names are unique across all sources.
    pub fn insert(&mut self, node: TypeNode) -> Result<(), DuplicateTypeError> {
        if let Some(&existing) = self.index.get(&node.name) {
            return Err(DuplicateTypeError {
                name: node.name,
                first: self.nodes[existing].location.clone(),
                second: node.location,
            });
        }
        if !self.sources.contains(&node.source) {
            self.sources.push(node.source.clone());
        }
        self.index.insert(node.name.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add a type name to the run-wide skip-set.
    ///
    /// The name does not need to be present in the catalog.
    pub fn skip(&mut self, name: impl Into<String>) {
        self.skip_set.insert(name.into());
    }

    /// Look up a type by name.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&TypeNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Whether `name` belongs to the skip-set.
    #[inline]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_set.contains(name)
    }

    /// Whether `node` must never reach a backend leaf callback.
    #[inline]
    pub fn is_excluded(&self, node: &TypeNode) -> bool {
        node.artificial || self.is_skipped(&node.name)
    }

    /// All types, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeNode> {
        self.nodes.iter()
    }

    /// Catalog sources, in first-seen order.
    pub fn sources(&self) -> &[CatalogSourceId] {
        &self.sources
    }

    /// Types declared by one source, in insertion order.
    pub fn types_of<'a>(
        &'a self,
        source: &'a CatalogSourceId,
    ) -> impl Iterator<Item = &'a TypeNode> + 'a {
        self.nodes.iter().filter(move |node| &node.source == source)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of names in the skip-set.
    pub fn skipped_count(&self) -> usize {
        self.skip_set.len()
    }
}

impl<'a> IntoIterator for &'a TypeCatalog {
    type Item = &'a TypeNode;
    type IntoIter = std::slice::Iter<'a, TypeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
