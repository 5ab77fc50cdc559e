//! Query boundary to the external type-indexing service.
//!
//! Everything this system knows about a codebase arrives through the
//! [`TypeIndex`] trait: a class-hierarchy snapshot plus batched member
//! definitions. The index is an injected capability so tests can substitute
//! an in-memory hierarchy for a live service.

pub mod snapshot;
pub mod subprocess;

pub use snapshot::SnapshotIndex;
pub use subprocess::SubprocessIndex;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::Define;

/// Default number of classes per member-definition request, matching the
/// service's request-size limits.
pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The index service is unreachable or its tool failed to run.
    #[error("Type index unreachable: {0}")]
    Transport(String),
    /// The service answered, but not in the shape the protocol promises.
    #[error("Malformed index response: {0}")]
    Protocol(String),
}

/// Immutable snapshot mapping a fully-qualified type name to its immediate
/// subclass names.
///
/// A name absent from the mapping has zero known subclasses; the query that
/// produced the snapshot already resolved it. Built once per query and
/// never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassHierarchy {
    hierarchy: BTreeMap<String, Vec<String>>,
}

impl ClassHierarchy {
    pub fn new(hierarchy: BTreeMap<String, Vec<String>>) -> Self {
        Self { hierarchy }
    }

    /// Immediate subclasses of `name`; empty when the index knows none.
    pub fn subclasses(&self, name: &str) -> &[String] {
        self.hierarchy.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hierarchy.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_empty()
    }
}

/// Injected capability over the external type-indexing service.
///
/// Suspension points of the whole pipeline live behind this trait; the rest
/// of the core is a pure read-and-transform pass over the results.
pub trait TypeIndex {
    /// Full class hierarchy, or `None` when the service has no hierarchy
    /// data for the codebase (e.g. it was never indexed). `Err` is reserved
    /// for transport-level faults.
    fn class_hierarchy(&self) -> Result<Option<ClassHierarchy>, QueryError>;

    /// Member definitions for one batch of classes, keyed by class, with
    /// each class's definitions in the order the index reports them.
    ///
    /// Callers should go through [`defines_for_classes`], which owns batch
    /// splitting and merging; implementations only answer a single batch.
    fn defines_batch(&self, classes: &[String]) -> Result<BTreeMap<String, Vec<Define>>, QueryError>;
}

/// Fetch member definitions for `classes`, split into batches of
/// `batch_size` to respect the service's request-size limits.
///
/// Batches are independent read-only queries: a failed batch degrades to an
/// empty contribution for its classes (logged, never fatal) instead of
/// aborting the others. Results are merged by concatenation per class and
/// keyed by class name, so the outcome is deterministic regardless of the
/// order batches complete in.
pub fn defines_for_classes(
    index: &dyn TypeIndex,
    classes: &[String],
    batch_size: usize,
) -> BTreeMap<String, Vec<Define>> {
    let batch_size = batch_size.max(1);
    let mut merged: BTreeMap<String, Vec<Define>> = BTreeMap::new();
    for batch in classes.chunks(batch_size) {
        match index.defines_batch(batch) {
            Ok(defines) => {
                for (class, batch_defines) in defines {
                    merged.entry(class).or_default().extend(batch_defines);
                }
            }
            Err(err) => {
                warn!(classes = batch.len(), error = %err, "defines batch unavailable; skipping");
            }
        }
    }
    merged
}

/// In-memory index for tests and fixtures.
///
/// Substitutes for a live service wherever a [`TypeIndex`] is expected;
/// construct with [`InMemoryIndex::unavailable`] to simulate a codebase the
/// service never indexed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    hierarchy: Option<ClassHierarchy>,
    defines: BTreeMap<String, Vec<Define>>,
}

impl InMemoryIndex {
    pub fn new(hierarchy: ClassHierarchy) -> Self {
        Self { hierarchy: Some(hierarchy), defines: BTreeMap::new() }
    }

    /// An index with no hierarchy data at all.
    pub fn unavailable() -> Self {
        Self { hierarchy: None, defines: BTreeMap::new() }
    }

    pub fn with_defines(mut self, class: impl Into<String>, defines: Vec<Define>) -> Self {
        self.defines.insert(class.into(), defines);
        self
    }
}

impl TypeIndex for InMemoryIndex {
    fn class_hierarchy(&self) -> Result<Option<ClassHierarchy>, QueryError> {
        Ok(self.hierarchy.clone())
    }

    fn defines_batch(&self, classes: &[String]) -> Result<BTreeMap<String, Vec<Define>>, QueryError> {
        Ok(classes
            .iter()
            .filter_map(|class| self.defines.get(class).map(|defines| (class.clone(), defines.clone())))
            .collect())
    }
}
