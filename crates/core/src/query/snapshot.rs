use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::Define;
use crate::query::{ClassHierarchy, QueryError, TypeIndex};

/// Type index backed by an exported JSON snapshot on disk.
///
/// The snapshot is the index service's dump format: a `hierarchy` section
/// mapping type names to immediate subclasses and a `defines` section
/// mapping class names to their member definitions. A snapshot without a
/// `hierarchy` section represents a codebase the service never indexed and
/// reads as unavailable, not as an error.
pub struct SnapshotIndex {
    snapshot: Snapshot,
}

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    hierarchy: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    defines: BTreeMap<String, Vec<Define>>,
}

impl SnapshotIndex {
    /// Read and parse a snapshot file.
    pub fn open(path: &Path) -> Result<Self, QueryError> {
        let body = fs::read_to_string(path).map_err(|e| {
            QueryError::Transport(format!("failed to read snapshot {}: {e}", path.display()))
        })?;
        Self::from_json(&body)
    }

    pub fn from_json(body: &str) -> Result<Self, QueryError> {
        let snapshot = serde_json::from_str(body)
            .map_err(|e| QueryError::Protocol(format!("failed to parse snapshot JSON: {e}")))?;
        Ok(Self { snapshot })
    }
}

impl TypeIndex for SnapshotIndex {
    fn class_hierarchy(&self) -> Result<Option<ClassHierarchy>, QueryError> {
        Ok(self.snapshot.hierarchy.clone().map(ClassHierarchy::new))
    }

    fn defines_batch(&self, classes: &[String]) -> Result<BTreeMap<String, Vec<Define>>, QueryError> {
        Ok(classes
            .iter()
            .filter_map(|class| {
                self.snapshot.defines.get(class).map(|defines| (class.clone(), defines.clone()))
            })
            .collect())
    }
}
