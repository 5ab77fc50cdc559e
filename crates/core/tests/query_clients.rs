use std::cell::RefCell;
use std::collections::BTreeMap;

use modelgen_core::model::{Define, Parameter};
use modelgen_core::query::{
    defines_for_classes, ClassHierarchy, QueryError, SnapshotIndex, TypeIndex,
};

/// Index double that records the size of every defines batch it answers.
struct BatchRecorder {
    batch_sizes: RefCell<Vec<usize>>,
    fail_on: Option<String>,
}

impl BatchRecorder {
    fn new() -> Self {
        Self { batch_sizes: RefCell::new(Vec::new()), fail_on: None }
    }

    fn failing_on(class: &str) -> Self {
        Self { batch_sizes: RefCell::new(Vec::new()), fail_on: Some(class.to_string()) }
    }
}

impl TypeIndex for BatchRecorder {
    fn class_hierarchy(&self) -> Result<Option<ClassHierarchy>, QueryError> {
        Ok(Some(ClassHierarchy::default()))
    }

    fn defines_batch(&self, classes: &[String]) -> Result<BTreeMap<String, Vec<Define>>, QueryError> {
        if let Some(bad) = &self.fail_on {
            if classes.contains(bad) {
                return Err(QueryError::Transport("batch timed out".into()));
            }
        }
        self.batch_sizes.borrow_mut().push(classes.len());
        Ok(classes
            .iter()
            .map(|class| {
                let define = Define {
                    name: format!("{class}.method"),
                    parent: class.clone(),
                    parameters: vec![Parameter::new("self")],
                };
                (class.clone(), vec![define])
            })
            .collect())
    }
}

fn class_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("app.Class{i:04}")).collect()
}

/// A large class set is split into batches of the requested size, with a
/// final partial batch.
#[test]
fn defines_requests_are_batched() {
    let index = BatchRecorder::new();
    let classes = class_names(1203);

    let merged = defines_for_classes(&index, &classes, 500);

    assert_eq!(*index.batch_sizes.borrow(), vec![500, 500, 203]);
    assert_eq!(merged.len(), 1203);
}

/// A zero batch size is clamped instead of looping forever.
#[test]
fn zero_batch_size_is_clamped() {
    let index = BatchRecorder::new();
    let classes = class_names(3);
    let merged = defines_for_classes(&index, &classes, 0);
    assert_eq!(merged.len(), 3);
}

/// One timed-out batch degrades to an empty contribution for its classes;
/// the other batches still answer.
#[test]
fn failed_batch_does_not_abort_others() {
    let index = BatchRecorder::failing_on("app.Class0002");
    let classes = class_names(6);

    let merged = defines_for_classes(&index, &classes, 2);

    // Batch [0002, 0003] fails; the other two batches contribute.
    assert_eq!(merged.len(), 4);
    assert!(merged.contains_key("app.Class0000"));
    assert!(!merged.contains_key("app.Class0002"));
    assert!(!merged.contains_key("app.Class0003"));
    assert!(merged.contains_key("app.Class0005"));
}

const SNAPSHOT_BODY: &str = r#"{
  "hierarchy": {
    "Base": ["Mid"],
    "Mid": ["Leaf"]
  },
  "defines": {
    "Mid": [
      {
        "name": "app.Mid.resolve_name",
        "parent": "Mid",
        "parameters": [{"name": "self"}, {"name": "info"}]
      }
    ]
  }
}"#;

#[test]
fn snapshot_round_trips_hierarchy_and_defines() {
    let index = SnapshotIndex::from_json(SNAPSHOT_BODY).expect("parse");

    let hierarchy = index.class_hierarchy().expect("query").expect("available");
    assert_eq!(hierarchy.subclasses("Base"), &["Mid".to_string()]);

    let defines = index
        .defines_batch(&["Mid".to_string(), "Leaf".to_string()])
        .expect("query");
    assert_eq!(defines.len(), 1);
    assert_eq!(defines["Mid"][0].name, "app.Mid.resolve_name");
}

/// A snapshot without a hierarchy section represents an unindexed codebase:
/// unavailable, not an error.
#[test]
fn snapshot_without_hierarchy_reads_as_unavailable() {
    let index = SnapshotIndex::from_json(r#"{"defines": {}}"#).expect("parse");
    assert!(index.class_hierarchy().expect("query").is_none());
}

#[test]
fn malformed_snapshot_is_a_protocol_fault() {
    let result = SnapshotIndex::from_json("{not json");
    assert!(matches!(result, Err(QueryError::Protocol(_))));
}

#[test]
fn snapshot_opens_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, SNAPSHOT_BODY).expect("write snapshot");

    let index = SnapshotIndex::open(&path).expect("open");
    assert!(index.class_hierarchy().expect("query").is_some());
}

#[test]
fn missing_snapshot_file_is_a_transport_fault() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = SnapshotIndex::open(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(QueryError::Transport(_))));
}
