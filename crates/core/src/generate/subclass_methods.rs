use tracing::debug;

use crate::generate::{GenerateError, ModelGenerator};
use crate::hierarchy::defines_for_subclasses;
use crate::model::{AnnotationSpecification, Candidate, Model, WhitelistSpecification};
use crate::query::{TypeIndex, DEFAULT_BATCH_SIZE};

/// Source stage: every method defined by a subclass of a base-class set.
///
/// Resolves the subclass set against the index, fetches member definitions
/// for it (batched), and flattens the per-class definition lists into a
/// single candidate stream, classes in sorted order and each class's
/// definitions in index order.
pub struct MethodsOfSubclassesGenerator<'a> {
    index: &'a dyn TypeIndex,
    base_classes: Vec<String>,
    transitive: bool,
    batch_size: usize,
    annotations: AnnotationSpecification,
    whitelist: WhitelistSpecification,
}

impl<'a> MethodsOfSubclassesGenerator<'a> {
    /// Build a transitive source stage over `base_classes`.
    ///
    /// An empty base-class set is a configuration fault, rejected here
    /// before any query is issued.
    pub fn new(
        index: &'a dyn TypeIndex,
        base_classes: Vec<String>,
        annotations: AnnotationSpecification,
        whitelist: WhitelistSpecification,
    ) -> Result<Self, GenerateError> {
        if base_classes.is_empty() {
            return Err(GenerateError::Config("base-class set must not be empty".into()));
        }
        Ok(Self {
            index,
            base_classes,
            transitive: true,
            batch_size: DEFAULT_BATCH_SIZE,
            annotations,
            whitelist,
        })
    }

    /// Only expand immediate subclasses, without descending further.
    pub fn immediate_only(mut self) -> Self {
        self.transitive = false;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

impl ModelGenerator for MethodsOfSubclassesGenerator<'_> {
    fn gather_candidates(&self) -> Result<Vec<Candidate>, GenerateError> {
        let Some(by_target) =
            defines_for_subclasses(self.index, &self.base_classes, self.transitive, self.batch_size)?
        else {
            debug!(base_classes = ?self.base_classes, "no hierarchy data; contributing zero candidates");
            return Ok(Vec::new());
        };

        let mut candidates = Vec::new();
        for by_class in by_target.into_values() {
            for (class_name, defines) in by_class {
                for define in defines {
                    candidates.push(Candidate { class_name: class_name.clone(), define });
                }
            }
        }
        Ok(candidates)
    }

    fn compute_model(&self, candidate: &Candidate) -> Option<Model> {
        Some(Model::resolve(&candidate.define, &self.annotations, &self.whitelist))
    }
}
