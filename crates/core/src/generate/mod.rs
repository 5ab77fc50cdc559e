//! The composable model-generator pipeline.
//!
//! Stages share one capability, [`ModelGenerator`]: enumerate candidate
//! callables, convert each candidate into at most one finished model. Source
//! stages pull candidates from the query boundary; wrapping stages narrow or
//! concatenate other stages without touching annotation behavior.

pub mod composed;
pub mod filtered;
pub mod subclass_methods;

pub use composed::ComposedGenerator;
pub use filtered::{FilteredGenerator, NamePattern};
pub use subclass_methods::MethodsOfSubclassesGenerator;

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Candidate, Model};
use crate::query::QueryError;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid generator configuration (bad pattern, empty base-class set);
    /// surfaced at construction time, before any query is issued.
    #[error("Invalid generator configuration: {0}")]
    Config(String),
    /// The query boundary failed at the transport level; the whole pass is
    /// suspect, unlike an index that merely has no data for a target.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// A stage in the model-generation pipeline.
pub trait ModelGenerator {
    /// Enumerate the callables this stage wants to model.
    fn gather_candidates(&self) -> Result<Vec<Candidate>, GenerateError>;

    /// Turn one enumerated candidate into at most one finished model.
    fn compute_model(&self, candidate: &Candidate) -> Option<Model>;

    /// Run the full stage: gather, convert, deduplicate.
    ///
    /// A pass that produces zero models is a valid success.
    fn generate_models(&self) -> Result<Vec<Model>, GenerateError> {
        let candidates = self.gather_candidates()?;
        Ok(dedup_models(candidates.iter().filter_map(|candidate| self.compute_model(candidate))))
    }
}

/// Collapse models that resolve to the same fully-qualified callable (e.g.
/// one method reached through two subclass paths), keeping the first-seen
/// annotation/whitelist resolution.
pub fn dedup_models(models: impl IntoIterator<Item = Model>) -> Vec<Model> {
    let mut seen = HashSet::new();
    models.into_iter().filter(|model| seen.insert(model.callable.clone())).collect()
}
