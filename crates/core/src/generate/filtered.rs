use regex::Regex;

use crate::generate::{GenerateError, ModelGenerator};
use crate::model::{Candidate, Model};

/// Qualified-name predicate with regex *search* semantics: the pattern may
/// match anywhere in the name, so a suffix-anchored pattern (e.g.
/// `\.mutate$`) matches regardless of the prefix.
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: Regex,
}

impl NamePattern {
    /// Compile the pattern. An invalid pattern is a configuration fault,
    /// surfaced before any query is issued.
    pub fn new(pattern: &str) -> Result<Self, GenerateError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| GenerateError::Config(format!("invalid name pattern: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.pattern.is_match(&candidate.define.name)
    }
}

/// Transparent decorator that narrows a wrapped generator's candidate
/// stream with a predicate.
///
/// Selection only: surviving candidates keep their relative order and the
/// wrapped generator's annotation behavior is delegated to untouched.
pub struct FilteredGenerator<G> {
    inner: G,
    predicate: Box<dyn Fn(&Candidate) -> bool + Send + Sync>,
}

impl<G: ModelGenerator> FilteredGenerator<G> {
    pub fn new(inner: G, predicate: impl Fn(&Candidate) -> bool + Send + Sync + 'static) -> Self {
        Self { inner, predicate: Box::new(predicate) }
    }

    /// Narrow by qualified callable name.
    pub fn matching_name(inner: G, pattern: NamePattern) -> Self {
        Self::new(inner, move |candidate| pattern.matches(candidate))
    }
}

impl<G: ModelGenerator> ModelGenerator for FilteredGenerator<G> {
    fn gather_candidates(&self) -> Result<Vec<Candidate>, GenerateError> {
        let candidates = self.inner.gather_candidates()?;
        Ok(candidates.into_iter().filter(|candidate| (self.predicate)(candidate)).collect())
    }

    fn compute_model(&self, candidate: &Candidate) -> Option<Model> {
        self.inner.compute_model(candidate)
    }
}
