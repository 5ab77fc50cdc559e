use tracing::warn;

use crate::generate::{dedup_models, GenerateError, ModelGenerator};
use crate::model::{Candidate, Model};

/// Concatenates the model output of several generator stages.
///
/// Parts contribute in order and the combined stream is deduplicated by
/// callable name, first-seen resolution winning. A part whose targets the
/// index has no data for simply contributes nothing; a part failing at the
/// transport level is skipped so the others still contribute, and the pass
/// only fails when every part failed that way.
pub struct ComposedGenerator<'a> {
    parts: Vec<Box<dyn ModelGenerator + 'a>>,
}

impl<'a> ComposedGenerator<'a> {
    pub fn new(parts: Vec<Box<dyn ModelGenerator + 'a>>) -> Self {
        Self { parts }
    }
}

impl ModelGenerator for ComposedGenerator<'_> {
    fn gather_candidates(&self) -> Result<Vec<Candidate>, GenerateError> {
        let mut candidates = Vec::new();
        for part in &self.parts {
            candidates.extend(part.gather_candidates()?);
        }
        Ok(candidates)
    }

    /// Attributes the candidate to the first part that models it.
    ///
    /// The composed pipeline path is [`ModelGenerator::generate_models`],
    /// where each part converts its own candidates; this direct form exists
    /// so a composed stage still satisfies the full capability.
    fn compute_model(&self, candidate: &Candidate) -> Option<Model> {
        self.parts.iter().find_map(|part| part.compute_model(candidate))
    }

    fn generate_models(&self) -> Result<Vec<Model>, GenerateError> {
        let mut models = Vec::new();
        let mut last_failure = None;
        let mut failed_parts = 0usize;
        for part in &self.parts {
            match part.generate_models() {
                Ok(part_models) => models.extend(part_models),
                Err(err @ GenerateError::Config(_)) => return Err(err),
                Err(err) => {
                    warn!(error = %err, "generator stage failed; other stages still contribute");
                    failed_parts += 1;
                    last_failure = Some(err);
                }
            }
        }
        if failed_parts > 0 && failed_parts == self.parts.len() {
            if let Some(err) = last_failure {
                return Err(err);
            }
        }
        Ok(dedup_models(models))
    }
}
