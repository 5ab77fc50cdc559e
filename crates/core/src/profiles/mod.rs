//! Domain profiles: concrete wirings of the generator pipeline for one
//! framework convention each. New frameworks get a new profile; the
//! pipeline itself stays untouched.

pub mod graphql;

pub use graphql::GraphQlProfile;

use std::collections::HashMap;

use crate::generate::{GenerateError, ModelGenerator};
use crate::model::{AnnotationSpecification, WhitelistSpecification};
use crate::query::TypeIndex;

/// Optional per-invocation overrides for a profile's annotation and
/// whitelist defaults.
#[derive(Debug, Clone, Default)]
pub struct ProfileOverrides {
    pub annotations: Option<AnnotationSpecification>,
    pub whitelist: Option<WhitelistSpecification>,
}

/// A concrete wiring of the generator pipeline for one framework
/// convention.
pub trait Profile: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Build the profile's generator against a live index.
    ///
    /// Configuration faults (bad pattern, empty base-class set) surface
    /// here, before any query is issued.
    fn build<'a>(
        &self,
        index: &'a dyn TypeIndex,
        overrides: &ProfileOverrides,
    ) -> Result<Box<dyn ModelGenerator + 'a>, GenerateError>;
}

/// Registry of domain profiles; callers select by name.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Box<dyn Profile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self { profiles: HashMap::new() }
    }

    pub fn register<P: Profile + 'static>(&mut self, profile: P) -> &mut Self {
        self.profiles.insert(profile.name().to_string(), Box::new(profile));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Profile> {
        self.profiles.get(name).map(|p| &**p)
    }

    /// Return a sorted list of registered profile names for error
    /// messages/help.
    pub fn names(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.profiles.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Convenience builder for a registry populated with the built-in profiles.
pub fn default_profile_registry() -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();
    registry.register(GraphQlProfile);
    registry
}
