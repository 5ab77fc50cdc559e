//! Data model for taint entry-point specifications.
//!
//! This module contains:
//! - Member definitions as reported by the query boundary
//! - Annotation and whitelist specifications supplied by domain profiles
//! - The final `Model` record consumed by the downstream taint engine

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Taint classification for a parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaintRole {
    /// Introduces attacker-controlled data.
    Source,
    /// Consumes data that must not be attacker-controlled.
    Sink,
    /// Cleans data passing through it.
    Sanitize,
    /// No taint behavior attached.
    None,
}

impl std::fmt::Display for TaintRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TaintRole::Source => "source",
            TaintRole::Sink => "sink",
            TaintRole::Sanitize => "sanitize",
            TaintRole::None => "none",
        };
        f.write_str(text)
    }
}

/// A single parameter of a member definition, as reported by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared type of the parameter, when the index knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), annotation: None }
    }

    pub fn with_annotation(name: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self { name: name.into(), annotation: Some(annotation.into()) }
    }
}

/// A member definition surfaced by the query boundary.
///
/// Read-only to this system; the index owns its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Define {
    /// Fully-qualified callable name (e.g. `app.schema.Query.resolve_user`).
    pub name: String,
    /// Fully-qualified name of the declaring class.
    pub parent: String,
    pub parameters: Vec<Parameter>,
}

/// A (class, define) pair surfaced by a source generator before filtering.
///
/// Transient: candidates live only within one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub class_name: String,
    pub define: Define,
}

/// What taint behavior to attach to a matched callable.
///
/// Immutable once constructed; built once per domain profile and passed
/// through the pipeline by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSpecification {
    /// Role attached to every non-whitelisted parameter.
    pub parameter_role: TaintRole,
    /// Role attached to the return value.
    pub return_role: TaintRole,
}

impl AnnotationSpecification {
    /// Default entry-point taint: parameters carry user-controlled input,
    /// the return value flows back to the user.
    pub fn entrypoint() -> Self {
        Self { parameter_role: TaintRole::Source, return_role: TaintRole::Sink }
    }
}

/// Parameters excluded from tainting regardless of role.
///
/// Variadic parameters (any `*`-prefixed name) are always excluded, in
/// addition to the configured name and type sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistSpecification {
    #[serde(default)]
    pub parameter_names: BTreeSet<String>,
    #[serde(default)]
    pub parameter_types: BTreeSet<String>,
}

impl WhitelistSpecification {
    /// Whitelist covering the receiver conventions `self` and `cls`.
    ///
    /// Domain profiles typically extend this with a framework context type.
    pub fn receivers() -> Self {
        Self {
            parameter_names: ["self", "cls"].iter().map(|s| s.to_string()).collect(),
            parameter_types: BTreeSet::new(),
        }
    }

    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_names.insert(name.into());
        self
    }

    pub fn with_parameter_type(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.insert(type_name.into());
        self
    }

    /// Whether `parameter` is excluded from tainting.
    pub fn excludes(&self, parameter: &Parameter) -> bool {
        parameter.name.starts_with('*')
            || self.parameter_names.contains(&parameter.name)
            || parameter
                .annotation
                .as_deref()
                .is_some_and(|annotation| self.parameter_types.contains(annotation))
    }
}

/// Final per-parameter taint decision within a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterModel {
    pub name: String,
    pub role: TaintRole,
}

/// The finished entry-point specification for one callable.
///
/// Two candidates resolving to the same fully-qualified callable collapse
/// to one model; the pipeline keeps the first-seen resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Fully-qualified callable name; the deduplication key.
    pub callable: String,
    pub parameters: Vec<ParameterModel>,
    pub return_role: TaintRole,
    /// Parameter names the whitelist excluded from tainting.
    pub whitelisted: Vec<String>,
}

impl Model {
    /// Resolve a define into a model under the given annotation and
    /// whitelist. Whitelisted parameters keep their position with a `None`
    /// role so the downstream consumer sees the full signature.
    pub fn resolve(
        define: &Define,
        annotations: &AnnotationSpecification,
        whitelist: &WhitelistSpecification,
    ) -> Self {
        let mut parameters = Vec::with_capacity(define.parameters.len());
        let mut whitelisted = Vec::new();
        for parameter in &define.parameters {
            let role = if whitelist.excludes(parameter) {
                whitelisted.push(parameter.name.clone());
                TaintRole::None
            } else {
                annotations.parameter_role
            };
            parameters.push(ParameterModel { name: parameter.name.clone(), role });
        }
        Model {
            callable: define.name.clone(),
            parameters,
            return_role: annotations.return_role,
            whitelisted,
        }
    }
}
