//! Subclass flattening over a class-hierarchy snapshot.
//!
//! The hierarchy is a directed graph of type-to-immediate-subclass edges.
//! Well-formed inheritance graphs are acyclic, but the snapshot arrives
//! from an external service, so the traversal tracks visited names and
//! short-circuits anything it has already expanded: cycles and diamond
//! edges terminate instead of recursing forever.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::model::Define;
use crate::query::{defines_for_classes, ClassHierarchy, QueryError, TypeIndex};

/// Every subclass of `target` reachable through immediate-subclass edges,
/// one or more steps away. The target itself is not included unless the
/// graph (malformed) reaches it as its own descendant.
pub fn transitive_subclasses(target: &str, hierarchy: &ClassHierarchy) -> BTreeSet<String> {
    let mut seen = HashSet::new();
    let mut flattened = BTreeSet::new();
    seen.insert(target.to_string());
    flatten_into(target, hierarchy, &mut seen, &mut flattened);
    flattened
}

fn flatten_into(
    target: &str,
    hierarchy: &ClassHierarchy,
    seen: &mut HashSet<String>,
    out: &mut BTreeSet<String>,
) {
    for subclass in hierarchy.subclasses(target) {
        out.insert(subclass.clone());
        // Already-expanded names are not expanded again; this is what
        // bounds the traversal on cyclic or diamond-shaped input.
        if seen.insert(subclass.clone()) {
            flatten_into(subclass, hierarchy, seen, out);
        }
    }
}

/// Per-target subclass expansion.
///
/// Transitive mode returns each target's sorted transitive closure;
/// immediate mode returns exactly the hierarchy's entry for the target.
/// Targets are processed independently and never unioned; a target with no
/// subclasses is omitted from the map entirely, so callers can distinguish
/// "no subclasses" from "not queried".
pub fn subclasses_for_targets(
    targets: &[String],
    hierarchy: &ClassHierarchy,
    transitive: bool,
) -> BTreeMap<String, Vec<String>> {
    let mut result = BTreeMap::new();
    for target in targets {
        let subclasses: Vec<String> = if transitive {
            transitive_subclasses(target, hierarchy).into_iter().collect()
        } else {
            hierarchy.subclasses(target).to_vec()
        };
        if !subclasses.is_empty() {
            result.insert(target.clone(), subclasses);
        }
    }
    result
}

/// Expand `targets` against the live index and fetch member definitions for
/// every discovered subclass, batched.
///
/// Returns `None` when the index has no hierarchy data at all; callers
/// treat that as "zero models for these targets", never as a failure.
/// The result keeps the per-target, per-class structure so downstream
/// stages can attribute definitions to their declaring class.
pub fn defines_for_subclasses(
    index: &dyn TypeIndex,
    targets: &[String],
    transitive: bool,
    batch_size: usize,
) -> Result<Option<BTreeMap<String, BTreeMap<String, Vec<Define>>>>, QueryError> {
    let Some(hierarchy) = index.class_hierarchy()? else {
        debug!(?targets, "no class hierarchy available for targets");
        return Ok(None);
    };
    let expanded = subclasses_for_targets(targets, &hierarchy, transitive);
    debug!(targets = targets.len(), expanded = expanded.len(), "expanded subclass targets");

    let mut result = BTreeMap::new();
    for (target, subclasses) in expanded {
        let defines = defines_for_classes(index, &subclasses, batch_size);
        result.insert(target, defines);
    }
    Ok(Some(result))
}
