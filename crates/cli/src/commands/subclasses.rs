use std::path::Path;

use anyhow::Result;

use modelgen_core::hierarchy::subclasses_for_targets;
use modelgen_core::query::{SnapshotIndex, TypeIndex};

/// Expand base classes against a snapshot and print the subclass sets.
///
/// Debug helper for checking what a profile's base classes actually cover
/// before generating models.
pub fn subclasses_command(
    snapshot: &Path,
    bases: &[String],
    transitive: bool,
    json: bool,
) -> Result<()> {
    let index = SnapshotIndex::open(snapshot)?;
    let Some(hierarchy) = index.class_hierarchy()? else {
        println!("No class hierarchy in snapshot.");
        return Ok(());
    };

    let expanded = subclasses_for_targets(bases, &hierarchy, transitive);

    if json {
        println!("{}", serde_json::to_string_pretty(&expanded)?);
        return Ok(());
    }

    if expanded.is_empty() {
        println!("Subclasses: (none)");
        return Ok(());
    }

    for (target, subclasses) in expanded {
        println!("{}:", target);
        for subclass in subclasses {
            println!("- {}", subclass);
        }
    }

    Ok(())
}
