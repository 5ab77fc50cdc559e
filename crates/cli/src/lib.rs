use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use modelgen_core::model::{AnnotationSpecification, WhitelistSpecification};
use modelgen_core::profiles::ProfileOverrides;
use modelgen_core::query::{SnapshotIndex, SubprocessIndex, TypeIndex};

pub mod commands;

/// Open the type index selected on the command line: an on-disk snapshot or
/// an indexer tool to shell out to. Exactly one must be given.
pub fn open_index(
    snapshot: Option<&Path>,
    index_tool: Option<&Path>,
) -> Result<Box<dyn TypeIndex>> {
    match (snapshot, index_tool) {
        (Some(_), Some(_)) => bail!("--snapshot and --index-tool are mutually exclusive"),
        (Some(path), None) => {
            let index = SnapshotIndex::open(path)
                .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
            Ok(Box::new(index))
        }
        (None, Some(tool)) => Ok(Box::new(SubprocessIndex::new(tool))),
        (None, None) => bail!("Provide a type index via --snapshot or --index-tool"),
    }
}

/// On-disk override config for a profile's annotation/whitelist defaults.
///
/// Both sections are optional; an absent section keeps the profile default.
#[derive(Debug, Default, Deserialize)]
pub struct OverridesFile {
    #[serde(default)]
    pub annotations: Option<AnnotationSpecification>,
    #[serde(default)]
    pub whitelist: Option<WhitelistSpecification>,
}

/// Load profile overrides from a YAML config file, or the empty overrides
/// when no path was given.
pub fn load_overrides(path: Option<&Path>) -> Result<ProfileOverrides> {
    let Some(path) = path else {
        return Ok(ProfileOverrides::default());
    };
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let file: OverridesFile = serde_yaml::from_str(&body)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(ProfileOverrides { annotations: file.annotations, whitelist: file.whitelist })
}
