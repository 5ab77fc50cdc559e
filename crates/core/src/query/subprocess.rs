use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::model::Define;
use crate::query::{ClassHierarchy, QueryError, TypeIndex};

/// Type index that shells out to the indexer's query command.
///
/// Issues `<tool> query class_hierarchy` and `<tool> query defines <json>`
/// and parses the JSON responses. A response with `"response": null` means
/// the service holds no data for the request (unavailable); a non-zero exit
/// or unparseable output is a transport/protocol fault.
pub struct SubprocessIndex {
    tool: PathBuf,
}

impl SubprocessIndex {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    /// Resolve the tool from `MODELGEN_INDEX_BIN`, falling back to an
    /// `index-query` binary on the PATH.
    pub fn from_env() -> Self {
        let tool =
            std::env::var_os("MODELGEN_INDEX_BIN").map(PathBuf::from).unwrap_or_else(|| {
                PathBuf::from("index-query")
            });
        Self { tool }
    }
}

impl TypeIndex for SubprocessIndex {
    fn class_hierarchy(&self) -> Result<Option<ClassHierarchy>, QueryError> {
        // Allow tests to feed synthetic JSON via env to avoid needing the
        // indexer installed.
        let body = if let Some(fake) = std::env::var_os("MODELGEN_FAKE_HIERARCHY_JSON") {
            fs::read_to_string(&fake).map_err(|e| {
                QueryError::Transport(format!("failed to read MODELGEN_FAKE_HIERARCHY_JSON: {e}"))
            })?
        } else {
            run_query(&self.tool, &["query", "class_hierarchy"])?
        };
        let parsed: HierarchyResponse = serde_json::from_str(&body)
            .map_err(|e| QueryError::Protocol(format!("failed to parse hierarchy JSON: {e}")))?;
        if parsed.response.is_none() {
            debug!(tool = %self.tool.display(), "index reports no class hierarchy");
        }
        Ok(parsed.response.map(ClassHierarchy::new))
    }

    fn defines_batch(&self, classes: &[String]) -> Result<BTreeMap<String, Vec<Define>>, QueryError> {
        let body = if let Some(fake) = std::env::var_os("MODELGEN_FAKE_DEFINES_JSON") {
            fs::read_to_string(&fake).map_err(|e| {
                QueryError::Transport(format!("failed to read MODELGEN_FAKE_DEFINES_JSON: {e}"))
            })?
        } else {
            let request = serde_json::to_string(classes)
                .map_err(|e| QueryError::Protocol(format!("failed to encode class batch: {e}")))?;
            run_query(&self.tool, &["query", "defines", &request])?
        };
        let parsed: DefinesResponse = serde_json::from_str(&body)
            .map_err(|e| QueryError::Protocol(format!("failed to parse defines JSON: {e}")))?;
        let defines = parsed.response.unwrap_or_default();
        // The fake hook returns the whole table; narrow to the batch so
        // batching behaves the same with and without a live tool.
        Ok(defines.into_iter().filter(|(class, _)| classes.contains(class)).collect())
    }
}

fn run_query(tool: &Path, args: &[&str]) -> Result<String, QueryError> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| QueryError::Transport(format!("failed to spawn {}: {e}", tool.display())))?;
    if !output.status.success() {
        return Err(QueryError::Transport(format!(
            "{} exited with {}",
            tool.display(),
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[derive(Debug, Deserialize)]
struct HierarchyResponse {
    #[serde(default)]
    response: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct DefinesResponse {
    #[serde(default)]
    response: Option<BTreeMap<String, Vec<Define>>>,
}
