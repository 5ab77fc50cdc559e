use std::path::Path;

use anyhow::{bail, Result};

use modelgen_core::model::Model;
use modelgen_core::profiles::default_profile_registry;

use crate::{load_overrides, open_index};

/// Run one domain profile against a type index and print the resulting
/// models.
///
/// Finding zero models is a valid (if uninteresting) success; only
/// configuration and transport faults exit non-zero.
pub fn generate_command(
    profile_name: &str,
    snapshot: Option<&Path>,
    index_tool: Option<&Path>,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let registry = default_profile_registry();
    let Some(profile) = registry.get(profile_name) else {
        bail!("Unknown profile '{}'. Available: {}", profile_name, registry.names().join(", "));
    };

    let overrides = load_overrides(config)?;
    let index = open_index(snapshot, index_tool)?;
    let generator = profile.build(index.as_ref(), &overrides)?;
    let models = generator.generate_models()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    render_models(&models);
    Ok(())
}

fn render_models(models: &[Model]) {
    if models.is_empty() {
        println!("Models: (none)");
        return;
    }

    println!("Models:");
    for model in models {
        let parameters: Vec<String> =
            model.parameters.iter().map(|p| format!("{}: {}", p.name, p.role)).collect();
        println!("- {}({}) -> {}", model.callable, parameters.join(", "), model.return_role);
        if !model.whitelisted.is_empty() {
            println!("  whitelisted: {}", model.whitelisted.join(", "));
        }
    }
}
