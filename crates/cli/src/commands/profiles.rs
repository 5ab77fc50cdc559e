use anyhow::Result;
use serde::Serialize;

use modelgen_core::profiles::default_profile_registry;

#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub name: String,
    pub description: String,
}

/// List the domain profiles built into this binary.
pub fn list_profiles_command(json: bool) -> Result<()> {
    let registry = default_profile_registry();
    let entries: Vec<ProfileInfo> = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            registry.get(&name).map(|profile| ProfileInfo {
                name: name.clone(),
                description: profile.description().to_string(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Profiles: (none)");
        return Ok(());
    }

    println!("Profiles:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
