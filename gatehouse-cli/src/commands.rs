use std::{collections::HashSet, io::Write, path::Path};

use gatehouse::{
    config::{authz::AuthzConfig, MainConfig},
    Authorizer,
};
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Loads the configuration from `path`, or the defaults, and applies environment overrides.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AuthzConfig> {
    let config = match path {
        Some(path) => AuthzConfig::from_file(path)?,
        None => AuthzConfig::default(),
    };

    Ok(config.with_env_overrides()?)
}

/// Writes the rule table in evaluation order, followed by any shadowed rules.
pub fn print_rules(authorizer: &Authorizer, out: &mut impl Write) -> anyhow::Result<()> {
    let registry = authorizer.registry();

    for (index, entry) in registry.entries().iter().enumerate() {
        writeln!(out, "{index:>3}  {:<14} {}", entry.provider, entry.rule)?;
    }

    if !registry.shadowed().is_empty() {
        writeln!(out)?;
        writeln!(out, "shadowed:")?;
        for shadowed in registry.shadowed() {
            let entries = registry.entries();
            writeln!(
                out,
                "{:>3}  {} ({}) never matches, #{} ({}) wins",
                shadowed.index,
                entries[shadowed.index].rule.route(),
                entries[shadowed.index].provider,
                shadowed.by,
                entries[shadowed.by].provider,
            )?;
        }
    }

    Ok(())
}

/// Authorizes one request, writes the decision as JSON and returns whether it was allowed.
pub fn check(
    authorizer: &Authorizer,
    method: &str,
    path: &str,
    hints: &Value,
    granted: Option<&HashSet<String>>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let decision = authorizer.authorize(method, path, hints, granted)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&decision)?)?;

    Ok(decision.allowed)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
