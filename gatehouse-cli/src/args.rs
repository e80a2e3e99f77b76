use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::styles;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Inspect rule tables and evaluate requests without running a server.
#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about, styles = styles::styles())]
pub struct GatehouseArgs {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: GatehouseSubcommand,
}

/// The available subcommands.
#[derive(Debug, Subcommand)]
pub enum GatehouseSubcommand {
    /// Print the registered rules in evaluation order.
    Rules {
        /// A TOML configuration file. The built-in defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Authorize a single request and print the decision as JSON.
    ///
    /// Exits with 0 when the request is allowed, 1 when it is denied and 2 on error.
    Check {
        /// The HTTP method, e.g. POST.
        method: String,

        /// The request path, e.g. /resource/create.
        path: String,

        /// A TOML configuration file. The built-in defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// The request body and query fields as a JSON object.
        #[arg(long, default_value = "{}", value_parser = parse_hints)]
        hints: Value,

        /// A permission scope granted to the caller. May be repeated.
        #[arg(short, long = "grant", value_name = "PERMISSION")]
        grants: Vec<String>,

        /// Evaluate the request without any identity.
        #[arg(long, conflicts_with = "grants")]
        anonymous: bool,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn parse_hints(s: &str) -> Result<Value, String> {
    match serde_json::from_str(s) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("hints must be a JSON object".to_owned()),
        Err(e) => Err(e.to_string()),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_args_definition() {
        GatehouseArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_check() -> anyhow::Result<()> {
        let args = GatehouseArgs::try_parse_from([
            "gatehouse",
            "check",
            "POST",
            "/resource/create",
            "--hints",
            r#"{"network":"mainnet"}"#,
            "--grant",
            "create:resource:mainnet",
            "-g",
            "list:resource",
        ])?;

        let GatehouseSubcommand::Check {
            method,
            path,
            config,
            hints,
            grants,
            anonymous,
        } = args.subcommand
        else {
            anyhow::bail!("expected the check subcommand");
        };

        assert_eq!(method, "POST");
        assert_eq!(path, "/resource/create");
        assert_eq!(config, None);
        assert_eq!(hints, json!({ "network": "mainnet" }));
        assert_eq!(grants, vec!["create:resource:mainnet", "list:resource"]);
        assert!(!anonymous);

        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(GatehouseArgs::try_parse_from(["gatehouse", "check", "GET", "/x", "--hints", "[1]"])
            .is_err());
        assert!(GatehouseArgs::try_parse_from([
            "gatehouse",
            "check",
            "GET",
            "/x",
            "--anonymous",
            "--grant",
            "read:x"
        ])
        .is_err());
    }
}
