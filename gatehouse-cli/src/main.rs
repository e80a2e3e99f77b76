//! The `gatehouse` binary.

mod args;
mod commands;
mod styles;

use std::{collections::HashSet, io, process::ExitCode};

use clap::Parser;
use gatehouse::Authorizer;
use tracing_subscriber::EnvFilter;

use crate::args::{GatehouseArgs, GatehouseSubcommand};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const EXIT_DENIED: u8 = 1;

const EXIT_ERROR: u8 = 2;

//--------------------------------------------------------------------------------------------------
// Main
//--------------------------------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = GatehouseArgs::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_DENIED),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn run(args: GatehouseArgs) -> anyhow::Result<bool> {
    let mut stdout = io::stdout().lock();

    match args.subcommand {
        GatehouseSubcommand::Rules { config } => {
            let config = commands::load_config(config.as_deref())?;
            let authorizer = Authorizer::from_config(&config)?;
            commands::print_rules(&authorizer, &mut stdout)?;
            Ok(true)
        }
        GatehouseSubcommand::Check {
            method,
            path,
            config,
            hints,
            grants,
            anonymous,
        } => {
            let config = commands::load_config(config.as_deref())?;
            let authorizer = Authorizer::from_config(&config)?;
            let granted = (!anonymous).then(|| grants.into_iter().collect::<HashSet<_>>());
            commands::check(
                &authorizer,
                &method,
                &path,
                &hints,
                granted.as_ref(),
                &mut stdout,
            )
        }
    }
}
