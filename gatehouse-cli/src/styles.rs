//! Help output styles for the `gatehouse` binary.

use clap::builder::styling::{AnsiColor, Style, Styles};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const HEADING: Style = AnsiColor::Cyan.on_default().bold();

const LITERAL: Style = AnsiColor::Green.on_default().bold();

const PLACEHOLDER: Style = AnsiColor::Magenta.on_default().italic();

const ERROR: Style = AnsiColor::Red.on_default().bold();

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the styles used in help and usage output.
///
/// Subcommand and flag names share the literal style so `gatehouse check --grant` reads the same in
/// usage lines and in the argument list.
pub fn styles() -> Styles {
    Styles::styled()
        .header(HEADING.underline())
        .usage(HEADING)
        .literal(LITERAL)
        .placeholder(PLACEHOLDER)
        .error(ERROR)
        .valid(LITERAL)
        .invalid(ERROR.underline())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
