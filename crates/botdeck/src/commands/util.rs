//! Shared helpers for command handlers.

use std::collections::BTreeMap;
use std::io::IsTerminal;

use botdeck_api::Patch;
use chrono::{DateTime, Utc};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the operation is refused.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Turn a `--field` / `--clear-field` flag pair into a patch value.
pub fn patch<T>(value: Option<T>, clear: bool) -> Patch<T> {
    if clear {
        Patch::Clear
    } else {
        Patch::from_option(value)
    }
}

/// Parse repeated `key=value` arguments.
pub fn parse_options(raw: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
                field: "option".into(),
                reason: format!("expected KEY=VALUE, got '{pair}'"),
            })?;
            if key.is_empty() {
                return Err(CliError::Validation {
                    field: "option".into(),
                    reason: format!("empty key in '{pair}'"),
                });
            }
            Ok((key.to_owned(), value.to_owned()))
        })
        .collect()
}

/// Status line on stderr, suppressed by `--quiet`.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

/// After a history page in table mode, show the cursor for the next one.
pub fn older_hint(oldest: Option<DateTime<Utc>>, global: &GlobalOpts) {
    if let (OutputFormat::Table, Some(at)) = (&global.output, oldest) {
        notice(
            &format!("Older messages: --before {}", at.to_rfc3339()),
            global.quiet,
        );
    }
}
