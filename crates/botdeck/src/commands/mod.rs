//! Command dispatch: bridges CLI args -> backend calls -> output formatting.

pub mod admin;
pub mod config_cmd;
pub mod dashboard;
pub mod features;
pub mod groups;
pub mod history;
pub mod open;
pub mod private;
pub mod util;

use botdeck_core::Backend;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, backend: &Backend, global: &GlobalOpts) -> Result<(), CliError> {
    let console = backend.console();
    match cmd {
        Command::Dashboard(args) => dashboard::handle(console, args, global).await,
        Command::Groups(args) => groups::handle(console, args, global).await,
        Command::Private(args) => private::handle(console, args, global).await,
        Command::Features(args) => features::handle(console, args, global).await,
        Command::Commands(args) => history::handle(console, args, global).await,
        Command::Admin(args) => admin::handle(backend, args, global).await,
        Command::Open(args) => open::handle(backend, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
