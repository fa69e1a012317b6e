//! `open <path>`: route a path to its view, activate it, render it.
//!
//! With `--watch` the view stays up: a timer re-activates it and every
//! replaced snapshot is rendered again.

use std::time::Duration;

use botdeck_core::{AdminStore, Backend, Resolution};
use futures_util::StreamExt;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::cli::{GlobalOpts, OpenArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Painter};
use crate::views::{self, View};

use super::util;

pub async fn handle(backend: &Backend, args: OpenArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let table = views::route_table();
    let (resolution, view) = table.view(&args.path).ok_or_else(|| CliError::NotFound {
        message: format!("no view for '{}'", args.path),
    })?;

    if let Resolution::Redirect { from, to } = &resolution {
        util::notice(&format!("No view at {from}, showing {}", to.path()), global.quiet);
    }
    debug!(route = %resolution.target(), "activating view");

    let store = backend.store();
    match args.watch {
        Some(secs) => watch(view.as_ref(), store, global, Duration::from_secs(secs)).await,
        None => {
            view.activate(store).await?;
            print_view(view.as_ref(), store, global)
        }
    }
}

fn print_view(view: &dyn View, store: &AdminStore, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(global);
    let body = view.render(store, &global.output, painter)?;
    let out = if matches!(global.output, OutputFormat::Table) {
        format!("{}\n{body}", painter.heading(view.title()))
    } else {
        body
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn watch(
    view: &dyn View,
    store: &AdminStore,
    global: &GlobalOpts,
    every: Duration,
) -> Result<(), CliError> {
    let mut updates = view.updates(store);
    let mut ticks = tokio::time::interval(every);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let stop = tokio::signal::ctrl_c();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                // the store keeps the previous snapshot on failure
                if let Err(err) = view.activate(store).await {
                    debug!(error = %err, "view refresh failed");
                }
            }
            next = updates.next() => {
                let Some(version) = next else { return Ok(()) };
                debug!(version, "view snapshot replaced");
                print_view(view, store, global)?;
            }
            _ = &mut stop => return Ok(()),
        }
    }
}
