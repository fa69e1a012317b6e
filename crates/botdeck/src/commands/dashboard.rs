//! Console dashboard summary.

use botdeck_api::ConsoleClient;
use botdeck_api::console::{ActivityEntry, DashboardSummary};
use tabled::Tabled;

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Chat")]
    scope_id: i64,
    #[tabled(rename = "Preview")]
    preview: String,
}

impl From<&ActivityEntry> for ActivityRow {
    fn from(a: &ActivityEntry) -> Self {
        Self {
            when: output::timestamp(a.sent_at),
            scope: a.scope.clone(),
            scope_id: a.scope_id,
            preview: output::or_dash(a.preview.as_deref()),
        }
    }
}

fn summary_detail(s: &DashboardSummary, painter: Painter) -> String {
    let mut out = output::detail(&[
        (
            "Groups",
            format!(
                "{} ({} active, {} chatting)",
                s.total_groups, s.active_groups, s.chat_enabled_groups
            ),
        ),
        (
            "Users",
            format!("{} ({} chatting)", s.total_users, s.chat_enabled_users),
        ),
        ("Group messages", s.total_group_messages.to_string()),
        ("Private messages", s.total_private_messages.to_string()),
    ]);
    if !s.recent_activity.is_empty() {
        let rows: Vec<ActivityRow> = s.recent_activity.iter().map(ActivityRow::from).collect();
        out.push_str("\n\n");
        out.push_str(&painter.heading("Recent activity"));
        out.push('\n');
        out.push_str(&output::render_table(&rows));
    }
    out
}

pub async fn handle(
    console: &ConsoleClient,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let summary = console.fetch_dashboard_summary(args.limit).await?;
    let painter = Painter::new(global);
    let out = output::render_single(
        &global.output,
        &summary,
        |s| summary_detail(s, painter),
        |s| s.total_groups.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
