//! Bot command execution history.

use botdeck_api::ConsoleClient;
use botdeck_api::console::{CommandHistoryEntry, CommandHistoryQuery};
use tabled::Tabled;

use crate::cli::{CommandsArgs, CommandsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Chat")]
    chat: String,
    #[tabled(rename = "OK")]
    success: String,
    #[tabled(rename = "ms")]
    duration: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn entry_row(e: &CommandHistoryEntry, painter: Painter) -> EntryRow {
    let chat = match (e.chat_type.as_deref(), e.chat_id) {
        (Some(kind), Some(id)) => format!("{kind} {id}"),
        (None, Some(id)) => id.to_string(),
        (Some(kind), None) => kind.to_owned(),
        (None, None) => "-".into(),
    };
    EntryRow {
        id: e.id,
        when: output::timestamp(e.triggered_at),
        command: e.command.clone(),
        user: e.user_id.map_or_else(|| "-".into(), |id| id.to_string()),
        chat,
        success: painter.flag(e.success),
        duration: e.duration_ms.map_or_else(|| "-".into(), |ms| ms.to_string()),
        error: output::or_dash(e.error_message.as_deref()),
    }
}

pub async fn handle(
    console: &ConsoleClient,
    args: CommandsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(global);
    match args.command {
        CommandsCommand::List {
            command_name,
            user_id,
            success,
            page,
        } => {
            let query = CommandHistoryQuery {
                command: command_name,
                user_id,
                success,
                limit: Some(page.limit),
                offset: Some(page.offset),
            };
            let entries = console.list_command_history(&query).await?;
            let out = output::render_page(
                &global.output,
                &entries,
                page.offset,
                |e| entry_row(e, painter),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CommandHistoryEntry {
        CommandHistoryEntry {
            id: 501,
            command: "setu".into(),
            user_id: Some(7),
            chat_id: Some(1001),
            chat_type: Some("group".into()),
            message_id: None,
            arguments: None,
            raw_text: None,
            success: false,
            error_message: None,
            duration_ms: None,
            triggered_at: None,
        }
    }

    #[test]
    fn row_joins_chat_kind_and_id() {
        let row = entry_row(&entry(), Painter::plain());
        assert_eq!(row.chat, "group 1001");
        assert_eq!(row.success, "no");
        assert_eq!(row.duration, "-");
        assert_eq!(row.error, "-");
    }

    #[test]
    fn missing_chat_renders_dash() {
        let row = entry_row(
            &CommandHistoryEntry {
                chat_id: None,
                chat_type: None,
                ..entry()
            },
            Painter::plain(),
        );
        assert_eq!(row.chat, "-");
        assert_eq!(row.user, "7");
    }
}
