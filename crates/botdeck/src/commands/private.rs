//! Console private-user handlers.

use botdeck_api::ConsoleClient;
use botdeck_api::console::{
    HistoryQuery, PrivateMessage, PrivateUserDetail, PrivateUserListItem, PrivateUserListQuery,
    PrivateUserUpdate,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, PrivateArgs, PrivateCommand, PrivateUpdateArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::groups::{options_table, sender};
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nickname")]
    nick: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Chat")]
    chat: String,
    #[tabled(rename = "Sanity")]
    sanity: i64,
    #[tabled(rename = "Msgs")]
    messages: u64,
    #[tabled(rename = "Last activity")]
    last: String,
}

fn user_row(u: &PrivateUserListItem, painter: Painter) -> UserRow {
    UserRow {
        id: u.id,
        nick: output::or_dash(u.nick_name.as_deref()),
        status: u.status.clone(),
        chat: painter.flag(u.enable_chat),
        sanity: u.sanity_limit,
        messages: u.message_count,
        last: output::timestamp(u.last_activity),
    }
}

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Text")]
    text: String,
}

impl From<&PrivateMessage> for MessageRow {
    fn from(m: &PrivateMessage) -> Self {
        Self {
            when: output::timestamp(m.sent_at),
            from: sender(m.bot_send, m.user_id),
            text: output::or_dash(m.text.as_deref()),
        }
    }
}

fn message_row(m: &PrivateMessage) -> MessageRow {
    MessageRow::from(m)
}

fn detail(d: &PrivateUserDetail, painter: Painter) -> String {
    let u = &d.user;
    let mut out = output::detail(&[
        ("ID", u.id.to_string()),
        ("Nickname", output::or_dash(u.nick_name.as_deref())),
        ("Status", u.status.clone()),
        ("Chat enabled", painter.flag(u.enable_chat)),
        ("Sanity limit", u.sanity_limit.to_string()),
        ("Allow R18G", painter.flag(u.allow_r18g)),
        ("Messages", u.message_count.to_string()),
        ("Last activity", output::timestamp(u.last_activity)),
    ]);
    if !d.recent_messages.is_empty() {
        let rows: Vec<MessageRow> = d.recent_messages.iter().map(MessageRow::from).collect();
        out.push_str("\n\n");
        out.push_str(&painter.heading("Recent messages"));
        out.push('\n');
        out.push_str(&output::render_table(&rows));
    }
    out
}

fn build_update(args: PrivateUpdateArgs) -> Result<(i64, PrivateUserUpdate), CliError> {
    let update = PrivateUserUpdate {
        nick_name: util::patch(args.nick_name, args.clear_nick_name),
        enable_chat: util::patch(args.enable_chat, false),
        sanity_limit: util::patch(args.sanity_limit, false),
        allow_r18g: util::patch(args.allow_r18g, false),
        status: util::patch(args.status, false),
    };
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    Ok((args.id, update))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &ConsoleClient,
    args: PrivateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(global);
    match args.command {
        PrivateCommand::List {
            search,
            chat_enabled,
            status,
            page,
        } => {
            let query = PrivateUserListQuery {
                q: search,
                chat_enabled,
                status,
                limit: Some(page.limit),
                offset: Some(page.offset),
            };
            let users = console.list_private_users(&query).await?;
            let out = output::render_page(
                &global.output,
                &users,
                page.offset,
                |u| user_row(u, painter),
                |u| u.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrivateCommand::Get { id, recent } => {
            let user = console.get_private_user_detail(id, recent.recent_limit).await?;
            let out = output::render_single(
                &global.output,
                &user,
                |d| detail(d, painter),
                |d| d.user.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrivateCommand::History(history) => {
            let query = HistoryQuery {
                limit: history.limit,
                before: history.before,
            };
            let messages = console.get_private_history(history.id, &query).await?;
            let out = output::render_list(&global.output, &messages, message_row, |m| {
                m.message_id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            util::older_hint(messages.last().and_then(|m| m.sent_at), global);
            Ok(())
        }

        PrivateCommand::Update(update_args) => {
            let (id, update) = build_update(update_args)?;
            let user = console.update_private_user(id, &update).await?;
            util::notice(&format!("User {id} updated"), global.quiet);
            let out = output::render_single(
                &global.output,
                &user,
                |d| detail(d, painter),
                |d| d.user.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PrivateCommand::Meta => {
            let meta = console.fetch_private_meta().await?;
            let out = output::render_single(
                &global.output,
                &meta,
                |m| options_table(&m.statuses),
                |m| {
                    m.statuses
                        .iter()
                        .map(|o| o.value.clone())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
