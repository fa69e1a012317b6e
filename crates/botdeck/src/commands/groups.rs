//! Console group handlers.

use botdeck_api::ConsoleClient;
use botdeck_api::console::{
    ChatMessage, EnumOption, GroupDetail, GroupListItem, GroupListQuery, GroupMeta, GroupUpdate,
    HistoryQuery,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, GroupUpdateArgs, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Bot")]
    enable: String,
    #[tabled(rename = "Chat")]
    chat: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Msgs")]
    messages: u64,
    #[tabled(rename = "Last activity")]
    last: String,
}

#[derive(Tabled)]
pub(crate) struct MessageRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Text")]
    text: String,
}

impl From<&ChatMessage> for MessageRow {
    fn from(m: &ChatMessage) -> Self {
        Self {
            when: output::timestamp(m.sent_at),
            from: sender(m.bot_send, m.user_id),
            kind: m.message_type.clone(),
            text: output::or_dash(m.text.as_deref()),
        }
    }
}

fn message_row(m: &ChatMessage) -> MessageRow {
    MessageRow::from(m)
}

pub(crate) fn sender(bot_send: bool, user_id: Option<i64>) -> String {
    if bot_send {
        "bot".into()
    } else {
        user_id.map_or_else(|| "-".into(), |id| id.to_string())
    }
}

/// Display label for an option value, falling back to the raw value.
fn label<'a>(options: &'a [EnumOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map_or(value, |o| o.label.as_str())
}

fn group_row(g: &GroupListItem, meta: &GroupMeta, painter: Painter) -> GroupRow {
    GroupRow {
        id: g.id,
        name: output::or_dash(g.name.as_deref()),
        status: label(&meta.statuses, &g.status).to_owned(),
        enable: painter.flag(g.enable),
        chat: painter.flag(g.enable_chat),
        mode: g
            .chat_mode
            .as_deref()
            .map_or_else(|| "-".into(), |m| label(&meta.chat_modes, m).to_owned()),
        messages: g.message_count,
        last: output::timestamp(g.last_activity),
    }
}

fn detail(d: &GroupDetail, painter: Painter) -> String {
    let g = &d.group;
    let admins = if g.admin_ids.is_empty() {
        "-".into()
    } else {
        g.admin_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut out = output::detail(&[
        ("ID", g.id.to_string()),
        ("Name", output::or_dash(g.name.as_deref())),
        ("Status", g.status.clone()),
        ("Bot enabled", painter.flag(g.enable)),
        ("Chat enabled", painter.flag(g.enable_chat)),
        ("Chat mode", output::or_dash(g.chat_mode.as_deref())),
        ("Sanity limit", g.sanity_limit.to_string()),
        ("Allow R18G", painter.flag(g.allow_r18g)),
        ("Allow setu", painter.flag(g.allow_setu)),
        ("Admins", admins),
        ("Messages", g.message_count.to_string()),
        ("Last activity", output::timestamp(g.last_activity)),
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

fn build_update(args: GroupUpdateArgs) -> Result<(i64, GroupUpdate), CliError> {
    let update = GroupUpdate {
        name: util::patch(args.name, args.clear_name),
        enable: util::patch(args.enable, false),
        enable_chat: util::patch(args.enable_chat, false),
        chat_mode: util::patch(args.chat_mode, args.clear_chat_mode),
        sanity_limit: util::patch(args.sanity_limit, false),
        allow_r18g: util::patch(args.allow_r18g, false),
        allow_setu: util::patch(args.allow_setu, false),
        admin_ids: util::patch(args.admin_ids, args.clear_admin_ids),
    };
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    Ok((args.id, update))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &ConsoleClient,
    args: GroupsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(global);
    match args.command {
        GroupsCommand::List {
            search,
            enable,
            chat_enabled,
            page,
        } => {
            let query = GroupListQuery {
                q: search,
                enable,
                chat_enabled,
                limit: Some(page.limit),
                offset: Some(page.offset),
            };
            // Labels come from the meta endpoint; both requests are independent.
            let (meta, groups) =
                futures_util::try_join!(console.fetch_group_meta(), console.list_groups(&query))?;
            let out = output::render_page(
                &global.output,
                &groups,
                page.offset,
                |g| group_row(g, &meta, painter),
                |g| g.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { id, recent } => {
            let group = console.get_group_detail(id, recent.recent_limit).await?;
            let out = output::render_single(
                &global.output,
                &group,
                |d| detail(d, painter),
                |d| d.group.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::History(history) => {
            let query = HistoryQuery {
                limit: history.limit,
                before: history.before,
            };
            let messages = console.get_group_history(history.id, &query).await?;
            let out = output::render_list(&global.output, &messages, message_row, |m| {
                m.message_id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            util::older_hint(messages.last().and_then(|m| m.sent_at), global);
            Ok(())
        }

        GroupsCommand::Update(update_args) => {
            let (id, update) = build_update(update_args)?;
            let group = console.update_group(id, &update).await?;
            util::notice(&format!("Group {id} updated"), global.quiet);
            let out = output::render_single(
                &global.output,
                &group,
                |d| detail(d, painter),
                |d| d.group.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Meta => {
            let meta = console.fetch_group_meta().await?;
            let out = output::render_single(
                &global.output,
                &meta,
                |m| {
                    format!(
                        "{}\n{}\n\n{}\n{}",
                        painter.heading("Chat modes"),
                        options_table(&m.chat_modes),
                        painter.heading("Statuses"),
                        options_table(&m.statuses),
                    )
                },
                |m| {
                    m.chat_modes
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

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

pub(crate) fn options_table(options: &[EnumOption]) -> String {
    let rows: Vec<OptionRow> = options
        .iter()
        .map(|o| OptionRow {
            value: o.value.clone(),
            label: o.label.clone(),
        })
        .collect();
    output::render_table(&rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use botdeck_api::Patch;

    use super::*;

    fn args(id: i64) -> GroupUpdateArgs {
        GroupUpdateArgs {
            id,
            name: None,
            clear_name: false,
            enable: None,
            enable_chat: None,
            chat_mode: None,
            clear_chat_mode: false,
            sanity_limit: None,
            allow_r18g: None,
            allow_setu: None,
            admin_ids: None,
            clear_admin_ids: false,
        }
    }

    #[test]
    fn no_flags_is_an_empty_update() {
        assert!(matches!(build_update(args(1)), Err(CliError::EmptyUpdate)));
    }

    #[test]
    fn clear_flags_send_null() {
        let (id, update) = build_update(GroupUpdateArgs {
            clear_chat_mode: true,
            enable_chat: Some(true),
            ..args(1001)
        })
        .unwrap();
        assert_eq!(id, 1001);
        assert_eq!(update.chat_mode, Patch::Clear);
        assert_eq!(update.enable_chat, Patch::Set(true));
        assert!(update.name.is_absent());
    }

    #[test]
    fn unknown_option_value_is_shown_raw() {
        let options = [EnumOption {
            label: "Mixed chat".into(),
            value: "Mixed".into(),
        }];
        assert_eq!(label(&options, "Mixed"), "Mixed chat");
        assert_eq!(label(&options, "Other"), "Other");
    }
}
