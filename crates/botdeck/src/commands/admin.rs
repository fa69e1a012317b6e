//! Admin contract handlers. Every call goes through the store, so writes
//! refresh the cached collections before the command returns.

use botdeck_core::{
    AdminStore, AutomationRule, AutomationRuleInput, Backend, DashboardStats, FeatureConfig,
    FeatureConfigInput, Group, GroupInput, PrivateChat, PrivateChatInput,
};
use tabled::Tabled;

use crate::cli::{
    AdminArgs, AdminAutomationsCommand, AdminChatsCommand, AdminCommand, AdminFeaturesCommand,
    AdminGroupsCommand, ChatFields, GlobalOpts, GroupFields, OutputFormat, RuleFields,
};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct ChatRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Muted")]
    muted: String,
    #[tabled(rename = "Last message")]
    preview: String,
}

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Trigger")]
    trigger: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

fn group_row(g: &Group, painter: Painter) -> GroupRow {
    GroupRow {
        id: g.id.clone(),
        name: g.name.clone(),
        active: painter.flag(g.is_active),
        tags: g.tags.join(", "),
        description: g.description.clone(),
    }
}

fn chat_row(c: &PrivateChat, painter: Painter) -> ChatRow {
    ChatRow {
        id: c.id.clone(),
        username: c.username.clone(),
        alias: output::or_dash(c.alias.as_deref()),
        muted: painter.flag(c.is_muted),
        preview: output::or_dash(c.last_message_preview.as_deref()),
    }
}

fn feature_row(f: &FeatureConfig, painter: Painter) -> FeatureRow {
    FeatureRow {
        id: f.id.clone(),
        name: f.name.clone(),
        enabled: painter.flag(f.enabled),
        options: f
            .options
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" "),
        description: f.description.clone(),
    }
}

fn rule_row(r: &AutomationRule, painter: Painter) -> RuleRow {
    RuleRow {
        id: r.id.clone(),
        name: r.name.clone(),
        trigger: r.trigger.clone(),
        action: r.action.clone(),
        enabled: painter.flag(r.enabled),
    }
}

// ── Shared renderers (also used by the views) ───────────────────────

pub(crate) fn render_stats(
    format: &OutputFormat,
    stats: &DashboardStats,
) -> Result<String, CliError> {
    output::render_single(
        format,
        stats,
        |s| {
            output::detail(&[
                ("Groups", format!("{} ({} active)", s.groups, s.active_groups)),
                (
                    "Private chats",
                    format!("{} ({} muted)", s.private_chats, s.muted_chats),
                ),
                ("Automations", s.automations.to_string()),
            ])
        },
        |s| s.groups.to_string(),
    )
}

pub(crate) fn render_groups(
    format: &OutputFormat,
    groups: &[Group],
    painter: Painter,
) -> Result<String, CliError> {
    output::render_list(format, groups, |g| group_row(g, painter), |g| g.id.clone())
}

pub(crate) fn render_chats(
    format: &OutputFormat,
    chats: &[PrivateChat],
    painter: Painter,
) -> Result<String, CliError> {
    output::render_list(format, chats, |c| chat_row(c, painter), |c| c.id.clone())
}

pub(crate) fn render_features(
    format: &OutputFormat,
    configs: &[FeatureConfig],
    painter: Painter,
) -> Result<String, CliError> {
    output::render_list(
        format,
        configs,
        |f| feature_row(f, painter),
        |f| f.id.clone(),
    )
}

pub(crate) fn render_rules(
    format: &OutputFormat,
    rules: &[AutomationRule],
    painter: Painter,
) -> Result<String, CliError> {
    output::render_list(format, rules, |r| rule_row(r, painter), |r| r.id.clone())
}

// ── Input builders ──────────────────────────────────────────────────

impl From<GroupFields> for GroupInput {
    fn from(f: GroupFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            is_active: f.active,
            tags: f.tags,
        }
    }
}

impl From<ChatFields> for PrivateChatInput {
    fn from(f: ChatFields) -> Self {
        Self {
            username: f.username,
            alias: f.alias,
            is_muted: f.muted,
            last_message_preview: f.preview,
        }
    }
}

impl From<RuleFields> for AutomationRuleInput {
    fn from(f: RuleFields) -> Self {
        Self {
            name: f.name,
            trigger: f.trigger,
            action: f.action,
            enabled: f.enabled,
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    backend: &Backend,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = backend.store();
    let painter = Painter::new(global);
    let out = match args.command {
        AdminCommand::Dashboard => {
            let stats = store.refresh_dashboard().await?;
            render_stats(&global.output, &stats)?
        }
        AdminCommand::Groups(a) => groups(store, a.command, global, painter).await?,
        AdminCommand::Chats(a) => chats(store, a.command, global, painter).await?,
        AdminCommand::Features(a) => features(store, a.command, global, painter).await?,
        AdminCommand::Automations(a) => automations(store, a.command, global, painter).await?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn groups(
    store: &AdminStore,
    cmd: AdminGroupsCommand,
    global: &GlobalOpts,
    painter: Painter,
) -> Result<String, CliError> {
    match cmd {
        AdminGroupsCommand::List => {
            let groups = store.fetch_groups().await?;
            render_groups(&global.output, &groups, painter)
        }
        AdminGroupsCommand::Create(fields) => {
            let group = store.create_group(&fields.into()).await?;
            util::notice(&format!("Created group {}", group.id), global.quiet);
            render_groups(&global.output, std::slice::from_ref(&group), painter)
        }
        AdminGroupsCommand::Update { id, fields } => {
            let group = store.update_group(&id, &fields.into()).await?;
            util::notice(&format!("Updated group {id}"), global.quiet);
            render_groups(&global.output, std::slice::from_ref(&group), painter)
        }
        AdminGroupsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete group {id}?"), global.yes)? {
                return Ok(String::new());
            }
            store.delete_group(&id).await?;
            util::notice(&format!("Deleted group {id}"), global.quiet);
            Ok(String::new())
        }
    }
}

async fn chats(
    store: &AdminStore,
    cmd: AdminChatsCommand,
    global: &GlobalOpts,
    painter: Painter,
) -> Result<String, CliError> {
    match cmd {
        AdminChatsCommand::List => {
            let chats = store.fetch_private_chats().await?;
            render_chats(&global.output, &chats, painter)
        }
        AdminChatsCommand::Create(fields) => {
            let chat = store.create_private_chat(&fields.into()).await?;
            util::notice(&format!("Created private chat {}", chat.id), global.quiet);
            render_chats(&global.output, std::slice::from_ref(&chat), painter)
        }
        AdminChatsCommand::Update { id, fields } => {
            let chat = store.update_private_chat(&id, &fields.into()).await?;
            util::notice(&format!("Updated private chat {id}"), global.quiet);
            render_chats(&global.output, std::slice::from_ref(&chat), painter)
        }
        AdminChatsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete private chat {id}?"), global.yes)? {
                return Ok(String::new());
            }
            store.delete_private_chat(&id).await?;
            util::notice(&format!("Deleted private chat {id}"), global.quiet);
            Ok(String::new())
        }
    }
}

async fn features(
    store: &AdminStore,
    cmd: AdminFeaturesCommand,
    global: &GlobalOpts,
    painter: Painter,
) -> Result<String, CliError> {
    match cmd {
        AdminFeaturesCommand::List => {
            let configs = store.fetch_feature_configs().await?;
            render_features(&global.output, &configs, painter)
        }
        AdminFeaturesCommand::Upsert {
            name,
            enabled,
            description,
            options,
        } => {
            let input = FeatureConfigInput {
                name,
                enabled,
                description,
                options: util::parse_options(&options)?,
            };
            let config = store.upsert_feature_config(&input).await?;
            util::notice(&format!("Saved feature {}", config.name), global.quiet);
            render_features(&global.output, std::slice::from_ref(&config), painter)
        }
        AdminFeaturesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete feature config {id}?"), global.yes)? {
                return Ok(String::new());
            }
            store.delete_feature_config(&id).await?;
            util::notice(&format!("Deleted feature config {id}"), global.quiet);
            Ok(String::new())
        }
    }
}

async fn automations(
    store: &AdminStore,
    cmd: AdminAutomationsCommand,
    global: &GlobalOpts,
    painter: Painter,
) -> Result<String, CliError> {
    match cmd {
        AdminAutomationsCommand::List => {
            let rules = store.fetch_automation_rules().await?;
            render_rules(&global.output, &rules, painter)
        }
        AdminAutomationsCommand::Create(fields) => {
            let rule = store.create_automation_rule(&fields.into()).await?;
            util::notice(&format!("Created rule {}", rule.id), global.quiet);
            render_rules(&global.output, std::slice::from_ref(&rule), painter)
        }
        AdminAutomationsCommand::Update { id, fields } => {
            let rule = store.update_automation_rule(&id, &fields.into()).await?;
            util::notice(&format!("Updated rule {id}"), global.quiet);
            render_rules(&global.output, std::slice::from_ref(&rule), painter)
        }
        AdminAutomationsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete rule {id}?"), global.yes)? {
                return Ok(String::new());
            }
            store.delete_automation_rule(&id).await?;
            util::notice(&format!("Deleted rule {id}"), global.quiet);
            Ok(String::new())
        }
    }
}
