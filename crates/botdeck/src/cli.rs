//! Clap derive structures for the `botdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// botdeck -- manage a chat bot from the command line
#[derive(Debug, Parser)]
#[command(
    name = "botdeck",
    version,
    about = "Manage chat-bot groups, private chats, and feature flags from the command line",
    long_about = "Command-line client for the bot administration API.\n\n\
        Talks to the console API (typed per-field updates, paginated lists)\n\
        and to the admin API (flat CRUD, dashboard stats). Each has its own base URL.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "BOTDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Console API base URL (overrides profile)
    #[arg(long, env = "BOTDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Admin API base URL (overrides profile; defaults to the console URL)
    #[arg(long, env = "BOTDECK_ADMIN_URL", global = true)]
    pub admin_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BOTDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "BOTDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (profile default: 15)
    #[arg(long, env = "BOTDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the console dashboard summary
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage group chats (console API)
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Manage private-chat users (console API)
    #[command(alias = "users")]
    Private(PrivateArgs),

    /// View and toggle feature flags (console API)
    #[command(alias = "flags")]
    Features(FeaturesArgs),

    /// Inspect bot command executions (console API)
    #[command(alias = "cmds")]
    Commands(CommandsArgs),

    /// Flat CRUD resources (admin API)
    Admin(AdminArgs),

    /// Open a management view by path (e.g. /groups)
    Open(OpenArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Offset/limit paging for console list commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Max results per page (the server accepts 1-100)
    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,

    /// Pagination offset
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

/// Recent-message window for detail views.
#[derive(Debug, Args)]
pub struct RecentArgs {
    /// Number of recent messages to include (server default 20, max 50)
    #[arg(long)]
    pub recent_limit: Option<u32>,
}

/// Cursor over a chat's message history, newest first.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Chat id
    pub id: i64,

    /// Max messages to return (server default 50, max 200)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Only messages sent before this time (RFC 3339, or naive UTC)
    #[arg(long, value_parser = parse_timestamp)]
    pub before: Option<DateTime<Utc>>,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    botdeck_api::timestamp::parse(raw)
        .ok_or_else(|| format!("expected a timestamp like 2024-06-15T10:30:00Z, got '{raw}'"))
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Number of recent activity entries (server default 10)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
    #[command(alias = "ls")]
    List {
        /// Search by group id or name
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only groups with the bot enabled (true) or disabled (false)
        #[arg(long)]
        enable: Option<bool>,

        /// Filter on the chat toggle
        #[arg(long)]
        chat_enabled: Option<bool>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a group with its recent messages
    Get {
        /// Group id
        id: i64,

        #[command(flatten)]
        recent: RecentArgs,
    },

    /// Page through a group's message history
    History(HistoryArgs),

    /// Partially update a group; only the given fields change
    Update(GroupUpdateArgs),

    /// List chat-mode and status options
    Meta,
}

#[derive(Debug, Args)]
pub struct GroupUpdateArgs {
    /// Group id
    pub id: i64,

    #[arg(long, conflicts_with = "clear_name")]
    pub name: Option<String>,

    /// Send `name: null`
    #[arg(long)]
    pub clear_name: bool,

    #[arg(long)]
    pub enable: Option<bool>,

    #[arg(long)]
    pub enable_chat: Option<bool>,

    /// Separated or Mixed
    #[arg(long, conflicts_with = "clear_chat_mode")]
    pub chat_mode: Option<String>,

    #[arg(long)]
    pub clear_chat_mode: bool,

    #[arg(long)]
    pub sanity_limit: Option<i64>,

    #[arg(long)]
    pub allow_r18g: Option<bool>,

    #[arg(long)]
    pub allow_setu: Option<bool>,

    /// Comma-separated admin user ids (replaces the list)
    #[arg(long, value_delimiter = ',', conflicts_with = "clear_admin_ids")]
    pub admin_ids: Option<Vec<i64>>,

    #[arg(long)]
    pub clear_admin_ids: bool,
}

// ── Private users ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PrivateArgs {
    #[command(subcommand)]
    pub command: PrivateCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrivateCommand {
    /// List private-chat users
    #[command(alias = "ls")]
    List {
        /// Search by user id or nickname
        #[arg(long, short = 's')]
        search: Option<String>,

        #[arg(long)]
        chat_enabled: Option<bool>,

        /// Filter by status (see `private meta`)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a user with recent messages
    Get {
        /// User id
        id: i64,

        #[command(flatten)]
        recent: RecentArgs,
    },

    /// Page through a user's private message history
    History(HistoryArgs),

    /// Partially update a user; only the given fields change
    Update(PrivateUpdateArgs),

    /// List status options
    Meta,
}

#[derive(Debug, Args)]
pub struct PrivateUpdateArgs {
    /// User id
    pub id: i64,

    #[arg(long, conflicts_with = "clear_nick_name")]
    pub nick_name: Option<String>,

    /// Send `nick_name: null`
    #[arg(long)]
    pub clear_nick_name: bool,

    #[arg(long)]
    pub enable_chat: Option<bool>,

    #[arg(long)]
    pub sanity_limit: Option<i64>,

    #[arg(long)]
    pub allow_r18g: Option<bool>,

    #[arg(long)]
    pub status: Option<String>,
}

// ── Feature flags ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FeaturesArgs {
    #[command(subcommand)]
    pub command: FeaturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeaturesCommand {
    /// List flags and read-only placeholders
    #[command(alias = "ls")]
    List,

    /// Set an editable flag
    Set {
        /// Flag key (e.g. allow_r18g)
        key: String,

        /// New value
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

// ── Command history ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CommandsArgs {
    #[command(subcommand)]
    pub command: CommandsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommandsCommand {
    /// List recorded command executions, newest first
    #[command(alias = "ls")]
    List {
        /// Only this command name
        #[arg(long = "command", short = 'c')]
        command_name: Option<String>,

        /// Only commands triggered by this user
        #[arg(long)]
        user_id: Option<i64>,

        /// Only successful (true) or failed (false) executions
        #[arg(long)]
        success: Option<bool>,

        #[command(flatten)]
        page: PageArgs,
    },
}

// ── Admin surface ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Aggregate counters
    Dashboard,

    /// Manage groups
    Groups(AdminGroupsArgs),

    /// Manage private chats
    Chats(AdminChatsArgs),

    /// Manage feature configs
    Features(AdminFeaturesArgs),

    /// Manage automation rules
    #[command(alias = "rules")]
    Automations(AdminAutomationsArgs),
}

#[derive(Debug, Args)]
pub struct AdminGroupsArgs {
    #[command(subcommand)]
    pub command: AdminGroupsCommand,
}

#[derive(Debug, Args)]
pub struct GroupFields {
    /// Group name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub active: Option<bool>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Subcommand)]
pub enum AdminGroupsCommand {
    #[command(alias = "ls")]
    List,
    Create(GroupFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: GroupFields,
    },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct AdminChatsArgs {
    #[command(subcommand)]
    pub command: AdminChatsCommand,
}

#[derive(Debug, Args)]
pub struct ChatFields {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub alias: Option<String>,

    #[arg(long)]
    pub muted: Option<bool>,

    /// Last message preview text
    #[arg(long)]
    pub preview: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminChatsCommand {
    #[command(alias = "ls")]
    List,
    Create(ChatFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ChatFields,
    },
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct AdminFeaturesArgs {
    #[command(subcommand)]
    pub command: AdminFeaturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminFeaturesCommand {
    #[command(alias = "ls")]
    List,

    /// Create or replace a config by name
    Upsert {
        #[arg(long)]
        name: String,

        #[arg(long)]
        enabled: Option<bool>,

        #[arg(long)]
        description: Option<String>,

        /// Option as key=value (repeatable)
        #[arg(long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,
    },

    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct AdminAutomationsArgs {
    #[command(subcommand)]
    pub command: AdminAutomationsCommand,
}

#[derive(Debug, Args)]
pub struct RuleFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub trigger: String,

    #[arg(long)]
    pub action: String,

    #[arg(long)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum AdminAutomationsCommand {
    #[command(alias = "ls")]
    List,
    Create(RuleFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: RuleFields,
    },
    #[command(alias = "rm")]
    Delete { id: String },
}

// ── Open ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// View path: /, /groups, /private-chats, /features, /automations
    #[arg(default_value = "/")]
    pub path: String,

    /// Keep the view open, refreshing every SECS seconds until Ctrl-C
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Set one key on the active profile (api_url, admin_url, timeout, ca_cert, insecure)
    Set {
        /// Config key
        key: String,

        /// New value
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
