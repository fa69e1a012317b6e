// Console API request/response types
//
// Shapes for the typed per-field endpoints: paginated group and private-user
// listings, detail views with recent messages, chat and command history,
// partial updates, feature flags and the dashboard summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

// ── Pagination ───────────────────────────────────────────────────────

/// One offset/limit page. `total` counts every match on the server and may
/// exceed `items.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Whether more items exist beyond `offset + items.len()`.
    pub fn has_more(&self, offset: u64) -> bool {
        let shown = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        offset.saturating_add(shown) < self.total
    }
}

// ── Form metadata ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMeta {
    pub chat_modes: Vec<EnumOption>,
    pub statuses: Vec<EnumOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMeta {
    pub statuses: Vec<EnumOption>,
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message_id: i64,
    /// `group`, `group_bot`, `private` or `private_bot`.
    pub scope: String,
    pub scope_id: i64,
    pub preview: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_groups: u64,
    pub active_groups: u64,
    pub chat_enabled_groups: u64,
    pub total_users: u64,
    pub chat_enabled_users: u64,
    pub total_group_messages: u64,
    pub total_private_messages: u64,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: i64,
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub message_type: String,
    pub bot_send: bool,
    pub text: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupListItem {
    pub id: i64,
    pub name: Option<String>,
    pub status: String,
    pub enable: bool,
    pub enable_chat: bool,
    pub chat_mode: Option<String>,
    pub sanity_limit: i64,
    pub allow_r18g: bool,
    pub allow_setu: bool,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: GroupListItem,
    #[serde(default)]
    pub recent_messages: Vec<ChatMessage>,
}

/// Filters for `GET /groups`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupListQuery {
    /// Free-text search over group id and name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Partial update for `PUT /groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub enable: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub enable_chat: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub chat_mode: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub sanity_limit: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allow_r18g: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allow_setu: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub admin_ids: Patch<Vec<i64>>,
}

impl GroupUpdate {
    /// True when the payload would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.enable.is_absent()
            && self.enable_chat.is_absent()
            && self.chat_mode.is_absent()
            && self.sanity_limit.is_absent()
            && self.allow_r18g.is_absent()
            && self.allow_setu.is_absent()
            && self.admin_ids.is_absent()
    }
}

/// Cursor for `GET /groups/{id}/history` and `GET /private/users/{id}/history`.
///
/// Messages come back newest first; pass the oldest `sent_at` seen as
/// `before` to page further back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::option"
    )]
    pub before: Option<DateTime<Utc>>,
}

// ── Private users ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub message_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
    pub bot_send: bool,
    pub text: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateUserListItem {
    pub id: i64,
    pub nick_name: Option<String>,
    pub status: String,
    pub enable_chat: bool,
    pub sanity_limit: i64,
    pub allow_r18g: bool,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateUserDetail {
    #[serde(flatten)]
    pub user: PrivateUserListItem,
    #[serde(default)]
    pub recent_messages: Vec<PrivateMessage>,
}

/// Filters for `GET /private/users`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrivateUserListQuery {
    /// Free-text search over user id and nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Partial update for `PUT /private/users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateUserUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub nick_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub enable_chat: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub sanity_limit: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub allow_r18g: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<String>,
}

impl PrivateUserUpdate {
    pub fn is_empty(&self) -> bool {
        self.nick_name.is_absent()
            && self.enable_chat.is_absent()
            && self.sanity_limit.is_absent()
            && self.allow_r18g.is_absent()
            && self.status.is_absent()
    }
}

// ── Command history ──────────────────────────────────────────────────

/// One recorded bot command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandHistoryEntry {
    pub id: i64,
    pub command: String,
    pub user_id: Option<i64>,
    pub chat_id: Option<i64>,
    /// `group` or `private` as reported by the bot.
    pub chat_type: Option<String>,
    pub message_id: Option<i64>,
    pub arguments: Option<Vec<String>>,
    pub raw_text: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
    pub duration_ms: Option<i64>,
    #[serde(default, with = "crate::timestamp::option")]
    pub triggered_at: Option<DateTime<Utc>>,
}

/// Filters for `GET /commands/history`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

// ── Feature flags ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    /// Stable identifier used in `PUT /config/features/{key}`.
    pub key: String,
    pub label: String,
    pub description: String,
    /// `None` when the flag has no value yet (placeholders).
    pub value: Option<bool>,
    pub editable: bool,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlagResponse {
    pub features: Vec<FeatureFlag>,
    /// Read-only entries reserved for future settings.
    #[serde(default)]
    pub placeholders: Vec<FeatureFlag>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FeatureFlagUpdate {
    pub value: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn group_update_sends_only_touched_fields() {
        let update = GroupUpdate {
            name: Patch::Set("Night owls".into()),
            chat_mode: Patch::Clear,
            ..GroupUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "name": "Night owls", "chat_mode": null })
        );
        assert!(!update.is_empty());
        assert!(GroupUpdate::default().is_empty());
    }

    #[test]
    fn list_query_skips_unset_filters() {
        let query = GroupListQuery {
            q: Some("foo".into()),
            limit: Some(10),
            ..GroupListQuery::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "q": "foo", "limit": 10 })
        );
    }

    #[test]
    fn history_cursor_is_sent_as_rfc3339() {
        let before = crate::timestamp::parse("2024-06-15T10:30:00").unwrap();
        let query = HistoryQuery {
            limit: None,
            before: Some(before),
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "before": "2024-06-15T10:30:00+00:00" })
        );
        assert_eq!(
            serde_json::to_value(HistoryQuery::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn group_detail_flattens_list_fields() {
        let detail: GroupDetail = serde_json::from_value(json!({
            "id": 1001,
            "name": null,
            "status": "Normal",
            "enable": true,
            "enable_chat": false,
            "chat_mode": "Mixed",
            "sanity_limit": 3,
            "allow_r18g": false,
            "allow_setu": true,
            "admin_ids": [7, 8],
            "message_count": 2,
            "last_activity": "2024-06-15T10:30:00",
            "recent_messages": [{
                "message_id": 5,
                "user_id": 7,
                "type": "text",
                "bot_send": false,
                "text": "hi",
                "sent_at": "2024-06-15T10:30:00"
            }]
        }))
        .unwrap();

        assert_eq!(detail.group.id, 1001);
        assert_eq!(detail.group.name, None);
        assert_eq!(detail.group.admin_ids, vec![7, 8]);
        assert!(detail.group.last_activity.is_some());
        assert_eq!(detail.recent_messages[0].message_type, "text");
    }

    #[test]
    fn page_reports_remaining_items() {
        let page = Page {
            total: 30,
            items: vec![(); 25],
        };
        assert!(page.has_more(0));
        assert!(!page.has_more(5));
    }
}
