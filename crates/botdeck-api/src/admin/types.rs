// Admin API types
//
// Flat CRUD records keyed by opaque string ids. Create and update share one
// input shape per resource; the server replaces the record wholesale on PUT.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateChat {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub is_muted: bool,
    #[serde(default)]
    pub last_message_preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: String,
    pub name: String,
    pub trigger: String,
    pub action: String,
    pub enabled: bool,
}

/// Aggregate counters from `GET /dashboard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub groups: u64,
    pub active_groups: u64,
    pub private_chats: u64,
    pub muted_chats: u64,
    pub automations: u64,
}

// ── Inputs ───────────────────────────────────────────────────────────

/// Body for `POST /groups` and `PUT /groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateChatInput {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_preview: Option<String>,
}

/// Body for `POST /features`. The server upserts by `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfigInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRuleInput {
    pub name: String,
    pub trigger: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn group_input_omits_unset_fields() {
        let input = GroupInput {
            name: "Ops".into(),
            is_active: Some(false),
            ..GroupInput::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "name": "Ops", "is_active": false })
        );
    }

    #[test]
    fn private_chat_tolerates_missing_optionals() {
        let chat: PrivateChat = serde_json::from_value(json!({
            "id": "c1",
            "username": "alice",
            "is_muted": true
        }))
        .unwrap();
        assert_eq!(chat.alias, None);
        assert!(chat.is_muted);
    }
}
