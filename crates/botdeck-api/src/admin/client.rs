// Admin API client
//
// Flat CRUD over `/dashboard`, `/groups`, `/private-chats`, `/features` and
// `/automations`. Creates answer 201 with the record, deletes answer 204.

use tracing::debug;
use url::Url;

use super::types::{
    AutomationRule, AutomationRuleInput, DashboardStats, FeatureConfig, FeatureConfigInput, Group,
    GroupInput, PrivateChat, PrivateChatInput,
};
use crate::client::HttpClient;
use crate::error::Error;
use crate::transport::TransportConfig;

const GROUPS: &str = "groups";
const PRIVATE_CHATS: &str = "private-chats";
const FEATURES: &str = "features";
const AUTOMATIONS: &str = "automations";

/// Async client for the admin CRUD API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: HttpClient,
}

impl AdminClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: HttpClient::new(base_url, transport)?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        self.http.get(&["dashboard"]).await
    }

    // ── Groups ───────────────────────────────────────────────────────

    pub async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.http.get(&[GROUPS]).await
    }

    pub async fn create_group(&self, input: &GroupInput) -> Result<Group, Error> {
        debug!(name = %input.name, "creating group");
        self.http.post(&[GROUPS], input).await
    }

    pub async fn update_group(&self, id: &str, input: &GroupInput) -> Result<Group, Error> {
        debug!(id, "updating group");
        self.http.put(&[GROUPS, id], input).await
    }

    pub async fn delete_group(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting group");
        self.http.delete(&[GROUPS, id]).await
    }

    // ── Private chats ────────────────────────────────────────────────

    pub async fn list_private_chats(&self) -> Result<Vec<PrivateChat>, Error> {
        self.http.get(&[PRIVATE_CHATS]).await
    }

    pub async fn create_private_chat(&self, input: &PrivateChatInput) -> Result<PrivateChat, Error> {
        debug!(username = %input.username, "creating private chat");
        self.http.post(&[PRIVATE_CHATS], input).await
    }

    pub async fn update_private_chat(
        &self,
        id: &str,
        input: &PrivateChatInput,
    ) -> Result<PrivateChat, Error> {
        debug!(id, "updating private chat");
        self.http.put(&[PRIVATE_CHATS, id], input).await
    }

    pub async fn delete_private_chat(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting private chat");
        self.http.delete(&[PRIVATE_CHATS, id]).await
    }

    // ── Feature configs ──────────────────────────────────────────────

    pub async fn list_feature_configs(&self) -> Result<Vec<FeatureConfig>, Error> {
        self.http.get(&[FEATURES]).await
    }

    /// Create or replace the config with `input.name`.
    pub async fn upsert_feature_config(
        &self,
        input: &FeatureConfigInput,
    ) -> Result<FeatureConfig, Error> {
        debug!(name = %input.name, "upserting feature config");
        self.http.post(&[FEATURES], input).await
    }

    pub async fn delete_feature_config(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting feature config");
        self.http.delete(&[FEATURES, id]).await
    }

    // ── Automation rules ─────────────────────────────────────────────

    pub async fn list_automation_rules(&self) -> Result<Vec<AutomationRule>, Error> {
        self.http.get(&[AUTOMATIONS]).await
    }

    pub async fn create_automation_rule(
        &self,
        input: &AutomationRuleInput,
    ) -> Result<AutomationRule, Error> {
        debug!(name = %input.name, "creating automation rule");
        self.http.post(&[AUTOMATIONS], input).await
    }

    pub async fn update_automation_rule(
        &self,
        id: &str,
        input: &AutomationRuleInput,
    ) -> Result<AutomationRule, Error> {
        debug!(id, "updating automation rule");
        self.http.put(&[AUTOMATIONS, id], input).await
    }

    pub async fn delete_automation_rule(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting automation rule");
        self.http.delete(&[AUTOMATIONS, id]).await
    }
}
