// ── Admin resource store ──
//
// In-memory cache over the admin CRUD contract. Reads replace a slot
// wholesale; writes go to the server first and, only when they succeed,
// re-fetch the affected collection followed by the dashboard stats.

use std::sync::Arc;

use botdeck_api::AdminClient;
use botdeck_api::admin::{
    AutomationRule, AutomationRuleInput, DashboardStats, FeatureConfig, FeatureConfigInput, Group,
    GroupInput, PrivateChat, PrivateChatInput,
};
use tracing::{debug, warn};

use super::snapshot::{Slot, Snapshot};
use crate::error::CoreError;
use crate::stream::SnapshotStream;

/// A cached admin collection, named for logging and refresh routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Resource {
    Groups,
    PrivateChats,
    FeatureConfigs,
    AutomationRules,
}

impl Resource {
    /// Whether mutating this collection changes the dashboard totals.
    pub fn affects_dashboard(self) -> bool {
        !matches!(self, Self::FeatureConfigs)
    }
}

/// Explicitly constructed store for the admin surface.
///
/// Hold one per backend and pass it to whatever needs it. Snapshots are
/// cheap to take; subscribers are notified on every replacement.
pub struct AdminStore {
    client: AdminClient,
    groups: Slot<Vec<Group>>,
    private_chats: Slot<Vec<PrivateChat>>,
    feature_configs: Slot<Vec<FeatureConfig>>,
    automation_rules: Slot<Vec<AutomationRule>>,
    dashboard: Slot<DashboardStats>,
}

impl AdminStore {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            groups: Slot::new(),
            private_chats: Slot::new(),
            feature_configs: Slot::new(),
            automation_rules: Slot::new(),
            dashboard: Slot::new(),
        }
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn groups(&self) -> Snapshot<Vec<Group>> {
        self.groups.snapshot()
    }

    pub fn private_chats(&self) -> Snapshot<Vec<PrivateChat>> {
        self.private_chats.snapshot()
    }

    pub fn feature_configs(&self) -> Snapshot<Vec<FeatureConfig>> {
        self.feature_configs.snapshot()
    }

    pub fn automation_rules(&self) -> Snapshot<Vec<AutomationRule>> {
        self.automation_rules.snapshot()
    }

    pub fn dashboard(&self) -> Snapshot<DashboardStats> {
        self.dashboard.snapshot()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_groups(&self) -> SnapshotStream<Vec<Group>> {
        SnapshotStream::new(self.groups.subscribe())
    }

    pub fn subscribe_private_chats(&self) -> SnapshotStream<Vec<PrivateChat>> {
        SnapshotStream::new(self.private_chats.subscribe())
    }

    pub fn subscribe_feature_configs(&self) -> SnapshotStream<Vec<FeatureConfig>> {
        SnapshotStream::new(self.feature_configs.subscribe())
    }

    pub fn subscribe_automation_rules(&self) -> SnapshotStream<Vec<AutomationRule>> {
        SnapshotStream::new(self.automation_rules.subscribe())
    }

    pub fn subscribe_dashboard(&self) -> SnapshotStream<DashboardStats> {
        SnapshotStream::new(self.dashboard.subscribe())
    }

    // ── Reads (replace-all) ──────────────────────────────────────────

    pub async fn refresh_dashboard(&self) -> Result<Arc<DashboardStats>, CoreError> {
        let stats = self.client.dashboard().await?;
        debug!(groups = stats.groups, automations = stats.automations, "dashboard refreshed");
        Ok(self.dashboard.replace(stats))
    }

    pub async fn fetch_groups(&self) -> Result<Arc<Vec<Group>>, CoreError> {
        let groups = self.client.list_groups().await?;
        debug!(count = groups.len(), "groups fetched");
        Ok(self.groups.replace(groups))
    }

    pub async fn fetch_private_chats(&self) -> Result<Arc<Vec<PrivateChat>>, CoreError> {
        let chats = self.client.list_private_chats().await?;
        debug!(count = chats.len(), "private chats fetched");
        Ok(self.private_chats.replace(chats))
    }

    pub async fn fetch_feature_configs(&self) -> Result<Arc<Vec<FeatureConfig>>, CoreError> {
        let configs = self.client.list_feature_configs().await?;
        debug!(count = configs.len(), "feature configs fetched");
        Ok(self.feature_configs.replace(configs))
    }

    pub async fn fetch_automation_rules(&self) -> Result<Arc<Vec<AutomationRule>>, CoreError> {
        let rules = self.client.list_automation_rules().await?;
        debug!(count = rules.len(), "automation rules fetched");
        Ok(self.automation_rules.replace(rules))
    }

    /// Re-fetch one collection by name.
    pub async fn fetch(&self, resource: Resource) -> Result<(), CoreError> {
        match resource {
            Resource::Groups => self.fetch_groups().await.map(drop),
            Resource::PrivateChats => self.fetch_private_chats().await.map(drop),
            Resource::FeatureConfigs => self.fetch_feature_configs().await.map(drop),
            Resource::AutomationRules => self.fetch_automation_rules().await.map(drop),
        }
    }

    // ── Groups ───────────────────────────────────────────────────────

    pub async fn create_group(&self, input: &GroupInput) -> Result<Group, CoreError> {
        let group = self.client.create_group(input).await?;
        self.after_write(Resource::Groups).await?;
        Ok(group)
    }

    pub async fn update_group(&self, id: &str, input: &GroupInput) -> Result<Group, CoreError> {
        let group = self.client.update_group(id, input).await?;
        self.after_write(Resource::Groups).await?;
        Ok(group)
    }

    pub async fn delete_group(&self, id: &str) -> Result<(), CoreError> {
        self.client.delete_group(id).await?;
        self.after_write(Resource::Groups).await
    }

    // ── Private chats ────────────────────────────────────────────────

    pub async fn create_private_chat(
        &self,
        input: &PrivateChatInput,
    ) -> Result<PrivateChat, CoreError> {
        let chat = self.client.create_private_chat(input).await?;
        self.after_write(Resource::PrivateChats).await?;
        Ok(chat)
    }

    pub async fn update_private_chat(
        &self,
        id: &str,
        input: &PrivateChatInput,
    ) -> Result<PrivateChat, CoreError> {
        let chat = self.client.update_private_chat(id, input).await?;
        self.after_write(Resource::PrivateChats).await?;
        Ok(chat)
    }

    pub async fn delete_private_chat(&self, id: &str) -> Result<(), CoreError> {
        self.client.delete_private_chat(id).await?;
        self.after_write(Resource::PrivateChats).await
    }

    // ── Feature configs ──────────────────────────────────────────────

    pub async fn upsert_feature_config(
        &self,
        input: &FeatureConfigInput,
    ) -> Result<FeatureConfig, CoreError> {
        let config = self.client.upsert_feature_config(input).await?;
        self.after_write(Resource::FeatureConfigs).await?;
        Ok(config)
    }

    pub async fn delete_feature_config(&self, id: &str) -> Result<(), CoreError> {
        self.client.delete_feature_config(id).await?;
        self.after_write(Resource::FeatureConfigs).await
    }

    // ── Automation rules ─────────────────────────────────────────────

    pub async fn create_automation_rule(
        &self,
        input: &AutomationRuleInput,
    ) -> Result<AutomationRule, CoreError> {
        let rule = self.client.create_automation_rule(input).await?;
        self.after_write(Resource::AutomationRules).await?;
        Ok(rule)
    }

    pub async fn update_automation_rule(
        &self,
        id: &str,
        input: &AutomationRuleInput,
    ) -> Result<AutomationRule, CoreError> {
        let rule = self.client.update_automation_rule(id, input).await?;
        self.after_write(Resource::AutomationRules).await?;
        Ok(rule)
    }

    pub async fn delete_automation_rule(&self, id: &str) -> Result<(), CoreError> {
        self.client.delete_automation_rule(id).await?;
        self.after_write(Resource::AutomationRules).await
    }

    // ── Fetch-after-write ────────────────────────────────────────────

    /// Runs only after the mutating request succeeded. The collection is
    /// re-fetched first, then the dashboard when totals may have moved.
    /// A failed refresh is reported; the write itself is not undone and the
    /// slot keeps its previous snapshot.
    async fn after_write(&self, resource: Resource) -> Result<(), CoreError> {
        debug!(%resource, "write succeeded, refreshing");

        if let Err(err) = self.fetch(resource).await {
            warn!(%resource, error = %err, "refresh after write failed");
            return Err(err);
        }
        if resource.affects_dashboard() {
            if let Err(err) = self.refresh_dashboard().await {
                warn!(%resource, error = %err, "dashboard refresh after write failed");
                return Err(err);
            }
        }
        Ok(())
    }
}
