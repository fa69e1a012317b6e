// Console API client
//
// Typed shims over the per-field management endpoints. Parameters are
// forwarded verbatim and nothing is validated beyond the type shape; the
// server owns limits and defaults.

use tracing::debug;
use url::Url;

use super::types::{
    ChatMessage, CommandHistoryEntry, CommandHistoryQuery, DashboardSummary, FeatureFlag,
    FeatureFlagResponse, FeatureFlagUpdate, GroupDetail, GroupListItem, GroupListQuery, GroupMeta,
    GroupUpdate, HistoryQuery, Page, PrivateMessage, PrivateMeta, PrivateUserDetail,
    PrivateUserListItem, PrivateUserListQuery, PrivateUserUpdate,
};
use crate::client::HttpClient;
use crate::error::Error;
use crate::transport::TransportConfig;

#[derive(serde::Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(serde::Serialize)]
struct RecentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    recent_limit: Option<u32>,
}

/// Async client for the console API (`/dashboard/summary`, `/groups`,
/// `/private`, `/commands`, `/config/features`).
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: HttpClient,
}

impl ConsoleClient {
    // ── Constructors ─────────────────────────────────────────────────

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

    /// `GET /dashboard/summary`. `limit` bounds the recent-activity feed
    /// (server default 10).
    pub async fn fetch_dashboard_summary(
        &self,
        limit: Option<u32>,
    ) -> Result<DashboardSummary, Error> {
        self.http
            .get_with_query(&["dashboard", "summary"], &LimitQuery { limit })
            .await
    }

    // ── Groups ───────────────────────────────────────────────────────

    /// `GET /groups/meta`: chat-mode and status options for forms.
    pub async fn fetch_group_meta(&self) -> Result<GroupMeta, Error> {
        self.http.get(&["groups", "meta"]).await
    }

    pub async fn list_groups(&self, query: &GroupListQuery) -> Result<Page<GroupListItem>, Error> {
        debug!(?query, "listing groups");
        self.http.get_with_query(&["groups"], query).await
    }

    /// `GET /groups/{id}` including up to `recent_limit` recent messages
    /// (server default 20).
    pub async fn get_group_detail(
        &self,
        id: i64,
        recent_limit: Option<u32>,
    ) -> Result<GroupDetail, Error> {
        let id = id.to_string();
        self.http
            .get_with_query(&["groups", id.as_str()], &RecentQuery { recent_limit })
            .await
    }

    /// `GET /groups/{id}/history`: newest first, older than `query.before`
    /// when set (server default limit 50).
    pub async fn get_group_history(
        &self,
        id: i64,
        query: &HistoryQuery,
    ) -> Result<Vec<ChatMessage>, Error> {
        debug!(id, ?query, "fetching group history");
        let id = id.to_string();
        self.http
            .get_with_query(&["groups", id.as_str(), "history"], query)
            .await
    }

    /// `PUT /groups/{id}` with a partial payload; returns the updated detail.
    pub async fn update_group(&self, id: i64, update: &GroupUpdate) -> Result<GroupDetail, Error> {
        debug!(id, "updating group");
        let id = id.to_string();
        self.http.put(&["groups", id.as_str()], update).await
    }

    // ── Private users ────────────────────────────────────────────────

    pub async fn fetch_private_meta(&self) -> Result<PrivateMeta, Error> {
        self.http.get(&["private", "meta"]).await
    }

    pub async fn list_private_users(
        &self,
        query: &PrivateUserListQuery,
    ) -> Result<Page<PrivateUserListItem>, Error> {
        debug!(?query, "listing private users");
        self.http.get_with_query(&["private", "users"], query).await
    }

    pub async fn get_private_user_detail(
        &self,
        id: i64,
        recent_limit: Option<u32>,
    ) -> Result<PrivateUserDetail, Error> {
        let id = id.to_string();
        self.http
            .get_with_query(&["private", "users", id.as_str()], &RecentQuery { recent_limit })
            .await
    }

    /// `GET /private/users/{id}/history`, same cursor rules as groups.
    pub async fn get_private_history(
        &self,
        id: i64,
        query: &HistoryQuery,
    ) -> Result<Vec<PrivateMessage>, Error> {
        debug!(id, ?query, "fetching private history");
        let id = id.to_string();
        self.http
            .get_with_query(&["private", "users", id.as_str(), "history"], query)
            .await
    }

    pub async fn update_private_user(
        &self,
        id: i64,
        update: &PrivateUserUpdate,
    ) -> Result<PrivateUserDetail, Error> {
        debug!(id, "updating private user");
        let id = id.to_string();
        self.http
            .put(&["private", "users", id.as_str()], update)
            .await
    }

    // ── Command history ──────────────────────────────────────────────

    /// `GET /commands/history`: paginated executions, newest first.
    pub async fn list_command_history(
        &self,
        query: &CommandHistoryQuery,
    ) -> Result<Page<CommandHistoryEntry>, Error> {
        debug!(?query, "listing command history");
        self.http
            .get_with_query(&["commands", "history"], query)
            .await
    }

    // ── Feature flags ────────────────────────────────────────────────

    /// `GET /config/features`: configurable flags plus read-only placeholders.
    pub async fn fetch_feature_flags(&self) -> Result<FeatureFlagResponse, Error> {
        self.http.get(&["config", "features"]).await
    }

    /// `PUT /config/features/{key}` with `{"value": bool}`.
    pub async fn update_feature_flag(&self, key: &str, value: bool) -> Result<FeatureFlag, Error> {
        debug!(key, value, "updating feature flag");
        self.http
            .put(&["config", "features", key], &FeatureFlagUpdate { value })
            .await
    }
}
