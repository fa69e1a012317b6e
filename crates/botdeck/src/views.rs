//! Management views reachable through `botdeck open <path>`.
//!
//! Each view fetches its own data through the store when activated and
//! renders from the store's snapshot afterwards.

use botdeck_core::{AdminStore, CoreError, RouteName, RouteTable, SnapshotStream};
use futures_util::future::{self, BoxFuture};
use futures_util::stream::{BoxStream, StreamExt};

use crate::cli::OutputFormat;
use crate::commands::admin;
use crate::error::CliError;
use crate::output::Painter;

/// Every navigable screen implements View.
///
/// Lifecycle: `activate` → `render`*
pub trait View: Send + Sync {
    fn title(&self) -> &'static str;

    /// Load whatever the view shows. Called on every navigation.
    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>>;

    /// Version of each loaded snapshot of the shown slot, starting with the
    /// one current when first polled.
    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64>;

    /// Render the current snapshot; an unloaded slot renders as empty.
    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        painter: Painter,
    ) -> Result<String, CliError>;
}

fn loaded_versions<T: Send + Sync + 'static>(
    stream: SnapshotStream<T>,
) -> BoxStream<'static, u64> {
    stream
        .into_stream()
        .filter_map(|snap| future::ready(snap.is_loaded().then_some(snap.version())))
        .boxed()
}

// ── Views ───────────────────────────────────────────────────────────

struct DashboardView;

impl View for DashboardView {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move { store.refresh_dashboard().await.map(drop) })
    }

    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64> {
        loaded_versions(store.subscribe_dashboard())
    }

    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        _painter: Painter,
    ) -> Result<String, CliError> {
        let snapshot = store.dashboard();
        let stats = snapshot.get().copied().unwrap_or_default();
        admin::render_stats(format, &stats)
    }
}

struct GroupsView;

impl View for GroupsView {
    fn title(&self) -> &'static str {
        "Groups"
    }

    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move { store.fetch_groups().await.map(drop) })
    }

    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64> {
        loaded_versions(store.subscribe_groups())
    }

    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        painter: Painter,
    ) -> Result<String, CliError> {
        let snapshot = store.groups();
        let items = snapshot.get().map(Vec::as_slice).unwrap_or_default();
        admin::render_groups(format, items, painter)
    }
}

struct PrivateChatsView;

impl View for PrivateChatsView {
    fn title(&self) -> &'static str {
        "Private chats"
    }

    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move { store.fetch_private_chats().await.map(drop) })
    }

    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64> {
        loaded_versions(store.subscribe_private_chats())
    }

    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        painter: Painter,
    ) -> Result<String, CliError> {
        let snapshot = store.private_chats();
        let items = snapshot.get().map(Vec::as_slice).unwrap_or_default();
        admin::render_chats(format, items, painter)
    }
}

struct FeaturesView;

impl View for FeaturesView {
    fn title(&self) -> &'static str {
        "Features"
    }

    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move { store.fetch_feature_configs().await.map(drop) })
    }

    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64> {
        loaded_versions(store.subscribe_feature_configs())
    }

    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        painter: Painter,
    ) -> Result<String, CliError> {
        let snapshot = store.feature_configs();
        let items = snapshot.get().map(Vec::as_slice).unwrap_or_default();
        admin::render_features(format, items, painter)
    }
}

struct AutomationsView;

impl View for AutomationsView {
    fn title(&self) -> &'static str {
        "Automations"
    }

    fn activate<'a>(&'a self, store: &'a AdminStore) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move { store.fetch_automation_rules().await.map(drop) })
    }

    fn updates(&self, store: &AdminStore) -> BoxStream<'static, u64> {
        loaded_versions(store.subscribe_automation_rules())
    }

    fn render(
        &self,
        store: &AdminStore,
        format: &OutputFormat,
        painter: Painter,
    ) -> Result<String, CliError> {
        let snapshot = store.automation_rules();
        let items = snapshot.get().map(Vec::as_slice).unwrap_or_default();
        admin::render_rules(format, items, painter)
    }
}

/// The route table with every view registered; unmatched paths land on the
/// dashboard.
pub fn route_table() -> RouteTable<Box<dyn View>> {
    RouteTable::new()
        .with_fallback(RouteName::Dashboard)
        .route(RouteName::Dashboard, || Box::new(DashboardView) as Box<dyn View>)
        .route(RouteName::Groups, || Box::new(GroupsView) as Box<dyn View>)
        .route(RouteName::PrivateChats, || {
            Box::new(PrivateChatsView) as Box<dyn View>
        })
        .route(RouteName::Features, || Box::new(FeaturesView) as Box<dyn View>)
        .route(RouteName::Automations, || {
            Box::new(AutomationsView) as Box<dyn View>
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use botdeck_api::AdminClient;
    use botdeck_api::TransportConfig;
    use serde_json::json;
    use strum::IntoEnumIterator;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn every_route_has_a_view() {
        let table = route_table();
        for name in RouteName::iter() {
            assert!(table.get(name).is_some(), "no view for {name}");
        }
    }

    #[test]
    fn views_are_built_on_first_visit() {
        let table = route_table();
        assert!(!table.is_instantiated(RouteName::Groups));
        let (resolution, view) = table.view("/groups/").unwrap();
        assert_eq!(resolution.target(), RouteName::Groups);
        assert_eq!(view.title(), "Groups");
        assert!(table.is_instantiated(RouteName::Groups));
        assert!(!table.is_instantiated(RouteName::Features));
    }

    #[test]
    fn unknown_path_lands_on_dashboard() {
        let table = route_table();
        let (resolution, view) = table.view("/settings?x=1").unwrap();
        assert!(resolution.is_redirect());
        assert_eq!(view.title(), "Dashboard");
    }

    #[test]
    fn unloaded_slot_renders_empty() {
        let client =
            AdminClient::new("http://127.0.0.1:9/api", &TransportConfig::default()).unwrap();
        let store = AdminStore::new(client);
        let table = route_table();
        let view = table.get(RouteName::Automations).unwrap();
        let out = view
            .render(&store, &OutputFormat::Json, Painter::plain())
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[tokio::test]
    async fn updates_follow_each_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/automations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "a-1", "name": "greet", "trigger": "join", "action": "hi", "enabled": true }
            ])))
            .expect(2)
            .mount(&server)
            .await;

        let client =
            AdminClient::new(&format!("{}/api", server.uri()), &TransportConfig::default()).unwrap();
        let store = AdminStore::new(client);
        let table = route_table();
        let view = table.get(RouteName::Automations).unwrap();

        let mut updates = view.updates(&store);
        view.activate(&store).await.unwrap();
        assert_eq!(updates.next().await, Some(1));

        view.activate(&store).await.unwrap();
        assert_eq!(updates.next().await, Some(2));

        let out = view
            .render(&store, &OutputFormat::Plain, Painter::plain())
            .unwrap();
        assert_eq!(out, "a-1");
    }
}
