// ── Route table ──
//
// Static path → view mapping. Views are built on first use and reused
// afterwards. Paths that match nothing resolve to the fallback route.

use std::fmt;
use std::sync::OnceLock;

use strum::{EnumIter, IntoEnumIterator};

/// Every navigable destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum RouteName {
    Dashboard,
    Groups,
    PrivateChats,
    Features,
    Automations,
}

impl RouteName {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Groups => "/groups",
            Self::PrivateChats => "/private-chats",
            Self::Features => "/features",
            Self::Automations => "/automations",
        }
    }

    /// Exact match against a normalized path.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::iter().find(|name| name.path() == path)
    }
}

/// Outcome of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteName),
    /// No registered route matched `from`; navigation continues at `to`.
    Redirect { from: String, to: RouteName },
}

impl Resolution {
    /// The route that ends up being shown.
    pub fn target(&self) -> RouteName {
        match self {
            Self::Matched(name) => *name,
            Self::Redirect { to, .. } => *to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Strip query and fragment, collapse trailing slashes, force a leading `/`.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

type Factory<V> = Box<dyn Fn() -> V + Send + Sync>;

struct Entry<V> {
    name: RouteName,
    factory: Factory<V>,
    view: OnceLock<V>,
}

/// Lazily-instantiated route table.
///
/// ```
/// use botdeck_core::{RouteName, RouteTable};
///
/// let table = RouteTable::new()
///     .route(RouteName::Dashboard, || "dashboard")
///     .route(RouteName::Groups, || "groups");
///
/// let (resolution, view) = table.view("/groups/?tab=1").unwrap();
/// assert_eq!(resolution.target(), RouteName::Groups);
/// assert_eq!(*view, "groups");
/// ```
pub struct RouteTable<V> {
    entries: Vec<Entry<V>>,
    fallback: RouteName,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTable<V> {
    /// An empty table whose fallback is the dashboard.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: RouteName::Dashboard,
        }
    }

    pub fn with_fallback(mut self, fallback: RouteName) -> Self {
        self.fallback = fallback;
        self
    }

    /// Register (or replace) the view factory for `name`.
    pub fn route(
        mut self,
        name: RouteName,
        factory: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        let entry = Entry {
            name,
            factory: Box::new(factory),
            view: OnceLock::new(),
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn fallback(&self) -> RouteName {
        self.fallback
    }

    /// Registered route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = RouteName> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    fn entry(&self, name: RouteName) -> Option<&Entry<V>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Match a path without instantiating anything.
    pub fn resolve(&self, path: &str) -> Resolution {
        let normalized = normalize_path(path);
        match RouteName::from_path(&normalized).filter(|name| self.entry(*name).is_some()) {
            Some(name) => Resolution::Matched(name),
            None => Resolution::Redirect {
                from: normalized,
                to: self.fallback,
            },
        }
    }

    /// The view for `name`, built on first access.
    pub fn get(&self, name: RouteName) -> Option<&V> {
        self.entry(name)
            .map(|entry| entry.view.get_or_init(|| (entry.factory)()))
    }

    /// Resolve `path` and return the view that should be shown. `None` only
    /// when the fallback route itself is not registered.
    pub fn view(&self, path: &str) -> Option<(Resolution, &V)> {
        let resolution = self.resolve(path);
        let view = self.get(resolution.target())?;
        Some((resolution, view))
    }

    pub fn is_instantiated(&self, name: RouteName) -> bool {
        self.entry(name).is_some_and(|e| e.view.get().is_some())
    }
}

impl<V> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.names().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn full_table() -> RouteTable<RouteName> {
        RouteName::iter().fold(RouteTable::new(), |table, name| table.route(name, move || name))
    }

    #[test]
    fn every_route_matches_its_own_path() {
        let table = full_table();
        for name in RouteName::iter() {
            assert_eq!(table.resolve(name.path()), Resolution::Matched(name));
        }
    }

    #[test]
    fn trailing_slash_query_and_fragment_are_ignored() {
        let table = full_table();
        assert_eq!(
            table.resolve("/private-chats/"),
            Resolution::Matched(RouteName::PrivateChats)
        );
        assert_eq!(
            table.resolve("/features?tab=flags"),
            Resolution::Matched(RouteName::Features)
        );
        assert_eq!(
            table.resolve("automations#top"),
            Resolution::Matched(RouteName::Automations)
        );
        assert_eq!(table.resolve(""), Resolution::Matched(RouteName::Dashboard));
    }

    #[test]
    fn unknown_paths_redirect_to_dashboard() {
        let table = full_table();
        assert_eq!(
            table.resolve("/settings"),
            Resolution::Redirect {
                from: "/settings".into(),
                to: RouteName::Dashboard,
            }
        );
        assert!(table.resolve("/groups/42").is_redirect());
    }

    #[test]
    fn unregistered_route_redirects_even_if_known() {
        let table = RouteTable::new().route(RouteName::Dashboard, || ());
        assert!(table.resolve("/groups").is_redirect());
        assert!(table.view("/groups").is_some());
    }

    #[test]
    fn views_are_built_once_on_first_use() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let table = RouteTable::new().route(RouteName::Groups, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "groups"
        });

        assert!(!table.is_instantiated(RouteName::Groups));
        assert_eq!(builds.load(Ordering::SeqCst), 0);

        table.get(RouteName::Groups).unwrap();
        table.view("/groups").unwrap();
        assert!(table.is_instantiated(RouteName::Groups));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_fallback_yields_no_view() {
        let table = RouteTable::new().route(RouteName::Groups, || ());
        assert!(table.view("/nowhere").is_none());
    }

    #[test]
    fn display_names_are_kebab_case() {
        assert_eq!(RouteName::PrivateChats.to_string(), "private-chats");
    }
}
