// botdeck-core: Store and routing layer between botdeck-api and the CLI.

pub mod backend;
pub mod config;
pub mod error;
pub mod route;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::Backend;
pub use config::{BackendConfig, TlsVerification};
pub use error::CoreError;
pub use route::{Resolution, RouteName, RouteTable};
pub use store::{AdminStore, Resource, Snapshot};
pub use stream::SnapshotStream;

// Record types the store hands out, re-exported for consumers.
pub use botdeck_api::admin::{
    AutomationRule, AutomationRuleInput, DashboardStats, FeatureConfig, FeatureConfigInput, Group,
    GroupInput, PrivateChat, PrivateChatInput,
};
