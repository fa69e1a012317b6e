// botdeck-api: Async Rust client for the bot administration API.
//
// Two independent backend contracts live side by side:
// - `console`: typed per-field endpoints (paginated lists, detail views,
//   partial updates, feature flags, dashboard summary)
// - `admin`: flat CRUD resources (groups, private chats, feature configs,
//   automation rules, dashboard stats)
//
// Both share the `HttpClient` adapter and the single `Error` type.

pub mod admin;
pub mod client;
pub mod console;
pub mod error;
pub mod patch;
pub mod timestamp;
pub mod transport;

pub use admin::AdminClient;
pub use client::HttpClient;
pub use console::ConsoleClient;
pub use error::{Error, FailureKind};
pub use patch::Patch;
pub use transport::{TlsMode, TransportConfig};
