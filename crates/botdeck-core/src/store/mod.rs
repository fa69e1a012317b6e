// ── Resource store ──
//
// Snapshot slots with push-based change notification, plus the
// fetch-after-write policy for the admin surface.

mod admin_store;
mod snapshot;

pub use admin_store::{AdminStore, Resource};
pub use snapshot::Snapshot;
