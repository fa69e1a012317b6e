// ── Collection snapshots ──
//
// One `watch` channel per cached resource. Every successful fetch replaces
// the whole value and bumps the version; nothing patches cached state in
// place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Point-in-time view of one cached resource.
///
/// `value` is `None` until the first successful fetch. `version` starts at
/// 0 and increases by one on every replacement.
#[derive(Debug)]
pub struct Snapshot<T> {
    value: Option<Arc<T>>,
    version: u64,
    fetched_at: Option<DateTime<Utc>>,
}

// Manual impl: cloning only bumps the Arc, so `T: Clone` is not needed.
impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            version: self.version,
            fetched_at: self.fetched_at,
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            version: 0,
            fetched_at: None,
        }
    }
}

impl<T> Snapshot<T> {
    /// Borrow the cached value.
    pub fn get(&self) -> Option<&T> {
        self.value.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

/// Writer side of a snapshot. Owned by the store.
pub(crate) struct Slot<T> {
    sender: watch::Sender<Snapshot<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(Snapshot::default());
        Self { sender }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.sender.borrow().clone()
    }

    /// Replace the whole value. Returns the shared handle that was stored.
    pub(crate) fn replace(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let stored = Arc::clone(&value);
        self.sender.send_modify(|snap| {
            snap.value = Some(stored);
            snap.version += 1;
            snap.fetched_at = Some(Utc::now());
        });
        value
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_unloaded() {
        let slot: Slot<Vec<u8>> = Slot::new();
        let snap = slot.snapshot();
        assert!(!snap.is_loaded());
        assert_eq!(snap.version(), 0);
        assert!(snap.fetched_at().is_none());
    }

    #[test]
    fn replace_overwrites_and_bumps_version() {
        let slot = Slot::new();
        slot.replace(vec![1, 2, 3]);
        slot.replace(vec![9]);

        let snap = slot.snapshot();
        assert_eq!(snap.get().unwrap(), &vec![9]);
        assert_eq!(snap.version(), 2);
        assert!(snap.fetched_at().is_some());
    }

    #[test]
    fn old_snapshots_are_unaffected_by_replace() {
        let slot = Slot::new();
        slot.replace("before".to_owned());
        let old = slot.snapshot();

        slot.replace("after".to_owned());
        assert_eq!(old.get().unwrap(), "before");
        assert_eq!(slot.snapshot().get().unwrap(), "after");
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let slot = Slot::new();
        let mut rx = slot.subscribe();

        slot.replace(7_u32);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().get(), Some(&7));
    }
}
