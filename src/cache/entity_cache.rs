use crate::model::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;

type Slot<T> = Arc<OnceCell<T>>;

/// Memoizes lookups by identifier, with single-flight semantics.
///
/// The first caller for an id installs an empty slot and runs the lookup;
/// callers arriving while it is in flight wait on the same slot instead of
/// issuing their own. A failed lookup leaves the slot empty, so the next
/// waiter runs the lookup again. Entries are never evicted.
pub struct EntityCache<T> {
    slots: Mutex<HashMap<String, Slot<T>>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> EntityCache<T> {
    pub fn insert(&self, id: impl ToString, value: T) {
        self.lock()
            .insert(id.to_string(), Arc::new(OnceCell::new_with(Some(value))));
    }

    pub async fn get_or_fetch<F, Fut>(&self, id: &str, lookup: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = self.slot(id);
        slot.get_or_try_init(lookup).await.cloned()
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    fn slot(&self, id: &str) -> Slot<T> {
        self.lock().entry(id.to_string()).or_default().clone()
    }

    // The map is only touched between awaits, so a poisoned lock still holds
    // consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn counted(calls: &AtomicUsize, value: &str) -> Result<String> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(value.to_string())
    }

    #[tokio::test]
    async fn serialized_gets_look_up_each_id_once() {
        let cache = EntityCache::default();
        let calls = AtomicUsize::new(0);

        for id in ["a", "b", "a", "a", "b", "c"] {
            let expected = id.to_uppercase();
            let value = cache
                .get_or_fetch(id, || counted(&calls, &expected))
                .await
                .unwrap();
            assert_eq!(value, expected);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_gets_share_one_lookup() {
        let cache = EntityCache::default();
        let calls = AtomicUsize::new(0);

        let (first, second, third) = futures::join!(
            cache.get_or_fetch("PHID-USER-a", || counted(&calls, "alice")),
            cache.get_or_fetch("PHID-USER-a", || counted(&calls, "alice")),
            cache.get_or_fetch("PHID-USER-a", || counted(&calls, "alice")),
        );

        assert_eq!(first.unwrap(), "alice");
        assert_eq!(second.unwrap(), "alice");
        assert_eq!(third.unwrap(), "alice");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn seeded_entries_skip_lookup() {
        let cache = EntityCache::default();
        cache.insert("PHID-USER-me", "me".to_string());

        let value = cache
            .get_or_fetch("PHID-USER-me", || async {
                Err(Error::data_shape("seeded entry must not be looked up"))
            })
            .await
            .unwrap();
        assert_eq!(value, "me");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn failed_lookup_is_not_cached() {
        let cache: EntityCache<String> = EntityCache::default();
        let calls = AtomicUsize::new(0);

        let failed = cache
            .get_or_fetch("x", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::data_shape("boom"))
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.len(), 0);

        let value = cache
            .get_or_fetch("x", || counted(&calls, "ok"))
            .await
            .unwrap();
        assert_eq!(value, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
