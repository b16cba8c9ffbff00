//! Per-duaa serialization of mutations.
//!
//! Two updates to the same duaa must not be in flight together: the
//! second would be answered with a record that predates the first and
//! replace it locally. Holding the entity's lock from request until the
//! result is applied makes every later response include earlier changes.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

pub(crate) struct EntityLocks<K> {
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K: Copy + Eq + Hash> EntityLocks<K> {
    pub(crate) fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until no other holder of `key` remains.
    pub(crate) async fn acquire(&self, key: K) -> EntityGuard<'_, K> {
        let lock = self.locks.lock().entry(key).or_default().clone();
        let guard = lock.clone().lock_owned().await;
        EntityGuard {
            owner: self,
            key,
            lock,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

pub(crate) struct EntityGuard<'a, K: Copy + Eq + Hash> {
    owner: &'a EntityLocks<K>,
    key: K,
    lock: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Copy + Eq + Hash> Drop for EntityGuard<'_, K> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.owner.locks.lock();
        // Map entry plus ours: nobody else is waiting.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn entry_removed_after_last_holder() {
        let locks = EntityLocks::new();
        {
            let _guard = locks.acquire(1u32).await;
            assert_eq!(locks.len(), 1);
        }
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn same_key_is_serialized() {
        let locks = Arc::new(EntityLocks::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(7u32).await;
                order.lock().push("first-start");
                tokio::time::sleep(Duration::from_millis(30)).await;
                order.lock().push("first-end");
            })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(7u32).await;
                order.lock().push("second");
            })
        };

        first.await.unwrap();
        second.await.unwrap();
        assert_eq!(*order.lock(), vec!["first-start", "first-end", "second"]);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn different_keys_do_not_block() {
        let locks = EntityLocks::new();
        let _a = locks.acquire(1u32).await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(2u32)).await;
        assert!(b.is_ok());
    }
}
