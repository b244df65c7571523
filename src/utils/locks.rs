use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<Mutex<()>>>;

// KeyedLocks hands out one async mutex per key so that read-modify-write sequences on the
// same book are serialized while different books proceed independently. An entry lives only
// while some caller holds or waits on it.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyedLocks {
    locks: Arc<StdMutex<LockMap>>,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn lock(&self, key: &str) -> KeyedGuard {
        let lock = self.entries().entry(key.to_string()).or_default().clone();
        // built before waiting so a cancelled wait still releases the entry
        let mut keyed = KeyedGuard {
            key: key.to_string(),
            locks: self.clone(),
            lock,
            guard: None,
        };
        keyed.guard = Some(keyed.lock.clone().lock_owned().await);
        keyed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// KeyedGuard releases the key on drop and removes the map entry once no other caller shares it.
#[derive(Debug)]
pub(crate) struct KeyedGuard {
    key: String,
    locks: KeyedLocks,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut entries = self.locks.entries();
        // the map and this guard hold the only references
        if Arc::strong_count(&self.lock) == 2 {
            entries.remove(self.key.as_str());
        }
    }
}
