//! Process-wide binary caches.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared write-once cache.
///
/// Clones share the same storage. The first value stored under a key is
/// kept; later `put`s for that key return the stored value unchanged, so two
/// concurrent resolutions of the same asset converge on one entry.
pub struct AssetCache<K, V> {
    entries: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for AssetCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for AssetCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> AssetCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    /// Insert unless present; returns the value now stored under `key`.
    pub async fn put(&self, key: K, value: V) -> V {
        let mut entries = self.entries.write().await;
        entries.entry(key).or_insert(value).clone()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
