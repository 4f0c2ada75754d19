// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, dawg, error, lexicon};
use std::sync::Arc;

// Capacity-bounded automata by key. Eviction is approximately least recently used.
pub struct LexiconCache<K>
where
    K: std::hash::Hash + Eq + Clone + std::fmt::Debug + Send + Sync + 'static,
{
    capacity: u64,
    cache: moka::sync::Cache<K, Arc<dawg::Dawg>>,
}

impl<K> LexiconCache<K>
where
    K: std::hash::Hash + Eq + Clone + std::fmt::Debug + Send + Sync + 'static,
{
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1) as u64;
        Self {
            capacity,
            cache: moka::sync::Cache::builder()
                .max_capacity(capacity)
                .eviction_listener(|key: Arc<K>, _value, cause| {
                    tracing::trace!(key = ?key, cause = ?cause, "evicted lexicon");
                })
                .build(),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    // settles pending evictions first
    pub fn len(&self) -> usize {
        self.cache.run_pending_tasks();
        self.cache.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.cache.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<Arc<dawg::Dawg>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: K, value: Arc<dawg::Dawg>) {
        self.cache.insert(key, value);
    }

    pub fn get_or_insert_with<F: FnOnce() -> error::Returns<dawg::Dawg>>(
        &self,
        key: K,
        f: F,
    ) -> error::Returns<Arc<dawg::Dawg>> {
        if let Some(ret) = self.cache.get(&key) {
            tracing::trace!(key = ?key, "lexicon cache hit");
            return Ok(ret);
        }
        tracing::trace!(key = ?key, "lexicon cache miss");
        let ret = Arc::new(f()?);
        self.cache.insert(key, Arc::clone(&ret));
        Ok(ret)
    }
}

impl LexiconCache<std::path::PathBuf> {
    // word list at path, one word per line
    pub fn get_or_load<P: AsRef<std::path::Path>>(
        &self,
        alphabet: &alphabet::Alphabet,
        path: P,
    ) -> error::Returns<Arc<dawg::Dawg>> {
        let path = path.as_ref();
        self.get_or_insert_with(path.to_path_buf(), || {
            Ok(lexicon::Lexicon::load(alphabet, path)?.build_dawg(alphabet)?)
        })
    }
}
