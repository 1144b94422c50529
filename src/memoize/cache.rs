//! The caches behind memoized function values.
//!
//! Both caches are keyed by the full argument (the argument pair for a
//! [`Function2`](crate::function::Function2)), grow without bound, and never
//! remove an entry. A computation that panics unwinds through the cache
//! without storing anything and releases every lock it held on the way out.
//!
//! A computation that applies its own cache while holding the lock it needs
//! would wait on itself. Both caches detect this and panic instead.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::function::Function1;

use super::MemoizationPolicy;
use super::retention::Retention;
use super::sync::{Mutex, ThreadId, current_thread_id};

#[cfg(feature = "fxhash")]
type CacheHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type CacheHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type CacheHasher = std::collections::hash_map::RandomState;

type CacheMap<K, V> = HashMap<K, V, CacheHasher>;

fn empty_map<K, V>() -> CacheMap<K, V> {
    HashMap::with_hasher(CacheHasher::default())
}

/// The application step of a memoized function value.
pub(crate) trait Memoizer<K, R>: Send + Sync {
    /// Returns the cached result for `key`, computing and storing it first if
    /// there is none.
    fn apply(&self, key: K) -> R;

    /// Number of stored results.
    fn cached_len(&self) -> usize;

    fn policy(&self) -> MemoizationPolicy;
}

/// Builds the cache for `policy` around `function`.
pub(crate) fn memoizer<K, R, S>(
    function: Function1<K, R>,
    policy: MemoizationPolicy,
) -> Arc<dyn Memoizer<K, R>>
where
    K: Eq + Hash + Clone + Send + 'static,
    R: 'static,
    S: Retention<R>,
{
    tracing::trace!(?policy, "creating memoization cache");
    match policy {
        MemoizationPolicy::Global => Arc::new(GlobalCache::<K, R, S>::new(function)),
        MemoizationPolicy::PerKey => Arc::new(KeyedCache::<K, R, S>::new(function)),
    }
}

// =============================================================================
// Re-entry
// =============================================================================

const GLOBAL_REENTRY: &str =
    "memoized function re-entered while computing; use MemoizationPolicy::PerKey for recursion";

const PER_KEY_REENTRY: &str = "memoized function re-entered for the argument it is computing";

/// The thread computing under a cache lock.
///
/// Set only while that lock is held, so a caller finding its own thread here
/// would wait on itself.
struct Owner(Mutex<Option<ThreadId>>);

impl Owner {
    fn new() -> Self {
        Self(Mutex::new(None))
    }

    fn reject_reentry(&self, message: &'static str) {
        if *self.0.lock() == Some(current_thread_id()) {
            tracing::debug!(message, "memoization re-entry rejected");
            panic!("{message}");
        }
    }

    fn claim(&self) -> Claim<'_> {
        *self.0.lock() = Some(current_thread_id());
        Claim(self)
    }
}

/// Clears the owner when the computation returns or unwinds.
struct Claim<'a>(&'a Owner);

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        *self.0.0.lock() = None;
    }
}

// =============================================================================
// Global
// =============================================================================

/// One lock held across lookup, computation and store for every key.
pub(crate) struct GlobalCache<K, R, S: Retention<R>> {
    function: Function1<K, R>,
    entries: Mutex<CacheMap<K, S::Stored>>,
    owner: Owner,
}

impl<K, R, S: Retention<R>> GlobalCache<K, R, S> {
    pub(crate) fn new(function: Function1<K, R>) -> Self {
        Self {
            function,
            entries: Mutex::new(empty_map()),
            owner: Owner::new(),
        }
    }
}

impl<K, R, S> Memoizer<K, R> for GlobalCache<K, R, S>
where
    K: Eq + Hash + Clone + Send + 'static,
    R: 'static,
    S: Retention<R>,
{
    fn apply(&self, key: K) -> R {
        self.owner.reject_reentry(GLOBAL_REENTRY);
        let mut entries = self.entries.lock();
        if let Some(stored) = entries.get(&key) {
            tracing::trace!(policy = ?MemoizationPolicy::Global, "memoization cache hit");
            return S::restore(stored.clone());
        }

        tracing::trace!(policy = ?MemoizationPolicy::Global, "memoization cache miss");
        let value = {
            let _computing = self.owner.claim();
            self.function.apply(key.clone())
        };
        match S::retain(&value) {
            Some(stored) => {
                entries.insert(key, stored);
                tracing::trace!(entries = entries.len(), "memoization result stored");
            }
            None => tracing::debug!("memoization result not retained"),
        }
        value
    }

    fn cached_len(&self) -> usize {
        self.entries.lock().len()
    }

    fn policy(&self) -> MemoizationPolicy {
        MemoizationPolicy::Global
    }
}

// =============================================================================
// PerKey
// =============================================================================

struct Slot<V> {
    value: Mutex<Option<V>>,
    owner: Owner,
}

type SlotMap<K, V> = CacheMap<K, Arc<Slot<V>>>;

/// A short-lived lock to find a key's slot, and one lock per slot held across
/// computation and store.
///
/// A slot whose computation failed is removed again unless another caller is
/// already waiting on it.
pub(crate) struct KeyedCache<K, R, S: Retention<R>> {
    function: Function1<K, R>,
    slots: Mutex<SlotMap<K, S::Stored>>,
}

impl<K, R, S: Retention<R>> KeyedCache<K, R, S> {
    pub(crate) fn new(function: Function1<K, R>) -> Self {
        Self {
            function,
            slots: Mutex::new(empty_map()),
        }
    }
}

impl<K, R, S> KeyedCache<K, R, S>
where
    K: Eq + Hash + Clone,
    S: Retention<R>,
{
    fn slot(&self, key: &K) -> Arc<Slot<S::Stored>> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(key.clone()).or_insert_with(|| {
            Arc::new(Slot {
                value: Mutex::new(None),
                owner: Owner::new(),
            })
        });
        Arc::clone(slot)
    }
}

/// Removes a slot left empty by a failed computation.
///
/// Armed with the key once the caller starts computing.
struct Vacancy<'a, K: Eq + Hash, V> {
    slots: &'a Mutex<SlotMap<K, V>>,
    slot: Arc<Slot<V>>,
    key: Option<K>,
}

impl<K: Eq + Hash, V> Drop for Vacancy<'_, K, V> {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        let mut slots = self.slots.lock();
        // Slots are only handed out under the map lock, so a count of two
        // (map and this guard) cannot grow while it is held.
        let unshared = Arc::strong_count(&self.slot) == 2
            && slots
                .get(&key)
                .is_some_and(|current| Arc::ptr_eq(current, &self.slot));
        if unshared && self.slot.value.lock().is_none() {
            slots.remove(&key);
            tracing::trace!(slots = slots.len(), "empty memoization slot removed");
        }
    }
}

impl<K, R, S> Memoizer<K, R> for KeyedCache<K, R, S>
where
    K: Eq + Hash + Clone + Send + 'static,
    R: 'static,
    S: Retention<R>,
{
    fn apply(&self, key: K) -> R {
        let mut vacancy = Vacancy {
            slots: &self.slots,
            slot: self.slot(&key),
            key: None,
        };
        let slot = &vacancy.slot;
        slot.owner.reject_reentry(PER_KEY_REENTRY);

        let mut cell = slot.value.lock();
        if let Some(stored) = cell.as_ref() {
            tracing::trace!(policy = ?MemoizationPolicy::PerKey, "memoization cache hit");
            return S::restore(stored.clone());
        }

        tracing::trace!(policy = ?MemoizationPolicy::PerKey, "memoization cache miss");
        vacancy.key = Some(key.clone());
        let value = {
            let _computing = slot.owner.claim();
            self.function.apply(key)
        };
        match S::retain(&value) {
            Some(stored) => {
                *cell = Some(stored);
                vacancy.key = None;
                tracing::trace!("memoization result stored");
            }
            None => tracing::debug!("memoization result not retained"),
        }
        value
    }

    // Waits for slots that are being computed.
    fn cached_len(&self) -> usize {
        let slots: Vec<_> = self.slots.lock().values().cloned().collect();
        slots
            .iter()
            .filter(|slot| slot.value.lock().is_some())
            .count()
    }

    fn policy(&self) -> MemoizationPolicy {
        MemoizationPolicy::PerKey
    }
}
