//! Memoization for function values.
//!
//! `memoized` moves a function value from the plain state to the memoized
//! state. The transition is terminal and idempotent: memoizing a memoized
//! value hands back the same cache.

use std::hash::Hash;

use crate::function::{Function1, Function2};

use super::MemoizationPolicy;
use super::cache::memoizer;
use super::retention::{RetainAll, RetainOk};

impl<T, R> Function1<T, R> {
    /// Returns the locking policy of a memoized value, or `None` if this
    /// value is not memoized.
    pub fn memoization_policy(&self) -> Option<MemoizationPolicy> {
        self.memoizer().map(|memoizer| memoizer.policy())
    }

    /// Returns the number of cached results, or `None` if this value is not
    /// memoized.
    pub fn cache_len(&self) -> Option<usize> {
        self.memoizer().map(|memoizer| memoizer.cached_len())
    }
}

impl<T, R> Function1<T, R>
where
    T: Eq + Hash + Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    /// Returns a memoized version of this function using
    /// [`MemoizationPolicy::Global`].
    ///
    /// See [`Function2::memoized`].
    pub fn memoized(&self) -> Self {
        self.memoized_with(MemoizationPolicy::default())
    }

    /// Returns a memoized version of this function using `policy`.
    ///
    /// An already memoized value is returned as is, whatever its policy.
    pub fn memoized_with(&self, policy: MemoizationPolicy) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        Self::from_memoizer(memoizer::<_, _, RetainAll>(self.clone(), policy))
    }
}

impl<T, R, E> Function1<T, Result<R, E>>
where
    T: Eq + Hash + Clone + Send + 'static,
    R: Clone + Send + 'static,
    E: 'static,
{
    /// Returns a memoized version of this function that caches `Ok` results
    /// only.
    ///
    /// See [`Function2::try_memoized`].
    pub fn try_memoized(&self) -> Self {
        self.try_memoized_with(MemoizationPolicy::default())
    }

    /// Like [`try_memoized`](Self::try_memoized), using `policy`.
    pub fn try_memoized_with(&self, policy: MemoizationPolicy) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        Self::from_memoizer(memoizer::<_, _, RetainOk>(self.clone(), policy))
    }
}

impl<T1, T2, R> Function2<T1, T2, R> {
    /// Returns the locking policy of a memoized value, or `None` if this
    /// value is not memoized.
    pub fn memoization_policy(&self) -> Option<MemoizationPolicy> {
        self.memoizer().map(|memoizer| memoizer.policy())
    }

    /// Returns the number of cached argument pairs, or `None` if this value
    /// is not memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let add = Function2::of(|first: i32, second: i32| first + second).memoized();
    /// assert_eq!(add.cache_len(), Some(0));
    ///
    /// add.apply(1, 2);
    /// add.apply(1, 2);
    /// add.apply(2, 1);
    /// assert_eq!(add.cache_len(), Some(2));
    /// ```
    pub fn cache_len(&self) -> Option<usize> {
        self.memoizer().map(|memoizer| memoizer.cached_len())
    }
}

impl<T1, T2, R> Function2<T1, T2, R>
where
    T1: Eq + Hash + Clone + Send + 'static,
    T2: Eq + Hash + Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    /// Returns a memoized version of this function using
    /// [`MemoizationPolicy::Global`].
    ///
    /// The memoized value owns a fresh, empty cache keyed by the argument
    /// pair. Applying it looks the pair up under the cache lock; on a hit the
    /// stored result is cloned and the underlying function is not called, on
    /// a miss the result is computed, stored and returned. The underlying
    /// function therefore runs at most once per distinct pair, however many
    /// threads ask for it.
    ///
    /// A computation that panics stores nothing and releases the lock; the
    /// next call with the same pair computes again.
    ///
    /// Memoizing a memoized value returns it unchanged, sharing its cache.
    ///
    /// # Panics
    ///
    /// Applying the memoized value from inside its own computation panics,
    /// for any arguments under [`MemoizationPolicy::Global`] and for the same
    /// arguments under [`MemoizationPolicy::PerKey`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let counted = Arc::clone(&calls);
    /// let add = Function2::of(move |first: i32, second: i32| {
    ///     counted.fetch_add(1, Ordering::SeqCst);
    ///     first + second
    /// });
    ///
    /// let memoized = add.memoized();
    /// assert_eq!(memoized.apply(2, 3), 5);
    /// assert_eq!(memoized.apply(2, 3), 5);
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    ///
    /// assert!(Function2::ptr_eq(&memoized, &memoized.memoized()));
    /// ```
    pub fn memoized(&self) -> Self {
        self.memoized_with(MemoizationPolicy::default())
    }

    /// Returns a memoized version of this function using `policy`.
    ///
    /// An already memoized value is returned as is, whatever its policy.
    pub fn memoized_with(&self, policy: MemoizationPolicy) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        Self::from_memoizer(memoizer::<_, _, RetainAll>(self.tupled(), policy))
    }
}

impl<T1, T2, R, E> Function2<T1, T2, Result<R, E>>
where
    T1: Eq + Hash + Clone + Send + 'static,
    T2: Eq + Hash + Clone + Send + 'static,
    R: Clone + Send + 'static,
    E: 'static,
{
    /// Returns a memoized version of this function that caches `Ok` results
    /// only.
    ///
    /// An `Err` is returned to the caller and not stored, so the next call
    /// with the same pair computes again. Failed computations are never
    /// replayed from the cache.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let counted = Arc::clone(&calls);
    /// let divide = Function2::of(move |numerator: i32, denominator: i32| {
    ///     counted.fetch_add(1, Ordering::SeqCst);
    ///     numerator.checked_div(denominator).ok_or("division by zero")
    /// })
    /// .try_memoized();
    ///
    /// assert_eq!(divide.apply(1, 0), Err("division by zero"));
    /// assert_eq!(divide.apply(1, 0), Err("division by zero"));
    /// assert_eq!(calls.load(Ordering::SeqCst), 2);
    ///
    /// assert_eq!(divide.apply(6, 3), Ok(2));
    /// assert_eq!(divide.apply(6, 3), Ok(2));
    /// assert_eq!(calls.load(Ordering::SeqCst), 3);
    /// ```
    pub fn try_memoized(&self) -> Self {
        self.try_memoized_with(MemoizationPolicy::default())
    }

    /// Like [`try_memoized`](Self::try_memoized), using `policy`.
    pub fn try_memoized_with(&self, policy: MemoizationPolicy) -> Self {
        if self.is_memoized() {
            return self.clone();
        }
        Self::from_memoizer(memoizer::<_, _, RetainOk>(self.tupled(), policy))
    }
}
