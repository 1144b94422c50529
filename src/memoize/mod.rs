//! Thread-safe memoization of function values.
//!
//! [`Function2::memoized`](crate::function::Function2::memoized) wraps a
//! function value in a cache keyed by the full argument pair. The result is
//! still a plain `Function2`, observably identical in what it returns, but it
//! computes each distinct pair at most once.
//!
//! # Guarantees
//!
//! - **At most once**: the underlying function runs at most once per distinct
//!   argument tuple over the cache's lifetime, for any number of serial or
//!   concurrent callers.
//! - **Failures are not cached**: a panicking computation stores nothing and
//!   releases its lock; with
//!   [`try_memoized`](crate::function::Function2::try_memoized), `Err`
//!   results are not stored either.
//! - **Idempotence**: memoizing a memoized value returns the same value,
//!   sharing its cache.
//! - **No self-waiting**: a computation that applies its own memoized value
//!   where that would wait on its own lock panics instead of hanging. See
//!   [`MemoizationPolicy`] for when that is.
//! - **Unbounded**: stored entries are never evicted or removed.
//!
//! Caches are `HashMap`s. The `fxhash` and `ahash` features switch their
//! hasher to `rustc-hash` or `ahash`.
//!
//! # Examples
//!
//! ```rust
//! use lambda2::function::Function2;
//! use lambda2::memoize::MemoizationPolicy;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::thread;
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counted = Arc::clone(&calls);
//! let power = Function2::of(move |base: u64, exponent: u32| {
//!     counted.fetch_add(1, Ordering::SeqCst);
//!     base.pow(exponent)
//! })
//! .memoized_with(MemoizationPolicy::PerKey);
//!
//! let handles: Vec<_> = (0..8)
//!     .map(|_| {
//!         let power = power.clone();
//!         thread::spawn(move || power.apply(2, 10))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 1024);
//! }
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

mod cache;
mod memoized;
mod policy;
mod retention;
mod sync;

pub(crate) use cache::Memoizer;
pub use policy::MemoizationPolicy;

static_assertions::assert_impl_all!(MemoizationPolicy: Copy, Default, Send, Sync);
