//! Locking policies for memoized function values.

/// How a memoized function value serializes access to its cache.
///
/// Both policies call the underlying function at most once per distinct
/// argument tuple over the lifetime of the cache, and neither stores a
/// failed computation.
///
/// # Re-entrancy
///
/// The underlying function must not apply the same memoized value to the
/// same arguments while computing them: that call panics instead of waiting
/// on a lock its own thread holds. Under [`Global`](Self::Global) this
/// extends to *any* arguments. [`PerKey`](Self::PerKey) allows a computation
/// to apply the memoized value to other arguments, which makes recursive
/// definitions (such as a memoized Fibonacci) possible.
///
/// The rejected call unwinds through the outer computation, which stores
/// nothing; the cache stays usable.
///
/// # Examples
///
/// ```rust
/// use lambda2::function::Function2;
/// use lambda2::memoize::MemoizationPolicy;
///
/// let add = Function2::of(|first: i32, second: i32| first + second);
///
/// assert_eq!(add.memoized().memoization_policy(), Some(MemoizationPolicy::Global));
/// assert_eq!(
///     add.memoized_with(MemoizationPolicy::PerKey).memoization_policy(),
///     Some(MemoizationPolicy::PerKey)
/// );
/// assert_eq!(add.memoization_policy(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoizationPolicy {
    /// One lock for the whole cache, held across lookup, computation and
    /// store, whatever the arguments.
    ///
    /// Callers asking for different argument tuples wait for each other.
    #[default]
    Global,
    /// The cache lock is held only to find the slot for an argument tuple;
    /// each slot has its own lock, held across computation and store.
    ///
    /// Callers asking for the same argument tuple wait for each other; other
    /// tuples are computed concurrently.
    PerKey,
}
