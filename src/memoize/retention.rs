//! Which results a cache keeps.

/// Decides whether a computed result is stored, and in what form.
pub(crate) trait Retention<R>: Send + Sync + 'static {
    type Stored: Clone + Send + 'static;

    /// Returns the form to store, or `None` to leave the tuple uncached.
    fn retain(value: &R) -> Option<Self::Stored>;

    fn restore(stored: Self::Stored) -> R;
}

/// Keeps every result.
pub(crate) struct RetainAll;

impl<R: Clone + Send + 'static> Retention<R> for RetainAll {
    type Stored = R;

    #[inline]
    fn retain(value: &R) -> Option<R> {
        Some(value.clone())
    }

    #[inline]
    fn restore(stored: R) -> R {
        stored
    }
}

/// Keeps `Ok` results only; an `Err` is handed to the caller and recomputed
/// next time.
pub(crate) struct RetainOk;

impl<R: Clone + Send + 'static, E: 'static> Retention<Result<R, E>> for RetainOk {
    type Stored = R;

    #[inline]
    fn retain(value: &Result<R, E>) -> Option<R> {
        value.as_ref().ok().cloned()
    }

    #[inline]
    fn restore(stored: R) -> Result<R, E> {
        Ok(stored)
    }
}
