//! Single-argument function values.
//!
//! [`Function1<T, R>`] is the value every two-argument transformation hands
//! back: partial application, currying and tupling all produce one. It keeps
//! the same shape as [`Function2`](super::Function2): a shared, immutable
//! callable that is cheap to clone and safe to send across threads.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

#[cfg(feature = "memoize")]
use crate::memoize::Memoizer;

use super::FunctionError;

enum Repr<T, R> {
    Plain(Arc<dyn Fn(T) -> R + Send + Sync>),
    #[cfg(feature = "memoize")]
    Memoized(Arc<dyn Memoizer<T, R>>),
}

impl<T, R> Clone for Repr<T, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(function) => Self::Plain(Arc::clone(function)),
            #[cfg(feature = "memoize")]
            Self::Memoized(memoizer) => Self::Memoized(Arc::clone(memoizer)),
        }
    }
}

/// A function value with one argument.
///
/// Cloning a `Function1` shares the underlying callable; for a memoized value
/// it also shares the cache.
///
/// # Type Parameters
///
/// * `T` - The argument type
/// * `R` - The return type
///
/// # Examples
///
/// ```rust
/// use lambda2::function::Function1;
///
/// let increment = Function1::of(|value: i32| value + 1);
/// let double_then_increment = increment.compose(|value: i32| value * 2);
///
/// assert_eq!(increment.apply(1), 2);
/// assert_eq!(double_then_increment.apply(5), 11);
/// ```
pub struct Function1<T, R> {
    repr: Repr<T, R>,
}

impl<T, R> Function1<T, R> {
    /// The number of arguments a `Function1` takes.
    pub const ARITY: usize = 1;

    /// Applies this function to its argument and returns the result.
    #[inline]
    pub fn apply(&self, argument: T) -> R {
        match &self.repr {
            Repr::Plain(function) => function(argument),
            #[cfg(feature = "memoize")]
            Repr::Memoized(memoizer) => memoizer.apply(argument),
        }
    }

    /// Returns the number of arguments, always `1`.
    #[inline]
    pub const fn arity(&self) -> usize {
        Self::ARITY
    }

    /// Returns `true` if this value caches its results.
    #[inline]
    pub const fn is_memoized(&self) -> bool {
        match self.repr {
            Repr::Plain(_) => false,
            #[cfg(feature = "memoize")]
            Repr::Memoized(_) => true,
        }
    }

    /// Returns `true` if both values share the same callable (and cache).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function1;
    ///
    /// let negate = Function1::of(|value: i32| -value);
    /// let shared = negate.clone();
    /// let rebuilt = Function1::of(|value: i32| -value);
    ///
    /// assert!(Function1::ptr_eq(&negate, &shared));
    /// assert!(!Function1::ptr_eq(&negate, &rebuilt));
    /// ```
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        match (&this.repr, &other.repr) {
            (Repr::Plain(left), Repr::Plain(right)) => Arc::ptr_eq(left, right),
            #[cfg(feature = "memoize")]
            (Repr::Memoized(left), Repr::Memoized(right)) => Arc::ptr_eq(left, right),
            #[cfg(feature = "memoize")]
            _ => false,
        }
    }

    #[cfg(feature = "memoize")]
    pub(crate) fn from_memoizer(memoizer: Arc<dyn Memoizer<T, R>>) -> Self {
        Self {
            repr: Repr::Memoized(memoizer),
        }
    }

    #[cfg(feature = "memoize")]
    pub(crate) fn memoizer(&self) -> Option<&Arc<dyn Memoizer<T, R>>> {
        match &self.repr {
            Repr::Memoized(memoizer) => Some(memoizer),
            Repr::Plain(_) => None,
        }
    }
}

impl<T: 'static, R: 'static> Function1<T, R> {
    /// Wraps a callable as a function value.
    #[inline]
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            repr: Repr::Plain(Arc::new(function)),
        }
    }

    /// Creates a `Function1` from a closure or a function item.
    ///
    /// This is the identity adapter: the result behaves exactly like
    /// `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function1;
    ///
    /// fn length(text: &'static str) -> usize {
    ///     text.len()
    /// }
    ///
    /// let function = Function1::of(length);
    /// assert_eq!(function.apply("four"), 4);
    /// ```
    #[inline]
    pub fn of<F>(function: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self::new(function)
    }

    /// Returns a function that applies `self` and then `after` to the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function1;
    ///
    /// let parse = Function1::of(|text: &'static str| text.len());
    /// let is_long = parse.and_then(|length| length > 3);
    ///
    /// assert!(is_long.apply("hello"));
    /// assert!(!is_long.apply("hi"));
    /// ```
    pub fn and_then<V, G>(&self, after: G) -> Function1<T, V>
    where
        V: 'static,
        G: Fn(R) -> V + Send + Sync + 'static,
    {
        let function = self.clone();
        Function1::new(move |argument| after(function.apply(argument)))
    }

    /// Like [`and_then`](Self::and_then), but `after` may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::MissingArgument`] if `after` is `None`.
    pub fn try_and_then<V: 'static>(
        &self,
        after: Option<Function1<R, V>>,
    ) -> Result<Function1<T, V>, FunctionError> {
        let after = after.ok_or(FunctionError::MissingArgument { name: "after" })?;
        Ok(self.and_then(after.into_fn()))
    }

    /// Returns a function that applies `before` and then `self` to the result.
    pub fn compose<A, G>(&self, before: G) -> Function1<A, R>
    where
        A: 'static,
        G: Fn(A) -> T + Send + Sync + 'static,
    {
        let function = self.clone();
        Function1::new(move |argument| function.apply(before(argument)))
    }

    /// Converts this value into a plain closure.
    ///
    /// Useful where an API expects `impl Fn`, such as
    /// [`Function2::and_then`](super::Function2::and_then).
    pub fn into_fn(self) -> impl Fn(T) -> R + Send + Sync + 'static {
        move |argument| self.apply(argument)
    }
}

impl<T: 'static> Function1<T, T> {
    /// The identity function.
    ///
    /// `f.compose(identity)` and `identity.and_then(f)` behave like `f`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(|value| value)
    }
}

impl<T: 'static, R: Clone + Send + Sync + 'static> Function1<T, R> {
    /// Returns a function that ignores its argument and returns `value`.
    #[inline]
    pub fn constant(value: R) -> Self {
        Self::new(move |_| value.clone())
    }
}

impl<T: 'static, R: 'static> Function1<T, Option<R>> {
    /// Lifts a fallible function into a total one returning `Option`.
    ///
    /// `Ok(value)` becomes `Some(value)`; any `Err` becomes `None` and its
    /// details are discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function1;
    ///
    /// let parse = Function1::lift(|text: &'static str| text.parse::<i32>());
    ///
    /// assert_eq!(parse.apply("42"), Some(42));
    /// assert_eq!(parse.apply("forty-two"), None);
    /// ```
    pub fn lift<E, F>(partial: F) -> Self
    where
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::new(move |argument| partial(argument).ok())
    }

    /// Lifts a function that fails by panicking into a total one returning
    /// `Option`.
    ///
    /// The panic is caught at this boundary and becomes `None`. The installed
    /// panic hook still runs.
    pub fn lift_unwind<F>(partial: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self::new(move |argument| catch_unwind(AssertUnwindSafe(|| partial(argument))).ok())
    }
}

impl<T, R> Clone for Function1<T, R> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
        }
    }
}

impl<T: 'static, R: 'static, F> From<F> for Function1<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(function: F) -> Self {
        Self::new(function)
    }
}

impl<T, R> fmt::Debug for Function1<T, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function1")
            .field("arity", &Self::ARITY)
            .field("memoized", &self.is_memoized())
            .finish_non_exhaustive()
    }
}
