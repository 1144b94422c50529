//! Two-argument function values.
//!
//! [`Function2<T1, T2, R>`] wraps a callable of two arguments. Everything
//! besides [`apply`](Function2::apply) is derived from it and returns a new
//! value, leaving the receiver untouched.
//!
//! # Laws
//!
//! For every `f`, `a` and `b`:
//!
//! - **Currying**: `f.curried().apply(a).apply(b) == f.apply(a, b)`
//! - **Tupling**: `f.tupled().apply((a, b)) == f.apply(a, b)`
//! - **Reversal**: `f.reversed().apply(b, a) == f.apply(a, b)`
//! - **Double reversal**: `f.reversed().reversed().apply(a, b) == f.apply(a, b)`
//! - **Composition**: `f.and_then(g).apply(a, b) == g(f.apply(a, b))`

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

#[cfg(feature = "memoize")]
use crate::memoize::Memoizer;

use super::{Function1, FunctionError};

enum Repr<T1, T2, R> {
    Plain(Arc<dyn Fn(T1, T2) -> R + Send + Sync>),
    #[cfg(feature = "memoize")]
    Memoized(Arc<dyn Memoizer<(T1, T2), R>>),
}

impl<T1, T2, R> Clone for Repr<T1, T2, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(function) => Self::Plain(Arc::clone(function)),
            #[cfg(feature = "memoize")]
            Self::Memoized(memoizer) => Self::Memoized(Arc::clone(memoizer)),
        }
    }
}

/// A function value with two arguments.
///
/// A `Function2` is immutable: every transformation returns a new value.
/// Cloning is cheap and shares the underlying callable; clones of a memoized
/// value share one cache.
///
/// # Type Parameters
///
/// * `T1` - The type of the first argument
/// * `T2` - The type of the second argument
/// * `R` - The return type
///
/// # Examples
///
/// ```rust
/// use lambda2::function::Function2;
///
/// let add = Function2::of(|first: i32, second: i32| first + second);
///
/// assert_eq!(add.apply(2, 3), 5);
/// assert_eq!(add.curried().apply(2).apply(3), 5);
/// assert_eq!(add.tupled().apply((2, 3)), 5);
/// assert_eq!(add.partial(2).apply(3), 5);
/// ```
pub struct Function2<T1, T2, R> {
    repr: Repr<T1, T2, R>,
}

impl<T1, T2, R> Function2<T1, T2, R> {
    /// The number of arguments a `Function2` takes.
    pub const ARITY: usize = 2;

    /// Applies this function to two arguments and returns the result.
    #[inline]
    pub fn apply(&self, first: T1, second: T2) -> R {
        match &self.repr {
            Repr::Plain(function) => function(first, second),
            #[cfg(feature = "memoize")]
            Repr::Memoized(memoizer) => memoizer.apply((first, second)),
        }
    }

    /// Returns the number of arguments, always `2`.
    #[inline]
    pub const fn arity(&self) -> usize {
        Self::ARITY
    }

    /// Returns `true` if this value caches its results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let add = Function2::of(|first: i32, second: i32| first + second);
    ///
    /// assert!(!add.is_memoized());
    /// assert!(add.memoized().is_memoized());
    /// ```
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
    /// Memoizing an already memoized value hands back the same cache, which is
    /// observable through this check.
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
    pub(crate) fn from_memoizer(memoizer: Arc<dyn Memoizer<(T1, T2), R>>) -> Self {
        Self {
            repr: Repr::Memoized(memoizer),
        }
    }

    #[cfg(feature = "memoize")]
    pub(crate) fn memoizer(&self) -> Option<&Arc<dyn Memoizer<(T1, T2), R>>> {
        match &self.repr {
            Repr::Memoized(memoizer) => Some(memoizer),
            Repr::Plain(_) => None,
        }
    }
}

impl<T1: 'static, T2: 'static, R: 'static> Function2<T1, T2, R> {
    /// Wraps a callable as a function value.
    #[inline]
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(T1, T2) -> R + Send + Sync + 'static,
    {
        Self {
            repr: Repr::Plain(Arc::new(function)),
        }
    }

    /// Creates a `Function2` from a closure or a function item.
    ///
    /// This is the identity adapter: the result behaves exactly like
    /// `function`. Function items and closures both need a target type before
    /// they can be stored and passed around as values; `of` provides it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// fn repeat(text: &'static str, times: usize) -> String {
    ///     text.repeat(times)
    /// }
    ///
    /// let function = Function2::of(repeat);
    /// assert_eq!(function.apply("ab", 3), "ababab");
    /// ```
    #[inline]
    pub fn of<F>(function: F) -> Self
    where
        F: Fn(T1, T2) -> R + Send + Sync + 'static,
    {
        Self::new(function)
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Applies this function partially, fixing the first argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let subtract = Function2::of(|minuend: i32, subtrahend: i32| minuend - subtrahend);
    /// let ten_minus = subtract.partial(10);
    ///
    /// assert_eq!(ten_minus.apply(3), 7);
    /// assert_eq!(ten_minus.apply(12), -2);
    /// ```
    pub fn partial(&self, first: T1) -> Function1<T2, R>
    where
        T1: Clone + Send + Sync,
    {
        let function = self.clone();
        Function1::new(move |second| function.apply(first.clone(), second))
    }

    /// Returns the curried form: a function of the first argument returning a
    /// function of the second.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let concat = Function2::of(|left: String, right: &'static str| left + right);
    /// let hello = concat.curried().apply("Hello, ".to_string());
    ///
    /// assert_eq!(hello.apply("World"), "Hello, World");
    /// assert_eq!(hello.apply("Rust"), "Hello, Rust");
    /// ```
    pub fn curried(&self) -> Function1<T1, Function1<T2, R>>
    where
        T1: Clone + Send + Sync,
    {
        let function = self.clone();
        Function1::new(move |first| function.partial(first))
    }

    /// Returns the tupled form: a function of the argument pair.
    pub fn tupled(&self) -> Function1<(T1, T2), R> {
        let function = self.clone();
        Function1::new(move |(first, second)| function.apply(first, second))
    }

    /// Returns a function taking the arguments in reverse order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let divide = Function2::of(|numerator: f64, denominator: f64| numerator / denominator);
    /// let reversed = divide.reversed();
    ///
    /// assert_eq!(divide.apply(10.0, 2.0), 5.0);
    /// assert_eq!(reversed.apply(2.0, 10.0), 5.0);
    /// ```
    pub fn reversed(&self) -> Function2<T2, T1, R> {
        let function = self.clone();
        Function2::new(move |second, first| function.apply(first, second))
    }

    /// Returns a function that applies `self` and then `after` to the result.
    ///
    /// A [`Function1`] can be passed through
    /// [`Function1::into_fn`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let add = Function2::of(|first: i32, second: i32| first + second);
    /// let describe = add.and_then(|sum| format!("sum = {sum}"));
    ///
    /// assert_eq!(describe.apply(2, 3), "sum = 5");
    /// ```
    pub fn and_then<V, G>(&self, after: G) -> Function2<T1, T2, V>
    where
        V: 'static,
        G: Fn(R) -> V + Send + Sync + 'static,
    {
        let function = self.clone();
        Function2::new(move |first, second| after(function.apply(first, second)))
    }

    /// Like [`and_then`](Self::and_then), but `after` may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::MissingArgument`] naming `"after"` if `after`
    /// is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::{Function1, Function2, FunctionError};
    ///
    /// let add = Function2::of(|first: i32, second: i32| first + second);
    ///
    /// let error = add.try_and_then(None::<Function1<i32, i32>>).unwrap_err();
    /// assert_eq!(error, FunctionError::MissingArgument { name: "after" });
    ///
    /// let doubled = add.try_and_then(Some(Function1::of(|sum: i32| sum * 2))).unwrap();
    /// assert_eq!(doubled.apply(2, 3), 10);
    /// ```
    pub fn try_and_then<V: 'static>(
        &self,
        after: Option<Function1<R, V>>,
    ) -> Result<Function2<T1, T2, V>, FunctionError> {
        let after = after.ok_or(FunctionError::MissingArgument { name: "after" })?;
        Ok(self.and_then(after.into_fn()))
    }

    /// Converts this value into a plain closure.
    pub fn into_fn(self) -> impl Fn(T1, T2) -> R + Send + Sync + 'static {
        move |first, second| self.apply(first, second)
    }
}

impl<T1: 'static, T2: 'static, R: 'static> Function2<T1, T2, Option<R>> {
    /// Lifts a fallible function into a total one returning `Option`.
    ///
    /// `Ok(value)` becomes `Some(value)`; any `Err` becomes `None`. Callers
    /// cannot tell failure causes apart through the lifted function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let divide = Function2::lift(|numerator: i32, denominator: i32| {
    ///     numerator.checked_div(denominator).ok_or("division by zero")
    /// });
    ///
    /// assert_eq!(divide.apply(10, 2), Some(5));
    /// assert_eq!(divide.apply(10, 0), None);
    /// ```
    pub fn lift<E, F>(partial: F) -> Self
    where
        F: Fn(T1, T2) -> Result<R, E> + Send + Sync + 'static,
    {
        Self::new(move |first, second| partial(first, second).ok())
    }

    /// Lifts a function that fails by panicking into a total one returning
    /// `Option`.
    ///
    /// The panic is caught at this boundary and becomes `None`. The installed
    /// panic hook still runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    ///
    /// let index = Function2::lift_unwind(|items: Vec<i32>, position: usize| items[position]);
    ///
    /// assert_eq!(index.apply(vec![1, 2, 3], 1), Some(2));
    /// assert_eq!(index.apply(vec![1, 2, 3], 7), None);
    /// ```
    pub fn lift_unwind<F>(partial: F) -> Self
    where
        F: Fn(T1, T2) -> R + Send + Sync + 'static,
    {
        Self::new(move |first, second| {
            catch_unwind(AssertUnwindSafe(|| partial(first, second))).ok()
        })
    }
}

impl<T1, T2, R> Clone for Function2<T1, T2, R> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
        }
    }
}

impl<T1: 'static, T2: 'static, R: 'static, F> From<F> for Function2<T1, T2, R>
where
    F: Fn(T1, T2) -> R + Send + Sync + 'static,
{
    fn from(function: F) -> Self {
        Self::new(function)
    }
}

impl<T1, T2, R> fmt::Debug for Function2<T1, T2, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function2")
            .field("arity", &Self::ARITY)
            .field("memoized", &self.is_memoized())
            .finish_non_exhaustive()
    }
}
