//! Function values.
//!
//! This module provides [`Function2`], a value wrapping a two-argument
//! computation, together with [`Function1`], the single-argument value the
//! two-argument algebra produces.
//!
//! # Overview
//!
//! - [`Function2::of`]: wrap a closure or function item
//! - [`Function2::partial`]: fix the first argument
//! - [`Function2::curried`]: one argument at a time
//! - [`Function2::tupled`]: one argument pair
//! - [`Function2::reversed`]: swap argument order
//! - [`Function2::and_then`]: post-composition
//! - [`Function2::lift`]: turn a fallible function into an `Option`-returning one
//!
//! Memoization lives in [`crate::memoize`], type descriptors and applicability
//! checks in [`crate::reflect`].
//!
//! # Examples
//!
//! ```rust
//! use lambda2::function::Function2;
//!
//! let add = Function2::of(|first: i32, second: i32| first + second);
//! let add_then_double = add.and_then(|sum| sum * 2);
//!
//! assert_eq!(add.curried().apply(2).apply(3), 5);
//! assert_eq!(add_then_double.apply(2, 3), 10);
//! assert_eq!(add.reversed().apply(3, 2), add.apply(2, 3));
//! ```

mod error;
mod function1;
mod function2;

pub use error::FunctionError;
pub use function1::Function1;
pub use function2::Function2;

static_assertions::assert_impl_all!(Function1<String, Vec<u8>>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Function2<String, i32, Vec<u8>>: Send, Sync, Clone);
