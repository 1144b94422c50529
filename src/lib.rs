//! # lambda2
//!
//! Typed two-argument function values.
//!
//! ## Overview
//!
//! A [`Function2<T1, T2, R>`](function::Function2) wraps a computation of two
//! arguments so it can be stored, cloned, shared between threads and
//! transformed:
//!
//! - **Transformation algebra**: partial application, currying, tupling,
//!   argument reversal, post-composition, lifting fallible functions into
//!   `Option`-returning ones
//! - **Reflection**: exact parameter and return types, applicability checks
//! - **Memoization**: a thread-safe cache computing each argument pair at most
//!   once
//!
//! ## Feature Flags
//!
//! - `function`: `Function1`, `Function2` and `FunctionError`
//! - `reflect`: type descriptors and applicability checks
//! - `memoize`: memoization caches
//! - `fxhash` / `ahash`: cache hasher
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambda2::prelude::*;
//!
//! let add = Function2::of(|first: i32, second: i32| first + second);
//!
//! assert_eq!(add.curried().apply(2).apply(3), 5);
//!
//! let memoized = add.memoized();
//! assert_eq!(memoized.apply(2, 3), 5);
//! assert!(memoized.is_memoized());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use lambda2::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "function")]
    pub use crate::function::*;

    #[cfg(feature = "reflect")]
    pub use crate::reflect::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;
}

#[cfg(feature = "function")]
pub mod function;

#[cfg(feature = "reflect")]
pub mod reflect;

#[cfg(feature = "memoize")]
pub mod memoize;
