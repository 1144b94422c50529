//! Error types for function values.
//!
//! Almost every operation on a function value is total. The exceptions are the
//! operations whose inputs may be absent: post-composition through
//! [`Function2::try_and_then`](super::Function2::try_and_then) and the type
//! based applicability checks.

/// Represents errors raised by operations on function values.
///
/// # Examples
///
/// ```rust
/// use lambda2::function::FunctionError;
///
/// let error = FunctionError::MissingArgument { name: "after" };
/// assert_eq!(format!("{error}"), "after is missing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FunctionError {
    /// A required argument was absent.
    #[error("{name} is missing")]
    MissingArgument {
        /// The name of the absent argument.
        name: &'static str,
    },
}
