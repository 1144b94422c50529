//! Reflective type information for function values.
//!
//! - [`TypeDescriptor`]: a runtime description of one type
//! - [`FunctionType`]: the parameter and return types of a function value
//!
//! Function values gain `function_type`, `is_applicable_to` and
//! `is_applicable_to_types` methods from this module.
//!
//! # Examples
//!
//! ```rust
//! use lambda2::function::Function2;
//!
//! let add = Function2::of(|first: i32, second: i32| first + second);
//!
//! assert_eq!(add.function_type().to_string(), "(i32, i32) -> i32");
//! assert!(add.is_applicable_to_types_of::<i32, i32>());
//! assert!(!add.is_applicable_to_types_of::<i64, i32>());
//! ```

mod applicability;
mod function_type;
mod type_descriptor;

pub use function_type::{Function1Type, Function2Type, FunctionType};
pub use type_descriptor::TypeDescriptor;
