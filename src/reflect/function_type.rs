//! Parameter and return types of function values.

use std::fmt;

use super::TypeDescriptor;

/// The type of a function value with `N` parameters.
///
/// Built from the function's type parameters, so it always reports the exact
/// declared types.
///
/// # Examples
///
/// ```rust
/// use lambda2::reflect::{FunctionType, TypeDescriptor};
///
/// let function_type = FunctionType::binary::<i32, String, bool>();
///
/// assert_eq!(function_type.arity(), 2);
/// assert_eq!(function_type.parameter_type1(), TypeDescriptor::of::<i32>());
/// assert_eq!(function_type.parameter_type2(), TypeDescriptor::of::<String>());
/// assert_eq!(function_type.return_type(), TypeDescriptor::of::<bool>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionType<const N: usize> {
    parameter_types: [TypeDescriptor; N],
    return_type: TypeDescriptor,
}

/// The type of a [`Function1`](crate::function::Function1).
pub type Function1Type = FunctionType<1>;

/// The type of a [`Function2`](crate::function::Function2).
pub type Function2Type = FunctionType<2>;

impl<const N: usize> FunctionType<N> {
    /// Creates a function type from its parts.
    #[inline]
    pub const fn new(parameter_types: [TypeDescriptor; N], return_type: TypeDescriptor) -> Self {
        Self {
            parameter_types,
            return_type,
        }
    }

    /// Returns the parameter types in declaration order.
    #[inline]
    pub const fn parameter_types(&self) -> &[TypeDescriptor; N] {
        &self.parameter_types
    }

    /// Returns the return type.
    #[inline]
    pub const fn return_type(&self) -> TypeDescriptor {
        self.return_type
    }

    /// Returns the number of parameters.
    #[inline]
    pub const fn arity(&self) -> usize {
        N
    }
}

impl FunctionType<1> {
    /// The type of a function from `T` to `R`.
    pub fn unary<T: ?Sized + 'static, R: ?Sized + 'static>() -> Self {
        Self::new([TypeDescriptor::of::<T>()], TypeDescriptor::of::<R>())
    }

    /// Returns the parameter type.
    #[inline]
    pub const fn parameter_type(&self) -> TypeDescriptor {
        self.parameter_types[0]
    }
}

impl FunctionType<2> {
    /// The type of a function from `T1` and `T2` to `R`.
    pub fn binary<T1: ?Sized + 'static, T2: ?Sized + 'static, R: ?Sized + 'static>() -> Self {
        Self::new(
            [TypeDescriptor::of::<T1>(), TypeDescriptor::of::<T2>()],
            TypeDescriptor::of::<R>(),
        )
    }

    /// Returns the type of the first parameter.
    #[inline]
    pub const fn parameter_type1(&self) -> TypeDescriptor {
        self.parameter_types[0]
    }

    /// Returns the type of the second parameter.
    #[inline]
    pub const fn parameter_type2(&self) -> TypeDescriptor {
        self.parameter_types[1]
    }
}

impl<const N: usize> fmt::Display for FunctionType<N> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("(")?;
        for (index, parameter_type) in self.parameter_types.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{parameter_type}")?;
        }
        write!(formatter, ") -> {}", self.return_type)
    }
}
