//! Type descriptors and applicability checks for function values.
//!
//! An applicability check answers "could this function be called with these
//! arguments?" from types alone. It never calls the function, so it says
//! nothing about whether the function is *defined* (succeeds) for them.
//!
//! Absent arguments (`None`) are always applicable. Absent *types* are not
//! accepted by the type based checks, which report
//! [`FunctionError::MissingArgument`] instead.

use std::any::Any;

use crate::function::{Function1, Function2, FunctionError};

use super::{Function1Type, Function2Type, FunctionType, TypeDescriptor};

fn accepts(parameter_type: TypeDescriptor, argument: Option<&dyn Any>) -> bool {
    argument.is_none_or(|value| parameter_type.is_instance(value))
}

impl<T: 'static, R: 'static> Function1<T, R> {
    /// Returns the parameter and return types of this function.
    #[inline]
    pub fn function_type(&self) -> Function1Type {
        FunctionType::unary::<T, R>()
    }

    /// Checks whether this function accepts `argument`.
    ///
    /// `None` is always accepted.
    pub fn is_applicable_to(&self, argument: Option<&dyn Any>) -> bool {
        accepts(self.function_type().parameter_type(), argument)
    }

    /// Checks whether this function accepts values of `argument_type`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::MissingArgument`] naming `"type"` if
    /// `argument_type` is `None`.
    pub fn is_applicable_to_type(
        &self,
        argument_type: Option<TypeDescriptor>,
    ) -> Result<bool, FunctionError> {
        let argument_type = argument_type.ok_or(FunctionError::MissingArgument { name: "type" })?;
        Ok(self
            .function_type()
            .parameter_type()
            .is_assignable_from(&argument_type))
    }
}

impl<T1: 'static, T2: 'static, R: 'static> Function2<T1, T2, R> {
    /// Returns the parameter and return types of this function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    /// use lambda2::reflect::TypeDescriptor;
    ///
    /// let repeat = Function2::of(|text: String, times: usize| text.repeat(times));
    /// let function_type = repeat.function_type();
    ///
    /// assert_eq!(function_type.parameter_type1(), TypeDescriptor::of::<String>());
    /// assert_eq!(function_type.parameter_type2(), TypeDescriptor::of::<usize>());
    /// assert_eq!(function_type.return_type(), TypeDescriptor::of::<String>());
    /// ```
    #[inline]
    pub fn function_type(&self) -> Function2Type {
        FunctionType::binary::<T1, T2, R>()
    }

    /// Checks whether this function accepts the given arguments.
    ///
    /// Each argument must be `None` or a value whose runtime type is
    /// assignable to the corresponding parameter type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::Function2;
    /// use std::any::Any;
    ///
    /// let function = Function2::of(|count: i32, label: String| format!("{label}{count}"));
    /// let five: &dyn Any = &5_i32;
    /// let text: &dyn Any = &String::from("x");
    ///
    /// assert!(function.is_applicable_to(Some(five), Some(text)));
    /// assert!(!function.is_applicable_to(Some(five), Some(five)));
    /// assert!(function.is_applicable_to(None, Some(text)));
    /// ```
    pub fn is_applicable_to(&self, first: Option<&dyn Any>, second: Option<&dyn Any>) -> bool {
        let function_type = self.function_type();
        accepts(function_type.parameter_type1(), first)
            && accepts(function_type.parameter_type2(), second)
    }

    /// Checks whether this function accepts values of the given types.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::MissingArgument`] naming `"type1"` or
    /// `"type2"` if either type is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::function::{Function2, FunctionError};
    /// use lambda2::reflect::TypeDescriptor;
    ///
    /// let function = Function2::of(|count: i32, label: String| format!("{label}{count}"));
    /// let integer = TypeDescriptor::of::<i32>();
    /// let string = TypeDescriptor::of::<String>();
    ///
    /// assert_eq!(function.is_applicable_to_types(Some(integer), Some(string)), Ok(true));
    /// assert_eq!(function.is_applicable_to_types(Some(string), Some(integer)), Ok(false));
    /// assert_eq!(
    ///     function.is_applicable_to_types(None, Some(string)),
    ///     Err(FunctionError::MissingArgument { name: "type1" })
    /// );
    /// ```
    pub fn is_applicable_to_types(
        &self,
        first: Option<TypeDescriptor>,
        second: Option<TypeDescriptor>,
    ) -> Result<bool, FunctionError> {
        let first = first.ok_or(FunctionError::MissingArgument { name: "type1" })?;
        let second = second.ok_or(FunctionError::MissingArgument { name: "type2" })?;
        let function_type = self.function_type();
        Ok(function_type.parameter_type1().is_assignable_from(&first)
            && function_type.parameter_type2().is_assignable_from(&second))
    }

    /// Checks whether this function accepts values of types `A` and `B`.
    ///
    /// The statically typed form of
    /// [`is_applicable_to_types`](Self::is_applicable_to_types); types named
    /// this way cannot be absent.
    pub fn is_applicable_to_types_of<A: ?Sized + 'static, B: ?Sized + 'static>(&self) -> bool {
        let function_type = self.function_type();
        function_type
            .parameter_type1()
            .is_assignable_from(&TypeDescriptor::of::<A>())
            && function_type
                .parameter_type2()
                .is_assignable_from(&TypeDescriptor::of::<B>())
    }
}
