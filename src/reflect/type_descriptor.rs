//! Runtime descriptions of Rust types.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// A runtime description of a `'static` Rust type.
///
/// A descriptor pairs the type's [`TypeId`] with its name. Two descriptors are
/// equal iff they describe the same type; the name takes no part in equality.
///
/// Rust has no subtyping between value types, so assignability is identity,
/// with one exception: a *dynamic* descriptor (`dyn Any`, optionally
/// `+ Send` / `+ Send + Sync`, and `Box`, `Rc` or `Arc` of those) describes a
/// type every value can be stored as, and is assignable from everything.
///
/// # Examples
///
/// ```rust
/// use lambda2::reflect::TypeDescriptor;
/// use std::any::Any;
///
/// let integer = TypeDescriptor::of::<i32>();
/// let anything = TypeDescriptor::of::<Box<dyn Any>>();
///
/// assert!(integer.is_assignable_from(&TypeDescriptor::of::<i32>()));
/// assert!(!integer.is_assignable_from(&TypeDescriptor::of::<i64>()));
/// assert!(anything.is_assignable_from(&integer));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    dynamic: bool,
}

impl TypeDescriptor {
    /// Describes the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();
        Self {
            id,
            name: type_name::<T>(),
            dynamic: dynamic_type_ids().contains(&id),
        }
    }

    /// Describes the static type of `value`.
    pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the name of the described type, as given by
    /// [`std::any::type_name`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if every value is assignable to the described type.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns `true` if values of type `other` may be used where this type is
    /// declared.
    pub fn is_assignable_from(&self, other: &Self) -> bool {
        self.dynamic || self.id == other.id
    }

    /// Returns `true` if the runtime type of `value` may be used where this
    /// type is declared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambda2::reflect::TypeDescriptor;
    /// use std::any::Any;
    ///
    /// let text: &dyn Any = &String::from("x");
    ///
    /// assert!(TypeDescriptor::of::<String>().is_instance(text));
    /// assert!(!TypeDescriptor::of::<&str>().is_instance(text));
    /// ```
    pub fn is_instance(&self, value: &dyn Any) -> bool {
        self.dynamic || value.type_id() == self.id
    }
}

fn dynamic_type_ids() -> [TypeId; 12] {
    [
        TypeId::of::<dyn Any>(),
        TypeId::of::<dyn Any + Send>(),
        TypeId::of::<dyn Any + Send + Sync>(),
        TypeId::of::<Box<dyn Any>>(),
        TypeId::of::<Box<dyn Any + Send>>(),
        TypeId::of::<Box<dyn Any + Send + Sync>>(),
        TypeId::of::<Rc<dyn Any>>(),
        TypeId::of::<Rc<dyn Any + Send>>(),
        TypeId::of::<Rc<dyn Any + Send + Sync>>(),
        TypeId::of::<Arc<dyn Any>>(),
        TypeId::of::<Arc<dyn Any + Send>>(),
        TypeId::of::<Arc<dyn Any + Send + Sync>>(),
    ]
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}
