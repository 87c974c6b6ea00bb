//! Type-erased values passed into and out of reflective invocations.

use std::{
    any::{self, Any, TypeId},
    fmt,
};

/// A type-erased value.
///
/// `Value` is the uniform currency of reflective calls: arguments are
/// packed into `Value`s before dispatch and results come back as one.
/// The concrete type is recovered at the point of use through checked
/// casts which report a mismatch instead of misinterpreting memory.
///
/// A `Value` either holds a concrete value or is *empty*; the empty
/// state is what invocations of `()`-returning methods produce.
pub struct Value {
    inner: Option<Box<dyn Any>>,
    type_name: &'static str,
}

impl Value {
    /// Erases `value` into an opaque [`Value`].
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Some(Box::new(value)),
            type_name: any::type_name::<T>(),
        }
    }

    /// Creates the explicit "no value" result.
    pub const fn none() -> Self {
        Self {
            inner: None,
            type_name: "()",
        }
    }

    /// Wraps a function's return value, mapping unit to [`Value::none`].
    pub fn wrap<R: Any>(ret: R) -> Self {
        if TypeId::of::<R>() == TypeId::of::<()>() {
            Self::none()
        } else {
            Self::new(ret)
        }
    }

    /// Indicates whether this is the empty value.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.inner.is_none()
    }

    /// Checks if this value is an instance of `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        matches!(&self.inner, Some(value) if value.is::<T>())
    }

    /// Gets the display name of the erased type, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Downcasts the value into the concrete type if it is a `T` underneath.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref()?.downcast_ref()
    }

    /// Downcasts the value into the concrete type if it is a `T` underneath.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_mut()?.downcast_mut()
    }

    /// Consumes `self` and casts it into a concrete `T`, if it is one
    /// underneath.
    ///
    /// When that is not the case, `self` will be returned as-is in the
    /// error variant to re-gain ownership. The empty value fails every
    /// cast, including `take::<()>()`.
    pub fn take<T: Any>(self) -> Result<T, Value> {
        match self.inner {
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(boxed) => Err(Self {
                    inner: Some(boxed),
                    type_name: self.type_name,
                }),
            },
            None => Err(self),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(_) => write!(f, "Value({})", self.type_name),
            None => f.write_str("Value(none)"),
        }
    }
}

/// Packs heterogeneous arguments into the `Vec<Value>` expected by
/// [`MethodInfo::invoke`][crate::MethodInfo::invoke].
///
/// ```
/// use mira_reflect::args;
///
/// let args = args![42_i32, "hello".to_string()];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::new($arg)),+]
    };
}
