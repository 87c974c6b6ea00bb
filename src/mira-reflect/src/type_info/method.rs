use std::{
    any::{self, Any, TypeId},
    fmt,
};

use thiserror::Error;
use tracing::warn;

use super::TypeInfo;
use crate::value::Value;

/// Failure modes of a reflective invocation.
///
/// Shape mismatches fail closed: when the argument list does not match
/// the captured signature, the underlying function is never called.
/// Panics raised *by* the underlying function are not caught and
/// propagate to the caller of [`MethodInfo::invoke`] unchanged.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The argument count differs from the captured signature's arity.
    #[error("expected {expected} argument(s), found {found}")]
    Arity {
        /// Arity of the captured signature.
        expected: usize,
        /// Number of arguments supplied by the caller.
        found: usize,
    },
    /// An argument could not be cast to its positional parameter type.
    #[error("argument {index} is `{found}`, expected `{expected}`")]
    Argument {
        /// Zero-based position of the offending argument.
        index: usize,
        /// Display name of the expected parameter type.
        expected: &'static str,
        /// Display name of the type that was actually supplied.
        found: &'static str,
    },
    /// The receiver is not an instance of the method's class.
    #[error("receiver is not an instance of `{expected}`")]
    Receiver {
        /// Display name of the expected class.
        expected: &'static str,
    },
    /// No method is registered under the requested name.
    #[error("no method named `{0}`")]
    UnknownMethod(String),
}

/// The uniform dispatch signature every bound method is erased to.
type ErasedFn = Box<dyn Fn(&mut dyn Any, Vec<Value>) -> Result<Value, InvokeError> + Send + Sync>;

/// A callable that can be bound as a reflected method of the class `C`.
///
/// Implemented for `Fn(&C, ...) -> R` and `Fn(&mut C, ...) -> R` with up
/// to eight parameters, each parameter and the return type being `Any`.
/// The `Marker` parameter only disambiguates the two receiver modes for
/// type inference and never needs to be named.
pub trait BoundMethod<C, Marker>: Send + Sync + 'static {
    /// Gets the number of parameters after the receiver.
    fn arity(&self) -> usize;

    /// Gets the display names of the parameter types, in positional
    /// order.
    fn param_types(&self) -> Vec<&'static str>;

    /// Erases the callable into the uniform dispatch signature.
    fn erase(self) -> ErasedFn;
}

#[doc(hidden)]
pub enum ByRef {}

#[doc(hidden)]
pub enum ByMut {}

macro_rules! impl_bound_method {
    ($count:literal $(, $A:ident : $idx:tt)*) => {
        impl<C, R, F $(, $A)*> BoundMethod<C, (ByRef, R $(, $A)*)> for F
        where
            C: Any,
            R: Any,
            F: Fn(&C $(, $A)*) -> R + Send + Sync + 'static,
            $($A: Any,)*
        {
            fn arity(&self) -> usize {
                $count
            }

            fn param_types(&self) -> Vec<&'static str> {
                vec![$(any::type_name::<$A>()),*]
            }

            #[allow(non_snake_case)]
            fn erase(self) -> ErasedFn {
                Box::new(move |obj, params| {
                    let receiver = obj.downcast_mut::<C>().ok_or(InvokeError::Receiver {
                        expected: any::type_name::<C>(),
                    })?;

                    if params.len() != $count {
                        return Err(InvokeError::Arity {
                            expected: $count,
                            found: params.len(),
                        });
                    }

                    #[allow(unused_mut, unused_variables)]
                    let mut params = params.into_iter();
                    $(
                        let $A: $A = match params.next() {
                            Some(param) => param.take().map_err(|param| InvokeError::Argument {
                                index: $idx,
                                expected: any::type_name::<$A>(),
                                found: param.type_name(),
                            })?,
                            None => {
                                return Err(InvokeError::Arity {
                                    expected: $count,
                                    found: $idx,
                                })
                            }
                        };
                    )*

                    Ok(Value::wrap(self(&*receiver $(, $A)*)))
                })
            }
        }

        impl<C, R, F $(, $A)*> BoundMethod<C, (ByMut, R $(, $A)*)> for F
        where
            C: Any,
            R: Any,
            F: Fn(&mut C $(, $A)*) -> R + Send + Sync + 'static,
            $($A: Any,)*
        {
            fn arity(&self) -> usize {
                $count
            }

            fn param_types(&self) -> Vec<&'static str> {
                vec![$(any::type_name::<$A>()),*]
            }

            #[allow(non_snake_case)]
            fn erase(self) -> ErasedFn {
                Box::new(move |obj, params| {
                    let receiver = obj.downcast_mut::<C>().ok_or(InvokeError::Receiver {
                        expected: any::type_name::<C>(),
                    })?;

                    if params.len() != $count {
                        return Err(InvokeError::Arity {
                            expected: $count,
                            found: params.len(),
                        });
                    }

                    #[allow(unused_mut, unused_variables)]
                    let mut params = params.into_iter();
                    $(
                        let $A: $A = match params.next() {
                            Some(param) => param.take().map_err(|param| InvokeError::Argument {
                                index: $idx,
                                expected: any::type_name::<$A>(),
                                found: param.type_name(),
                            })?,
                            None => {
                                return Err(InvokeError::Arity {
                                    expected: $count,
                                    found: $idx,
                                })
                            }
                        };
                    )*

                    Ok(Value::wrap(self(receiver $(, $A)*)))
                })
            }
        }
    };
}

impl_bound_method!(0);
impl_bound_method!(1, A0:0);
impl_bound_method!(2, A0:0, A1:1);
impl_bound_method!(3, A0:0, A1:1, A2:2);
impl_bound_method!(4, A0:0, A1:1, A2:2, A3:3);
impl_bound_method!(5, A0:0, A1:1, A2:2, A3:3, A4:4);
impl_bound_method!(6, A0:0, A1:1, A2:2, A3:3, A4:4, A5:5);
impl_bound_method!(7, A0:0, A1:1, A2:2, A3:3, A4:4, A5:5, A6:6);
impl_bound_method!(8, A0:0, A1:1, A2:2, A3:3, A4:4, A5:5, A6:6, A7:7);

/// Reflection metadata for one member function.
///
/// Construction captures the strongly-typed function together with its
/// arity and parameter type names, and synthesizes a dispatch closure of
/// the fixed shape `(receiver, arguments) -> result`. At call time the
/// closure validates the argument list's shape, down-casts each argument
/// at its position, calls through to the captured function, and wraps
/// the result back into an opaque [`Value`].
pub struct MethodInfo {
    // Identity and size describe the captured function type.
    info: TypeInfo,
    arity: usize,
    param_types: Vec<&'static str>,
    erased: ErasedFn,
}

impl MethodInfo {
    /// Captures `method` under the given display name.
    ///
    /// Accepts plain functions and non-capturing closures whose first
    /// parameter is the receiver, e.g.
    /// `MethodInfo::new("sum", Point::sum)`.
    pub fn new<C, M, F>(name: &str, method: F) -> Self
    where
        C: Any,
        F: BoundMethod<C, M>,
    {
        Self {
            info: TypeInfo::of::<F>(name),
            arity: method.arity(),
            param_types: method.param_types(),
            erased: method.erase(),
        }
    }

    /// Gets the number of parameters after the receiver.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Gets the display names of the parameter types, in positional
    /// order.
    #[inline]
    pub fn param_types(&self) -> &[&'static str] {
        &self.param_types
    }

    /// Dispatches the captured function against `obj`.
    ///
    /// The argument list is validated before anything runs: an arity
    /// mismatch or a positional type mismatch refuses the call and
    /// reports which check failed. Side effects of the underlying
    /// function, including any panics, are the caller's to observe.
    pub fn invoke(&self, obj: &mut dyn Any, args: Vec<Value>) -> Result<Value, InvokeError> {
        if args.len() != self.arity {
            warn!(
                method = self.info.name(),
                expected = self.arity,
                found = args.len(),
                "refusing invocation with mismatched argument count"
            );
            return Err(InvokeError::Arity {
                expected: self.arity,
                found: args.len(),
            });
        }

        (self.erased)(obj, args)
    }

    /// Gets the display name of the method.
    #[inline]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// Gets the opaque identity of the captured function type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.id()
    }

    /// Gets the common metadata record.
    #[inline]
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.info.name())
            .field("arity", &self.arity)
            .field("param_types", &self.param_types)
            .finish_non_exhaustive()
    }
}
