use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use super::{FieldInfo, InvokeError, MethodInfo, TypeInfo};
use crate::value::Value;

/// Reflection metadata for a class or struct type: name-keyed tables of
/// its reflected fields and methods.
///
/// The record exclusively owns its member descriptors. Adding a member
/// under an already-used name replaces, and thereby drops, the previous
/// descriptor.
#[derive(Debug)]
pub struct ClassInfo {
    info: TypeInfo,
    fields: HashMap<String, FieldInfo>,
    methods: HashMap<String, MethodInfo>,
}

impl ClassInfo {
    /// Creates empty metadata for the class type `T`.
    pub fn of<T: Any>(name: &str) -> Self {
        Self {
            info: TypeInfo::of::<T>(name),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Inserts a field descriptor, keyed by its own name.
    pub fn add_field(&mut self, field: FieldInfo) -> &mut Self {
        self.fields.insert(field.name().to_owned(), field);
        self
    }

    /// Inserts a method descriptor, keyed by its own name.
    pub fn add_method(&mut self, method: MethodInfo) -> &mut Self {
        self.methods.insert(method.name().to_owned(), method);
        self
    }

    /// Removes the named field descriptor; no-op when absent.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldInfo> {
        self.fields.remove(name)
    }

    /// Removes the named method descriptor; no-op when absent.
    pub fn remove_method(&mut self, name: &str) -> Option<MethodInfo> {
        self.methods.remove(name)
    }

    /// Attempts to find a field descriptor with a specific name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Attempts to find a method descriptor with a specific name.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(name)
    }

    /// Read-only view of the field table.
    pub fn fields(&self) -> &HashMap<String, FieldInfo> {
        &self.fields
    }

    /// Read-only view of the method table.
    pub fn methods(&self) -> &HashMap<String, MethodInfo> {
        &self.methods
    }

    /// Borrows the value of the named field out of `obj`.
    ///
    /// `None` covers an unknown field name, a field type other than `T`,
    /// and `obj` not being an instance of this class.
    pub fn field_value<'o, T: Any>(&self, obj: &'o dyn Any, name: &str) -> Option<&'o T> {
        self.field(name)?.value_of(obj)
    }

    /// Returns a copy of the named field, or `T::default()` when the
    /// lookup misses.
    ///
    /// This is a soft-miss convenience: the result cannot distinguish
    /// "the field holds the default" from "the field does not exist".
    /// Use [`ClassInfo::field_value`] when that distinction matters.
    pub fn field_value_or_default<T>(&self, obj: &dyn Any, name: &str) -> T
    where
        T: Any + Clone + Default,
    {
        self.field_value::<T>(obj, name).cloned().unwrap_or_default()
    }

    /// Overwrites the named field in `obj`.
    ///
    /// Returns `false`, leaving `obj` untouched, when the lookup misses
    /// or the types do not match.
    pub fn set_field_value<T: Any>(&self, obj: &mut dyn Any, name: &str, value: T) -> bool {
        match self.field(name) {
            Some(field) => field.set_value(obj, value),
            None => false,
        }
    }

    /// Invokes the named method against `obj`.
    ///
    /// Shorthand for [`ClassInfo::method`] followed by
    /// [`MethodInfo::invoke`]; an unknown name reports
    /// [`InvokeError::UnknownMethod`].
    pub fn invoke(
        &self,
        obj: &mut dyn Any,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, InvokeError> {
        match self.method(name) {
            Some(method) => method.invoke(obj, args),
            None => Err(InvokeError::UnknownMethod(name.to_owned())),
        }
    }

    /// Gets the display name of the class type.
    #[inline]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// Gets the opaque identity of the class type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.id()
    }

    /// Gets the size of the class type in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.info.size()
    }

    /// Gets the common metadata record.
    #[inline]
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// Checks if `T` matches the described class type.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.info.is::<T>()
    }
}
