use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use super::TypeInfo;

/// Reflection metadata for an enum type: a bidirectional table between
/// variant names and their integral values.
///
/// The two directions are stored as independent maps which are updated
/// together by [`EnumInfo::add_value`]. They stay inverse images of each
/// other as long as no duplicate names or values are registered; see
/// `add_value` for the exact behavior under duplicates.
#[derive(Clone, Debug)]
pub struct EnumInfo {
    info: TypeInfo,
    values: HashMap<String, i64>,
    names: HashMap<i64, String>,
}

impl EnumInfo {
    /// Creates empty metadata for the enum type `T`.
    pub fn of<T: Any>(name: &str) -> Self {
        Self {
            info: TypeInfo::of::<T>(name),
            values: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Creates metadata for `T` pre-populated with the given
    /// name/value pairs.
    pub fn with_values<T: Any>(name: &str, pairs: impl IntoIterator<Item = (&'static str, i64)>) -> Self {
        let mut info = Self::of::<T>(name);
        info.add_values(pairs);
        info
    }

    /// Maps a variant name to its value, in both directions.
    ///
    /// Last write wins in each table independently: re-adding a value
    /// under a different name overwrites the reverse entry while the
    /// previous forward entry stays behind, and re-adding a name with a
    /// different value leaves the old reverse entry stale. Callers that
    /// need a strict bijection must keep their inputs free of duplicates.
    pub fn add_value(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_owned(), value);
        self.names.insert(value, name.to_owned());
    }

    /// Adds multiple name/value pairs, in the iterator's order.
    pub fn add_values(&mut self, pairs: impl IntoIterator<Item = (&'static str, i64)>) {
        for (name, value) in pairs {
            self.add_value(name, value);
        }
    }

    /// Looks up the value registered under a variant name.
    pub fn value_by_name(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Looks up the variant name registered for a value.
    pub fn name_by_value(&self, value: i64) -> Option<&str> {
        self.names.get(&value).map(String::as_str)
    }

    /// Read-only view of the name-to-value table.
    pub fn values(&self) -> &HashMap<String, i64> {
        &self.values
    }

    /// Read-only view of the value-to-name table.
    pub fn names(&self) -> &HashMap<i64, String> {
        &self.names
    }

    /// Gets the number of registered variant names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Indicates whether any variants are registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the display name of the enum type.
    #[inline]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// Gets the opaque identity of the enum type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.id()
    }

    /// Gets the size of the enum type in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.info.size()
    }

    /// Gets the common metadata record.
    #[inline]
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// Checks if `T` matches the described enum type.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.info.is::<T>()
    }
}
