//! Metadata records for reflected types and their members.

use std::{
    any::{Any, TypeId},
    mem,
};

use mira_utils::hash::djb2;

mod class;
mod r#enum;
mod field;
mod method;

pub use class::ClassInfo;
pub use field::FieldInfo;
pub use method::{BoundMethod, InvokeError, MethodInfo};
pub use r#enum::EnumInfo;

#[doc(hidden)]
pub use method::{ByMut, ByRef};

/// Metadata shared by every reflected type and member: a display name,
/// the hash of that name, the opaque type identity, and the byte size
/// of the described type.
///
/// Records are created once during registration and immutable after
/// construction.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    name: String,
    hash: u32,
    id: TypeId,
    size: usize,
}

impl TypeInfo {
    /// Creates metadata describing `T` under the given display name.
    pub fn of<T: Any>(name: &str) -> Self {
        Self {
            hash: djb2(name),
            name: name.to_owned(),
            id: TypeId::of::<T>(),
            size: mem::size_of::<T>(),
        }
    }

    /// Gets the display name of the type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the hash of the type's display name.
    #[inline]
    pub fn name_hash(&self) -> u32 {
        self.hash
    }

    /// Gets the opaque identity of the type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the size of the type in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks if the type `T` matches the described type.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}
