use std::any::{self, Any, TypeId};

use super::TypeInfo;

/// Descriptor for one reflected field of a class.
///
/// A field is described by the byte offset of its storage within the
/// owning object, the size and identity of its storage type, and the
/// identity of the owning class. All of it is recorded at construction;
/// no pointer-to-member arithmetic happens at access time beyond a
/// single offset addition.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    // Describes the field's storage type, named after the field.
    info: TypeInfo,
    owner: TypeId,
    owner_name: &'static str,
    offset: usize,
}

impl FieldInfo {
    /// Creates a descriptor from a recorded field offset.
    ///
    /// Prefer the [`field_info!`][crate::field_info] macro, which infers
    /// the field type and computes the offset with
    /// [`offset_of!`][core::mem::offset_of] so the descriptor cannot
    /// disagree with the actual layout.
    ///
    /// # Safety
    ///
    /// - `T` must be the declared type of the field and `offset` its byte
    ///   offset within `C` under the current compilation's layout.
    ///
    /// - repr(Rust) types have no layout stability guarantees, so the
    ///   offset must come from the same build that object instances are
    ///   accessed in, never from a recorded constant.
    pub unsafe fn from_raw_parts<C: Any, T: Any>(name: &str, offset: usize) -> Self {
        Self {
            info: TypeInfo::of::<T>(name),
            owner: TypeId::of::<C>(),
            owner_name: any::type_name::<C>(),
            offset,
        }
    }

    /// Gets the byte offset of the field from the start of its owning
    /// object.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the opaque identity of the owning class.
    #[inline]
    pub fn owner(&self) -> TypeId {
        self.owner
    }

    /// Gets the display name of the owning class.
    #[inline]
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    /// Borrows the field's value out of `obj`.
    ///
    /// Returns `None` when `obj` is not an instance of the owning class
    /// or when `T` is not the field's declared type; both checks happen
    /// before any memory is touched.
    pub fn value_of<'o, T: Any>(&self, obj: &'o dyn Any) -> Option<&'o T> {
        if obj.type_id() != self.owner || !self.info.is::<T>() {
            return None;
        }

        // SAFETY: `obj` is an instance of the owning class and `T` is the
        // declared field type, so `offset` lands on a live, aligned `T`
        // inside the object (constructor invariant). The borrow inherits
        // the lifetime of `obj`.
        unsafe { Some(self.get_unchecked((obj as *const dyn Any).cast())) }
    }

    /// Mutably borrows the field's value out of `obj`.
    ///
    /// Same contract as [`FieldInfo::value_of`].
    pub fn value_of_mut<'o, T: Any>(&self, obj: &'o mut dyn Any) -> Option<&'o mut T> {
        if (*obj).type_id() != self.owner || !self.info.is::<T>() {
            return None;
        }

        // SAFETY: See `value_of`; `obj` is borrowed mutably for `'o`.
        unsafe { Some(self.get_unchecked_mut((obj as *mut dyn Any).cast())) }
    }

    /// Overwrites the field's value in `obj`.
    ///
    /// Returns `false`, leaving `obj` untouched, on an owner or field
    /// type mismatch.
    pub fn set_value<T: Any>(&self, obj: &mut dyn Any, value: T) -> bool {
        match self.value_of_mut::<T>(obj) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Reinterprets the storage at `obj + offset` as a `T`, without any
    /// checking.
    ///
    /// # Safety
    ///
    /// - `obj` must point to a live, aligned instance of exactly the
    ///   class this descriptor was constructed for.
    ///
    /// - `T` must be the field's declared type.
    ///
    /// - The object behind `obj` must not be mutably borrowed while the
    ///   returned reference lives, and `'o` must be inferred to not
    ///   outlive it.
    pub unsafe fn get_unchecked<'o, T>(&self, obj: *const ()) -> &'o T {
        // SAFETY: The caller guarantees `obj + offset` is a live `T`.
        unsafe { &*obj.cast::<u8>().add(self.offset).cast::<T>() }
    }

    /// Reinterprets the storage at `obj + offset` as a mutable `T`,
    /// without any checking.
    ///
    /// # Safety
    ///
    /// Same conditions as [`FieldInfo::get_unchecked`], with `obj` not
    /// borrowed at all while the returned reference lives.
    pub unsafe fn get_unchecked_mut<'o, T>(&self, obj: *mut ()) -> &'o mut T {
        // SAFETY: The caller guarantees `obj + offset` is a live `T`.
        unsafe { &mut *obj.cast::<u8>().add(self.offset).cast::<T>() }
    }

    /// Gets the display name of the field.
    #[inline]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// Gets the opaque identity of the field's storage type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.id()
    }

    /// Gets the size of the field's storage type in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.info.size()
    }

    /// Gets the common metadata record.
    #[inline]
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }
}

/// Builds a [`FieldInfo`] for a named field of a struct.
///
/// The field's type is inferred from the field itself and the offset is
/// computed with [`offset_of!`][core::mem::offset_of], so the resulting
/// descriptor cannot disagree with the actual layout.
///
/// ```
/// use mira_reflect::field_info;
///
/// struct Health {
///     current: u32,
/// }
///
/// let field = field_info!(Health, current);
/// assert_eq!(field.name(), "current");
/// ```
#[macro_export]
macro_rules! field_info {
    ($owner:ty, $field:ident) => {{
        fn build<T: ::core::any::Any>(
            name: &str,
            offset: usize,
            _probe: fn(&$owner) -> &T,
        ) -> $crate::FieldInfo {
            // SAFETY: `offset` comes from `offset_of!` for this exact
            // field, and `T` is inferred from the field itself.
            unsafe { $crate::FieldInfo::from_raw_parts::<$owner, T>(name, offset) }
        }

        build(
            ::core::stringify!($field),
            ::core::mem::offset_of!($owner, $field),
            |owner| &owner.$field,
        )
    }};
}
