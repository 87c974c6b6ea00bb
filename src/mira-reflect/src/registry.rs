//! The process-wide store of reflection metadata.

use std::{
    any::{Any, TypeId},
    sync::OnceLock,
};

use mira_utils::ahash::AHashMap;
use tracing::{debug, warn};

use crate::type_info::{ClassInfo, EnumInfo};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The store that owns all reflection metadata.
///
/// A registry passes through two phases. While owned, or borrowed
/// mutably, it is in its *build* phase: registration entry points add
/// and remove metadata freely and no concurrent readers can exist.
/// [`Registry::install`] ends the build phase by moving the registry
/// into process-wide storage; from then on it is read-only and any
/// number of threads may look metadata up through [`Registry::global`].
///
/// Lookups hand out borrows of registry-owned records. Each [`ClassInfo`]
/// in turn exclusively owns its member descriptors, so removing a type
/// drops its entire metadata subtree.
#[derive(Debug, Default)]
pub struct Registry {
    enums: AHashMap<TypeId, EnumInfo>,
    classes: AHashMap<TypeId, ClassInfo>,
}

impl Registry {
    /// Creates an empty registry in its build phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers enum metadata, keyed by the record's own identity.
    ///
    /// An existing record under the same identity is displaced and
    /// handed back to the caller.
    pub fn register_enum(&mut self, info: EnumInfo) -> Option<EnumInfo> {
        debug!(name = info.name(), "registering enum metadata");
        let displaced = self.enums.insert(info.type_id(), info);
        if let Some(old) = &displaced {
            warn!(name = old.name(), "replaced previously registered enum");
        }
        displaced
    }

    /// Registers class metadata, keyed by the record's own identity.
    ///
    /// An existing record under the same identity is displaced and
    /// handed back to the caller.
    pub fn register_class(&mut self, info: ClassInfo) -> Option<ClassInfo> {
        debug!(name = info.name(), "registering class metadata");
        let displaced = self.classes.insert(info.type_id(), info);
        if let Some(old) = &displaced {
            warn!(name = old.name(), "replaced previously registered class");
        }
        displaced
    }

    /// Removes the enum metadata registered under `id`; no-op when
    /// absent.
    pub fn remove_enum(&mut self, id: TypeId) -> Option<EnumInfo> {
        let removed = self.enums.remove(&id);
        if let Some(info) = &removed {
            debug!(name = info.name(), "removed enum metadata");
        }
        removed
    }

    /// Removes the class metadata registered under `id`, dropping all of
    /// its member descriptors; no-op when absent.
    pub fn remove_class(&mut self, id: TypeId) -> Option<ClassInfo> {
        let removed = self.classes.remove(&id);
        if let Some(info) = &removed {
            debug!(name = info.name(), "removed class metadata");
        }
        removed
    }

    /// Gets the enum metadata registered under `id`.
    pub fn enum_info(&self, id: TypeId) -> Option<&EnumInfo> {
        self.enums.get(&id)
    }

    /// Gets the class metadata registered under `id`.
    pub fn class_info(&self, id: TypeId) -> Option<&ClassInfo> {
        self.classes.get(&id)
    }

    /// Gets the enum metadata for `T`.
    pub fn enum_of<T: Any>(&self) -> Option<&EnumInfo> {
        self.enum_info(TypeId::of::<T>())
    }

    /// Gets the class metadata for `T`.
    pub fn class_of<T: Any>(&self) -> Option<&ClassInfo> {
        self.class_info(TypeId::of::<T>())
    }

    /// Finds enum metadata by display name.
    ///
    /// This scans every registered enum and is the documented slow path;
    /// prefer the identity-keyed lookups where possible.
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumInfo> {
        self.enums.values().find(|info| info.name() == name)
    }

    /// Finds class metadata by display name.
    ///
    /// This scans every registered class and is the documented slow
    /// path; prefer the identity-keyed lookups where possible.
    pub fn class_by_name(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.values().find(|info| info.name() == name)
    }

    /// Iterates over all registered enum metadata, in no defined order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumInfo> {
        self.enums.values()
    }

    /// Iterates over all registered class metadata, in no defined order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    /// Gets the number of registered enums.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Gets the number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Gets the enum metadata for `T`, registering an empty record under
    /// `name` first when none exists.
    ///
    /// Entry points may run more than once when several call sites
    /// trigger them during startup; routing them through this helper
    /// guarantees at most one metadata record per type identity.
    pub fn enum_entry<T: Any>(&mut self, name: &str) -> &mut EnumInfo {
        self.enums
            .entry(TypeId::of::<T>())
            .or_insert_with(|| EnumInfo::of::<T>(name))
    }

    /// Gets the class metadata for `T`, registering an empty record
    /// under `name` first when none exists.
    ///
    /// Same idempotence contract as [`Registry::enum_entry`].
    pub fn class_entry<T: Any>(&mut self, name: &str) -> &mut ClassInfo {
        self.classes
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ClassInfo::of::<T>(name))
    }

    /// Seals the registry into process-wide storage, ending its build
    /// phase.
    ///
    /// On success, every thread may read the registry through
    /// [`Registry::global`] for the remaining process lifetime; there is
    /// no teardown. When a registry was installed already, `self` is
    /// handed back unchanged in the error variant.
    pub fn install(self) -> Result<&'static Registry, Registry> {
        match GLOBAL.set(self) {
            Ok(()) => {
                debug!("reflection registry installed");
                // `set` succeeded, so the cell is populated.
                Ok(GLOBAL.get().expect("cell was just populated"))
            }
            Err(rejected) => Err(rejected),
        }
    }

    /// Gets the installed registry, if [`Registry::install`] has run.
    pub fn global() -> Option<&'static Registry> {
        GLOBAL.get()
    }
}
