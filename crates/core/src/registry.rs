//! Type registry adapter
//!
//! Resolves a value's runtime type to its stable dotted name and a dotted name
//! back to the registered type. The catalog is authoritative; the name cache is
//! a derived index that is built lazily by walking the catalog.
//!
//! ## Cache Policy
//!
//! ```text
//! name_of(key)
//!   1. hit in name cache          -> name
//!   2. miss: rebuild cache once   -> retry
//!   3. still missing              -> Error::Lookup
//! ```
//!
//! Rebuilds only add entries, so repeated misses never disturb names that
//! were cached before. This tolerates types registered after the cache was
//! first populated.

use crate::catalog::{TypeCatalog, TypeEntry, TypeKey};
use crate::error::{Error, Result};
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Context object owning the catalog and its name cache.
///
/// Converters hold a registry by `Arc`; tests create their own to avoid
/// sharing state.
#[derive(Debug, Default)]
pub struct Registry {
    catalog: RwLock<TypeCatalog>,
    names: RwLock<HashMap<TypeKey, Arc<str>>>,
    rebuilds: AtomicUsize,
}

impl Registry {
    /// Create a registry with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry over an already populated catalog
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        Registry {
            catalog: RwLock::new(catalog),
            ..Self::default()
        }
    }

    /// Register types.
    ///
    /// ```
    /// use ice_plain_core::{FieldDef, Registry};
    ///
    /// let registry = Registry::new();
    /// let key = registry
    ///     .define(|c| c.define_struct("Demo.Point", [FieldDef::new("x", 0)]))
    ///     .unwrap();
    /// assert_eq!(&*registry.name_of(key).unwrap(), "Demo.Point");
    /// ```
    pub fn define<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TypeCatalog) -> Result<T>,
    {
        let mut catalog = self.catalog.write();
        f(&mut catalog)
    }

    /// Catalog entry of a runtime type
    pub fn entry(&self, key: TypeKey) -> Result<Arc<TypeEntry>> {
        self.catalog
            .read()
            .entry(key)
            .cloned()
            .ok_or_else(|| Error::Lookup(format!("no registered type for {key}")))
    }

    /// Stable dotted name of a runtime type.
    pub fn name_of(&self, key: TypeKey) -> Result<Arc<str>> {
        let cached = self.names.read().get(&key).cloned();
        if let Some(name) = cached {
            return Ok(name);
        }

        self.rebuild();

        let retried = self.names.read().get(&key).cloned();
        retried.ok_or_else(|| {
            warn!(%key, "type not found after rebuilding name cache");
            Error::Lookup(format!("could not find type for {key}"))
        })
    }

    /// Stable dotted name of the type of `value`.
    pub fn name_of_value(&self, value: &Value) -> Result<Arc<str>> {
        let key = value.type_key().ok_or_else(|| {
            Error::Lookup(format!("{} has no registered type", value.type_name()))
        })?;
        self.name_of(key)
    }

    /// Registered type for a dotted name, trying marker-prefixed alternates
    /// segment by segment.
    pub fn constructor_of(&self, name: &str) -> Result<Arc<TypeEntry>> {
        self.catalog.read().resolve(name).map_err(|e| {
            warn!(name, "could not resolve type name");
            e
        })
    }

    /// Slice type ids of a type and its bases, most derived first.
    pub fn ice_ids(&self, key: TypeKey) -> Result<Vec<String>> {
        self.catalog.read().ice_ids(key)
    }

    /// Drop the name cache. The next lookup rebuilds it.
    pub fn reset(&self) {
        self.names.write().clear();
        self.rebuilds.store(0, Ordering::Relaxed);
    }

    /// Number of cache rebuilds since creation or the last reset
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.load(Ordering::Relaxed)
    }

    fn rebuild(&self) {
        let mut fresh: HashMap<TypeKey, Arc<str>> = HashMap::new();
        self.catalog.read().walk(&mut |name, entry| {
            fresh.insert(entry.key(), Arc::from(name));
        });

        let count = fresh.len();
        self.names.write().extend(fresh);
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        debug!(types = count, "rebuilt type name cache");
    }
}
