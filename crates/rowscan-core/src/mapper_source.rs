mod builder;

pub use builder::Builder;

use crate::descriptor::{Descriptor, Walk};
use crate::reflect::{Reflect, Shape};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Maps a Rust field identifier to its default column name.
pub type NameMapper = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Configuration for struct traversal, plus the cache of descriptors it has
/// produced.
///
/// Descriptors are keyed by destination type. A miss computes the descriptor
/// without holding the lock, so concurrent misses on one type may each do the
/// work; the last insert wins, and every insert is equal.
pub struct MapperSource {
    tag_key: String,
    separator: String,
    name_mapper: NameMapper,
    scannable: Vec<String>,
    max_depth: usize,
    cache: RwLock<HashMap<TypeId, Arc<Descriptor>>>,
}

impl MapperSource {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The process-wide source with default settings.
    pub fn global() -> Arc<MapperSource> {
        static GLOBAL: OnceLock<Arc<MapperSource>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(MapperSource::default()))
            .clone()
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_scannable(&self, capability: &str) -> bool {
        self.scannable.iter().any(|marker| marker == capability)
    }

    pub(crate) fn map_name(&self, ident: &str) -> String {
        (self.name_mapper)(ident)
    }

    pub(crate) fn join(&self, prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}{}{name}", self.separator)
        }
    }

    /// Returns the descriptor for `T`, computing it on first use.
    pub fn descriptor<T: Reflect>(&self) -> Arc<Descriptor> {
        self.descriptor_for(&T::shape())
    }

    pub fn descriptor_for(&self, shape: &Shape) -> Arc<Descriptor> {
        if let Some(descriptor) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&shape.type_id)
        {
            return descriptor.clone();
        }

        let descriptor = Arc::new(Walk::new(self).run(shape));

        tracing::debug!(
            type_name = shape.type_name,
            leaves = descriptor.len(),
            "computed type descriptor"
        );

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(shape.type_id, descriptor.clone());

        descriptor
    }
}

impl Default for MapperSource {
    fn default() -> MapperSource {
        Builder::default().finish()
    }
}

impl core::fmt::Debug for MapperSource {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("MapperSource")
            .field("tag_key", &self.tag_key)
            .field("separator", &self.separator)
            .field("scannable", &self.scannable)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
