//! Specification repository keyed by model type.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::foundation::{SpecError, SpecResult};
use crate::specification::Specification;

/// Thread-safe repository of specifications, one per model type.
///
/// Specifications are registered at startup and looked up by static type
/// when a model or a nested member is validated. Uses `DashMap` so lookups
/// from concurrent validations never contend on a global lock.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::repository::SpecificationRepository;
///
/// let repository = SpecificationRepository::new();
/// repository.register(address_spec);
/// let spec = repository.get::<Address>()?;
/// ```
pub struct SpecificationRepository {
    specs: DashMap<TypeId, Entry>,
}

struct Entry {
    type_name: &'static str,
    spec: Arc<dyn Any + Send + Sync>,
}

impl SpecificationRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            specs: DashMap::new(),
        }
    }

    /// Register the specification for `M`.
    ///
    /// If one is already registered for `M`, it is replaced.
    pub fn register<M: 'static>(&self, spec: impl Into<Arc<Specification<M>>>) {
        let spec: Arc<Specification<M>> = spec.into();
        let type_name = type_name::<M>();
        tracing::debug!(model = type_name, entries = spec.len(), "registered specification");
        self.specs.insert(TypeId::of::<M>(), Entry { type_name, spec });
    }

    /// Look up the specification for `M`.
    pub fn get<M: 'static>(&self) -> SpecResult<Arc<Specification<M>>> {
        self.specs
            .get(&TypeId::of::<M>())
            .and_then(|entry| Arc::clone(&entry.spec).downcast::<Specification<M>>().ok())
            .ok_or_else(|| SpecError::SpecificationNotFound {
                type_name: type_name::<M>(),
            })
    }

    /// Check if a specification is registered for `M`.
    #[must_use]
    pub fn contains<M: 'static>(&self) -> bool {
        self.specs.contains_key(&TypeId::of::<M>())
    }

    /// Remove the specification for `M`. Returns whether one was registered.
    pub fn remove<M: 'static>(&self) -> bool {
        self.specs.remove(&TypeId::of::<M>()).is_some()
    }

    /// Number of registered specifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Names of the registered model types.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        self.specs.iter().map(|entry| entry.type_name).collect()
    }
}

impl Default for SpecificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpecificationRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationRepository")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Address {
        city: String,
    }

    fn address_spec() -> Specification<Address> {
        Specification::build(|s| s.member("City", |a: &Address| &a.city, |m| m.not_empty()))
            .unwrap()
    }

    #[test]
    fn register_and_get() {
        let repository = SpecificationRepository::new();
        repository.register(address_spec());

        assert!(repository.contains::<Address>());
        assert_eq!(repository.len(), 1);
        let spec = repository.get::<Address>().unwrap();
        assert_eq!(spec.member_names(), vec!["City"]);
    }

    #[test]
    fn missing_type_is_reported() {
        let repository = SpecificationRepository::new();
        repository.register(address_spec());

        let err = repository.get::<String>().unwrap_err();
        assert_eq!(
            err,
            SpecError::SpecificationNotFound {
                type_name: "alloc::string::String"
            }
        );
    }

    #[test]
    fn register_replaces() {
        let repository = SpecificationRepository::new();
        repository.register(address_spec());
        repository.register(Specification::<Address>::build(|s| s).unwrap());

        assert_eq!(repository.len(), 1);
        assert!(repository.get::<Address>().unwrap().is_empty());
    }

    #[test]
    fn remove() {
        let repository = SpecificationRepository::new();
        repository.register(address_spec());

        assert!(repository.remove::<Address>());
        assert!(!repository.remove::<Address>());
        assert!(repository.is_empty());
    }
}
