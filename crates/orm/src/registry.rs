//! Model Registry - name to definition mapping shared by relationship resolution

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{OrmError, OrmResult};
use crate::model::ModelDefinition;

pub(crate) type ModelMap = DashMap<String, Arc<ModelDefinition>>;

/// Thread-safe registry of model definitions
///
/// Clones share the same storage. Definitions are held by reference and
/// never copied.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: Arc<ModelMap>,
}

impl ModelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_shared(models: Arc<ModelMap>) -> Self {
        Self { models }
    }

    /// Register `definition` under its name and bind it to this registry
    ///
    /// Fails if the name is taken or if the definition was already
    /// registered anywhere, including into this registry.
    pub fn register(&self, definition: Arc<ModelDefinition>) -> OrmResult<()> {
        let name = definition.name().to_string();
        let already_registered = || OrmError::Model(format!("Model already registered: {}", name));

        if definition.is_registered() {
            return Err(already_registered());
        }

        match self.models.entry(name.clone()) {
            Entry::Occupied(_) => Err(already_registered()),
            Entry::Vacant(slot) => {
                if !definition.bind_registry(&self.models) {
                    return Err(already_registered());
                }
                slot.insert(definition);
                debug!(model = %name, "registered model");
                Ok(())
            }
        }
    }

    /// Look up a definition by model name
    pub fn lookup(&self, name: &str) -> Option<Arc<ModelDefinition>> {
        self.models.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered model names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Returns true if both handles share the same storage
    pub fn same_as(&self, other: &ModelRegistry) -> bool {
        Arc::ptr_eq(&self.models, &other.models)
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.names())
            .finish()
    }
}
