use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Model;
use crate::error::{Result, SweepError};

/// A model that can be shared across threads and sweeps
pub type SharedModel = Arc<dyn Model + Send + Sync>;

/// Models addressable by name, for sweeps described in configuration files
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: FxHashMap<String, SharedModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its own name, replacing any previous entry
    pub fn register<M>(&mut self, model: M) -> &mut Self
    where
        M: Model + Send + Sync + 'static,
    {
        self.models
            .insert(model.name().to_string(), Arc::new(model));
        self
    }

    /// Look up a model by name
    pub fn get(&self, name: &str) -> Result<SharedModel> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| SweepError::NotCallable(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.names())
            .finish()
    }
}
