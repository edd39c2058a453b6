//! Pattern key → procedure table, populated at startup.

use crate::error::EngineError;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tutor_api_models::PatternKey;
use tutor_solver_core::{PatternId, Procedure};

#[derive(Clone, Default)]
pub struct Registry {
    procedures: FxHashMap<PatternKey, Arc<dyn Procedure>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per built-in pattern.
    pub fn with_builtin_procedures() -> Self {
        let procedures = PatternId::ALL
            .iter()
            .map(|id| (id.key(), id.procedure()))
            .collect();
        Self { procedures }
    }

    pub fn register(
        &mut self,
        key: PatternKey,
        procedure: Arc<dyn Procedure>,
    ) -> Result<(), EngineError> {
        if self.procedures.contains_key(&key) {
            return Err(EngineError::DuplicatePattern { key });
        }
        tracing::debug!(target: "registry", key = %key, procedure = procedure.name(), "registered");
        self.procedures.insert(key, procedure);
        Ok(())
    }

    /// Exact key match only.
    pub fn lookup(&self, key: &PatternKey) -> Option<Arc<dyn Procedure>> {
        self.procedures.get(key).cloned()
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<PatternKey> {
        let mut keys: Vec<PatternKey> = self.procedures.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .finish()
    }
}
