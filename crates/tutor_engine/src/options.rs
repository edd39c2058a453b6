//! Engine-wide options.

use serde::{Deserialize, Serialize};
use tutor_solver_core::AliasPolicy;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineOptions {
    /// How a primary parameter name and its legacy alias are reconciled.
    pub alias_policy: AliasPolicy,
    /// Drop hints whose text contains the displayed answer.
    pub filter_revealing_hints: bool,
    /// Worker threads for batch dispatch; `0` uses the available parallelism.
    pub parallelism: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            alias_policy: AliasPolicy::PreferPrimary,
            filter_revealing_hints: true,
            parallelism: 0,
        }
    }
}

impl EngineOptions {
    /// Number of workers to use for `tasks` independent tasks (at least 1).
    pub fn workers_for(&self, tasks: usize) -> usize {
        let configured = if self.parallelism == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.parallelism
        };
        configured.min(tasks).max(1)
    }
}
