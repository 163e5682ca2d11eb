//! Tunables for the heuristic agent.
//!
//! The engine builds an [`AgentConfig`] from the `agent` section of
//! `herding-config.yaml` and passes it to [`HeuristicAgent::new`].
//!
//! [`HeuristicAgent::new`]: crate::agent::HeuristicAgent::new

/// Configuration for the heuristic agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Extra random draws allowed when the first sampled exploration step
    /// lands on an unavailable cell (default: 20).
    pub exploration_attempts: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            exploration_attempts: 20,
        }
    }
}
