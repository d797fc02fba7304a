//! Configuration for the Monte-Carlo tree search agent.

#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Tree iterations per move decision.
    pub iterations: usize,
    /// UCT exploration constant.
    pub exploration: f64,
    /// Random playouts run side by side for every expanded node.
    pub playout_threads: usize,
    /// Plies after which a playout is scored as undecided.
    pub max_playout_steps: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: std::f64::consts::SQRT_2,
            playout_threads: 1,
            max_playout_steps: 10_000,
        }
    }
}
