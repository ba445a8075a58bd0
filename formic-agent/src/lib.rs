//! FORMIC Agent - adversarial search over simulated futures
//!
//! This crate provides the move-selection engine:
//! - Depth-limited negamax with alpha-beta pruning
//! - Evaluate-then-expand-top-K node selection
//! - Random tie-breaking among equal-best root actions
//! - Optional node budget with best-so-far fallback
//! - Optional rayon root parallelism (feature `parallel`)

mod search;

#[cfg(feature = "parallel")]
pub mod parallel;

use formic_core::eval::Evaluator;
use formic_core::oracle::{MoveOracle, RandomAttack};
use formic_core::{Action, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use search::Searcher;

#[cfg(feature = "parallel")]
pub use parallel::choose_action_parallel;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search configuration
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Depth limit in actions (plies)
    pub depth: u32,
    /// How many children survive the one-ply ordering at each node
    pub pool_width: usize,
    /// Optional node budget; when exhausted the best action found so far
    /// is returned instead of completing the search
    pub max_nodes: Option<u64>,
    /// Seed for tie-breaking and simulated attack rolls
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            pool_width: 8,
            max_nodes: None,
            seed: 42,
        }
    }
}

impl SearchConfig {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn with_pool_width(mut self, pool_width: usize) -> Self {
        self.pool_width = pool_width;
        self
    }

    pub fn with_node_budget(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SearchConfigError> {
        if self.depth == 0 {
            return Err(SearchConfigError::ZeroDepth);
        }
        if self.pool_width == 0 {
            return Err(SearchConfigError::ZeroPoolWidth);
        }
        Ok(())
    }
}

/// Rejected at construction rather than producing confusing searches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("pruning pool width must be at least 1")]
    ZeroPoolWidth,
}

// ============================================================================
// ALPHA-BETA AGENT
// ============================================================================

/// Move-selecting agent: negamax with alpha-beta over oracle actions,
/// scoring leaves through the configured evaluator
pub struct AlphaBetaAgent<E: Evaluator> {
    config: SearchConfig,
    evaluator: E,
    rng: ChaCha8Rng,
}

impl<E: Evaluator> AlphaBetaAgent<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Result<Self, SearchConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            evaluator,
            rng,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Pick the best action for the current player.
    ///
    /// Root children get full windows so every one of them carries an exact
    /// backed-up score; ties are broken uniformly at random.
    pub fn choose_action<O: MoveOracle>(&mut self, state: &GameState, oracle: &O) -> Action {
        let me = state.current_player();
        let mut searcher = Searcher::new(&self.evaluator, oracle, &self.config, self.rng.gen());

        let mut children = searcher.expand_ordered(state);
        if children.is_empty() {
            tracing::warn!("move oracle returned no actions at the root; ending turn");
            return Action::EndTurn;
        }
        if children.len() == 1 {
            return children.pop().unwrap().0;
        }

        let mut scored: Vec<(Action, f32)> = Vec::with_capacity(children.len());
        for (action, child, _) in children {
            // Anytime fallback: keep the best fully searched action so far
            if !scored.is_empty() && searcher.out_of_budget() {
                break;
            }
            let score = searcher.score_child(me, &child, 1, f32::NEG_INFINITY, f32::INFINITY);
            scored.push((action, score));
        }

        let best = scored
            .iter()
            .map(|(_, s)| *s)
            .fold(f32::NEG_INFINITY, f32::max);
        let ties: Vec<usize> = scored
            .iter()
            .enumerate()
            .filter(|(_, (_, s))| *s == best)
            .map(|(i, _)| i)
            .collect();
        let pick = ties[self.rng.gen_range(0..ties.len())];

        tracing::debug!(nodes = searcher.nodes, score = best, "search complete");
        scored.swap_remove(pick).0
    }

    /// Play out a full game with this agent moving for both sides
    pub fn play_game<O: MoveOracle>(
        &mut self,
        initial: GameState,
        oracle: &O,
        max_actions: usize,
    ) -> (GameState, Vec<Action>) {
        let mut state = initial;
        let mut history = Vec::new();
        let mut attack = RandomAttack::with_seed(self.rng.gen());

        while state.winner().is_none() && history.len() < max_actions {
            let action = self.choose_action(&state, oracle);
            state = state.apply_action(&action, &mut attack);
            history.push(action);
        }

        (state, history)
    }

    /// Evaluate a position with this agent's evaluator
    pub fn evaluate(&self, state: &GameState) -> f32 {
        self.evaluator.evaluate(state)
    }
}

// ============================================================================
// TESTS
// ============================================================================
