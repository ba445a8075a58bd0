//! Root-parallel search (feature `parallel`)
//!
//! Each root action's subtree is independent, so they can be searched on
//! worker threads with fresh windows. Alpha-beta bounds are not shared
//! across siblings: less pruning than the sequential search, but no locks
//! and the same chosen-action quality guarantees.

use formic_core::eval::Evaluator;
use formic_core::oracle::MoveOracle;
use formic_core::{Action, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::search::Searcher;
use crate::{SearchConfig, SearchConfigError};

/// Pick the best action by searching every surviving root child in parallel.
///
/// The root ordering and top-K truncation match the sequential search; a
/// per-subtree RNG is derived from the seed so results do not depend on
/// thread scheduling.
pub fn choose_action_parallel<E, O>(
    config: &SearchConfig,
    evaluator: &E,
    oracle: &O,
    state: &GameState,
) -> Result<Action, SearchConfigError>
where
    E: Evaluator + Sync,
    O: MoveOracle + Sync,
{
    config.validate()?;

    let me = state.current_player();
    let mut root = Searcher::new(evaluator, oracle, config, subtree_seed(config.seed, 0));

    let mut children = root.expand_ordered(state);
    if children.is_empty() {
        tracing::warn!("move oracle returned no actions at the root; ending turn");
        return Ok(Action::EndTurn);
    }
    if children.len() == 1 {
        return Ok(children.pop().unwrap().0);
    }

    let scored: Vec<(Action, f32)> = children
        .into_par_iter()
        .enumerate()
        .map(|(i, (action, child, _))| {
            let mut searcher =
                Searcher::new(evaluator, oracle, config, subtree_seed(config.seed, i + 1));
            let score =
                searcher.score_child(me, &child, 1, f32::NEG_INFINITY, f32::INFINITY);
            (action, score)
        })
        .collect();

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

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let pick = ties[rng.gen_range(0..ties.len())];
    Ok(scored.into_iter().nth(pick).map(|(a, _)| a).unwrap())
}

fn subtree_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
