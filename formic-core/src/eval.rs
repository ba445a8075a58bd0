//! Position evaluation

use crate::game::{GameState, Player};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Score of a won position (for the mover)
pub const WIN_SCORE: f32 = 1.0;

/// Score of a lost position (for the mover)
pub const LOSS_SCORE: f32 = 0.0;

/// Scores a state from the perspective of the player to move.
///
/// Higher is better for the mover. Implementations return LOSS_SCORE for a
/// position the mover has already lost and WIN_SCORE for one it has already
/// won, before any heuristic computation.
pub trait Evaluator {
    fn evaluate(&self, state: &GameState) -> f32;
}

/// Terminal check shared by all evaluators, from the mover's perspective
pub fn terminal_score(state: &GameState) -> Option<f32> {
    let me = state.current_player();
    if state.has_lost(me) {
        Some(LOSS_SCORE)
    } else if state.has_won(me) {
        Some(WIN_SCORE)
    } else {
        None
    }
}

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Bonus for having exactly `ideal_workers` workers
    pub worker_count: f32,
    pub ideal_workers: usize,
    /// Per food unit held
    pub food: f32,
    /// Per worker carrying food
    pub carry: f32,
    /// Per Manhattan step between a worker and its current goal
    pub dist: f32,
    /// Queen staying off food nodes and drop-off structures
    pub queen_clear: f32,
    /// Per ant that has already acted this turn
    pub tempo: f32,
    /// Scale fed to the atan squash
    pub squash_scale: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            worker_count: 100_000.0,
            ideal_workers: 2,
            food: 500.0,
            carry: 100.0,
            dist: 5.0,
            queen_clear: 20_000.0,
            tempo: 1.0,
            squash_scale: 10_000.0,
        }
    }
}

/// Weighted linear feature evaluation, squashed into (0, 1).
///
/// The mover's feature sum minus the opponent's is squashed, so a state and
/// its end-turn successor score as exact complements of each other.
#[derive(Clone, Debug, Default)]
pub struct HeuristicEvaluator {
    pub weights: Weights,
}

impl HeuristicEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    fn raw_score(&self, state: &GameState, player: Player) -> f32 {
        let w = &self.weights;
        let inv = state.inventory(player);
        let dropoffs = state.dropoffs(player);
        let foods = state.food_nodes();

        let mut score = 0.0f32;

        // Worker census
        let workers: Vec<_> = inv.workers().collect();
        if workers.len() == w.ideal_workers {
            score += w.worker_count;
        }

        // Food held
        score += w.food * inv.food as f32;

        // Queen off the tiles the workers need
        if let Some(queen) = inv.queen() {
            if dropoffs.contains(&queen.pos) || foods.contains(&queen.pos) {
                score -= w.queen_clear;
            } else {
                score += w.queen_clear;
            }
        }

        // Workers closing on their goals, and carrying
        for worker in &workers {
            let goals = if worker.carrying {
                score += w.carry;
                &dropoffs
            } else {
                &foods
            };
            if let Some(d) = goals.iter().map(|g| worker.pos.manhattan_to(*g)).min() {
                score -= w.dist * d as f32;
            }
        }

        // Tempo: every ant acting every turn
        for ant in &inv.ants {
            if ant.has_acted {
                score += w.tempo;
            }
        }

        score
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &GameState) -> f32 {
        if let Some(score) = terminal_score(state) {
            return score;
        }
        let me = state.current_player();
        let raw = self.raw_score(state, me) - self.raw_score(state, me.opponent());
        squash(raw, self.weights.squash_scale)
    }
}

/// Order-preserving map from (-inf, inf) to (0, 1)
fn squash(raw: f32, scale: f32) -> f32 {
    ((raw / scale).atan() + FRAC_PI_2) / PI
}
