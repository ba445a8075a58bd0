//! Depth-limited negamax over the action tree
//!
//! Scores live in [0, 1] from each node's own mover's perspective, so the
//! back-up across a turn boundary is the complement `1 - s` and the search
//! window maps to `(1 - beta, 1 - alpha)`. Within a turn (build and move
//! actions keep the same player on move) scores and windows pass through
//! unchanged. Depth counts actions, one ply each.

use formic_core::eval::{Evaluator, LOSS_SCORE, WIN_SCORE};
use formic_core::oracle::{MoveOracle, RandomAttack};
use formic_core::{Action, GameState, Player};

use crate::SearchConfig;

pub(crate) struct Searcher<'a, E: Evaluator, O: MoveOracle> {
    evaluator: &'a E,
    oracle: &'a O,
    attack: RandomAttack,
    depth_limit: u32,
    pool_width: usize,
    max_nodes: Option<u64>,
    pub nodes: u64,
}

impl<'a, E: Evaluator, O: MoveOracle> Searcher<'a, E, O> {
    pub fn new(evaluator: &'a E, oracle: &'a O, config: &SearchConfig, attack_seed: u64) -> Self {
        Self {
            evaluator,
            oracle,
            attack: RandomAttack::with_seed(attack_seed),
            depth_limit: config.depth,
            pool_width: config.pool_width,
            max_nodes: config.max_nodes,
            nodes: 0,
        }
    }

    pub fn out_of_budget(&self) -> bool {
        self.max_nodes.map_or(false, |max| self.nodes >= max)
    }

    /// Depth bonus so that faster wins (and later losses) are preferred
    fn remaining(&self, depth: u32) -> f32 {
        (self.depth_limit + 1 - depth) as f32
    }

    /// Expand a node: apply every legal action, order the children by their
    /// one-ply evaluation, and keep the most promising pool_width of them.
    ///
    /// The truncation is heuristic pruning: it may discard the true best
    /// action, trading optimality for a bounded branching factor.
    pub fn expand_ordered(&mut self, state: &GameState) -> Vec<(Action, GameState, f32)> {
        let me = state.current_player();
        let actions = self.oracle.legal_actions(state);

        let mut children: Vec<(Action, GameState, f32)> = actions
            .into_iter()
            .map(|action| {
                let child = state.apply_action(&action, &mut self.attack);
                let key = self.one_ply_score(me, &child);
                (action, child, key)
            })
            .collect();

        children.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        children.truncate(self.pool_width);
        children
    }

    /// One-ply evaluation of a child from the parent mover's perspective
    fn one_ply_score(&self, parent_mover: Player, child: &GameState) -> f32 {
        let score = self.evaluator.evaluate(child);
        if child.current_player() != parent_mover {
            1.0 - score
        } else {
            score
        }
    }

    /// Score a child node from the parent mover's perspective, complementing
    /// score and window only when the mover changed (end-turn children)
    pub fn score_child(
        &mut self,
        parent_mover: Player,
        child: &GameState,
        depth: u32,
        alpha: f32,
        beta: f32,
    ) -> f32 {
        if child.current_player() != parent_mover {
            1.0 - self.negamax(child, depth, 1.0 - beta, 1.0 - alpha)
        } else {
            self.negamax(child, depth, alpha, beta)
        }
    }

    fn negamax(&mut self, state: &GameState, depth: u32, mut alpha: f32, beta: f32) -> f32 {
        self.nodes += 1;
        let me = state.current_player();

        // Terminal victory short-circuits deeper search
        if state.has_won(me) {
            return WIN_SCORE + self.remaining(depth);
        }
        if state.has_lost(me) {
            return LOSS_SCORE - self.remaining(depth);
        }

        if depth >= self.depth_limit || self.out_of_budget() {
            return self.evaluator.evaluate(state);
        }

        let children = self.expand_ordered(state);
        if children.is_empty() {
            // Oracle contract violation: it must offer EndTurn. Repair and go on.
            tracing::warn!("move oracle returned no actions; forcing end turn");
            let child = state.apply_action(&Action::EndTurn, &mut self.attack);
            return 1.0 - self.negamax(&child, depth + 1, 1.0 - beta, 1.0 - alpha);
        }

        let mut best = f32::NEG_INFINITY;
        for (_, child, _) in &children {
            let score = self.score_child(me, child, depth + 1, alpha, beta);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
            if self.out_of_budget() {
                break;
            }
        }
        best
    }
}
