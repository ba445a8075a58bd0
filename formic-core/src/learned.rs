//! Learned evaluators: network forward pass and TD utility table
//!
//! Both conform to the same `Evaluator` contract as the heuristic. How their
//! parameters were produced is outside this crate; the network only runs
//! inference over caller-supplied weights, and the table only applies the
//! single-step TD update on demand.

use crate::ants::AntType;
use crate::board::Coord;
use crate::eval::{terminal_score, Evaluator};
use crate::game::{GameState, Player};
use rand::Rng;
use rustc_hash::FxHashMap;

/// Size of the state feature vector
pub const NUM_INPUTS: usize = 8;

/// Hidden layer width
pub const NUM_HIDDEN: usize = 2 * NUM_INPUTS;

/// Largest worker-goal distance on the board, for normalization
const MAX_GOAL_DIST: f32 = 18.0;

// ============================================================================
// FEATURE EXTRACTION
// ============================================================================

/// Fixed-size numeric summary of a state, from the mover's perspective.
/// Every component is in [0, 1].
pub fn feature_vector(state: &GameState) -> [f32; NUM_INPUTS] {
    let me = state.current_player();
    let foe = me.opponent();
    let inv = state.inventory(me);

    let mut x = [0.0f32; NUM_INPUTS];

    x[0] = if state.has_lost(me) { 1.0 } else { 0.0 };
    x[1] = if state.has_won(me) { 1.0 } else { 0.0 };

    let dropoffs = state.dropoffs(me);
    let foods = state.food_nodes();
    if let Some(queen) = inv.queen() {
        if dropoffs.contains(&queen.pos) || foods.contains(&queen.pos) {
            x[2] = 1.0;
        }
        x[3] = queen_advance(queen.pos, me) as f32 / 9.0;
    }

    let workers: Vec<_> = inv.workers().collect();
    x[4] = workers.len().min(2) as f32 / 2.0;
    for (i, worker) in workers.iter().take(2).enumerate() {
        let goals = if worker.carrying { &dropoffs } else { &foods };
        if let Some(d) = goals.iter().map(|g| worker.pos.manhattan_to(*g)).min() {
            x[5 + i] = d as f32 / MAX_GOAL_DIST;
        }
    }

    if let Some(foe_queen) = state.inventory(foe).queen() {
        x[7] = foe_queen.health as f32 / AntType::Queen.stats().health as f32;
    }

    x
}

/// Rows the queen has advanced from her home edge
fn queen_advance(pos: Coord, player: Player) -> i32 {
    match player {
        Player::One => pos.y as i32,
        Player::Two => 9 - pos.y as i32,
    }
}

// ============================================================================
// NETWORK EVALUATOR
// ============================================================================

/// Feed-forward network with one hidden sigmoid layer.
///
/// The last weight of each row is the bias.
#[derive(Clone, Debug)]
pub struct NetEvaluator {
    hidden: [[f32; NUM_INPUTS + 1]; NUM_HIDDEN],
    output: [f32; NUM_HIDDEN + 1],
}

impl NetEvaluator {
    pub fn new(hidden: [[f32; NUM_INPUTS + 1]; NUM_HIDDEN], output: [f32; NUM_HIDDEN + 1]) -> Self {
        Self { hidden, output }
    }

    /// Random weights in [-1, 1]
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut hidden = [[0.0f32; NUM_INPUTS + 1]; NUM_HIDDEN];
        for row in &mut hidden {
            for w in row.iter_mut() {
                *w = rng.gen::<f32>() * 2.0 - 1.0;
            }
        }
        let mut output = [0.0f32; NUM_HIDDEN + 1];
        for w in &mut output {
            *w = rng.gen::<f32>() * 2.0 - 1.0;
        }
        Self { hidden, output }
    }

    fn forward(&self, x: &[f32; NUM_INPUTS]) -> f32 {
        let mut final_sum = 0.0f32;
        for (node, row) in self.hidden.iter().enumerate() {
            let mut node_sum = row[NUM_INPUTS]; // bias
            for i in 0..NUM_INPUTS {
                node_sum += row[i] * x[i];
            }
            final_sum += self.output[node] * sigmoid(node_sum);
        }
        final_sum += self.output[NUM_HIDDEN]; // bias
        sigmoid(final_sum)
    }
}

impl Evaluator for NetEvaluator {
    fn evaluate(&self, state: &GameState) -> f32 {
        if let Some(score) = terminal_score(state) {
            return score;
        }
        self.forward(&feature_vector(state))
    }
}

fn sigmoid(v: f32) -> f32 {
    1.0 / (1.0 + (-v).exp())
}

// ============================================================================
// TD TABLE EVALUATOR
// ============================================================================

/// Utility of a state never seen before
const DEFAULT_UTILITY: f32 = 0.5;

/// Table evaluator keyed by a quantized state fingerprint.
///
/// Unknown states score neutral. `reinforce` applies
/// `U(s) <- U(s) + alpha * (reward + gamma * U(s') - U(s))`.
#[derive(Clone, Debug)]
pub struct TableEvaluator {
    table: FxHashMap<u64, f32>,
    pub alpha: f32,
    pub gamma: f32,
}

impl TableEvaluator {
    pub fn new(alpha: f32, gamma: f32) -> Self {
        Self {
            table: FxHashMap::default(),
            alpha,
            gamma,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn utility(&self, key: u64) -> f32 {
        self.table.get(&key).copied().unwrap_or(DEFAULT_UTILITY)
    }

    /// One TD backup from `prev` toward `reward + gamma * U(next)`
    pub fn reinforce(&mut self, prev: &GameState, reward: f32, next: &GameState) {
        let key = fingerprint(prev);
        let u = self.utility(key);
        let target = reward + self.gamma * self.utility(fingerprint(next));
        self.table.insert(key, u + self.alpha * (target - u));
    }
}

impl Default for TableEvaluator {
    fn default() -> Self {
        Self::new(0.9, 0.9)
    }
}

impl Evaluator for TableEvaluator {
    fn evaluate(&self, state: &GameState) -> f32 {
        if let Some(score) = terminal_score(state) {
            return score;
        }
        self.utility(fingerprint(state))
    }
}

/// Quantize the feature vector and bit-pack it into a table key
pub fn fingerprint(state: &GameState) -> u64 {
    let x = feature_vector(state);
    let mut key = 0u64;
    // flags
    key = (key << 1) | (x[0] > 0.5) as u64;
    key = (key << 1) | (x[1] > 0.5) as u64;
    key = (key << 1) | (x[2] > 0.5) as u64;
    // queen advance, 0-9
    key = (key << 4) | ((x[3] * 9.0).round() as u64 & 0xf);
    // worker count, 0-2
    key = (key << 2) | ((x[4] * 2.0).round() as u64 & 0x3);
    // worker goal distances, quantized to 0-15
    key = (key << 4) | ((x[5] * 15.0).round() as u64 & 0xf);
    key = (key << 4) | ((x[6] * 15.0).round() as u64 & 0xf);
    // enemy queen health, 0-10
    key = (key << 4) | ((x[7] * 10.0).round() as u64 & 0xf);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ants::StructureType;
    use crate::game::{Ant, Inventory, Phase, Structure, FOOD_GOAL};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_state() -> GameState {
        let mut one = Inventory::default();
        one.structures.push(Structure::new(
            Some(Player::One),
            StructureType::Anthill,
            Coord::new(1, 1),
        ));
        one.ants
            .push(Ant::new(Player::One, AntType::Queen, Coord::new(0, 2)));
        one.ants
            .push(Ant::new(Player::One, AntType::Worker, Coord::new(3, 3)));
        let mut two = Inventory::default();
        two.structures.push(Structure::new(
            Some(Player::Two),
            StructureType::Anthill,
            Coord::new(8, 8),
        ));
        two.ants
            .push(Ant::new(Player::Two, AntType::Queen, Coord::new(9, 7)));
        let neutral = vec![Structure::new(None, StructureType::Food, Coord::new(5, 4))];
        GameState::new([one, two], neutral, Player::One, Phase::Play)
    }

    #[test]
    fn test_features_are_normalized() {
        let x = feature_vector(&sample_state());
        for (i, v) in x.iter().enumerate() {
            assert!((0.0..=1.0).contains(v), "feature {} = {} out of range", i, v);
        }
        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 0.0);
        assert_eq!(x[7], 1.0);
    }

    #[test]
    fn test_net_output_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let net = NetEvaluator::from_rng(&mut rng);
        let score = net.evaluate(&sample_state());
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_net_respects_terminals() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let net = NetEvaluator::from_rng(&mut rng);

        let mut won = sample_state();
        won.inventory_mut(Player::One).food = FOOD_GOAL;
        assert_eq!(net.evaluate(&won), 1.0);

        let mut lost = sample_state();
        lost.inventory_mut(Player::One).ants.remove(0);
        assert_eq!(net.evaluate(&lost), 0.0);
    }

    #[test]
    fn test_table_default_and_reinforce() {
        let mut table = TableEvaluator::new(0.5, 0.9);
        let s = sample_state();
        assert_eq!(table.evaluate(&s), DEFAULT_UTILITY);

        let mut s2 = sample_state();
        s2.inventory_mut(Player::One).ants[1].pos = Coord::new(4, 4);

        // Positive reward pulls the utility up
        table.reinforce(&s, 1.0, &s2);
        assert!(table.evaluate(&s) > DEFAULT_UTILITY);
        assert_eq!(table.len(), 1);

        // And the update moves toward the TD target, not past it
        let target = 1.0 + 0.9 * DEFAULT_UTILITY;
        assert!(table.evaluate(&s) < target);
    }

    #[test]
    fn test_fingerprint_distinguishes_states() {
        let s = sample_state();
        let mut moved = sample_state();
        moved.inventory_mut(Player::One).ants[1].pos = Coord::new(5, 4);
        assert_ne!(fingerprint(&s), fingerprint(&moved));
        assert_eq!(fingerprint(&s), fingerprint(&sample_state()));
    }
}
