//! External decision services consumed by the engine
//!
//! The search engine never generates moves or picks attack targets itself;
//! it goes through these traits. `RulesOracle` and the attack policies are
//! the stock implementations.

use crate::board::Coord;
use crate::game::{Action, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of legal actions for a state.
///
/// Required invariant: the returned set contains EndTurn whenever no other
/// action is legal, and never contains an action the transition engine's
/// preconditions would reject.
pub trait MoveOracle {
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;
}

/// The stock oracle: the game's own rules
#[derive(Clone, Copy, Debug, Default)]
pub struct RulesOracle;

impl MoveOracle for RulesOracle {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        state.legal_actions()
    }
}

/// Picks which in-range enemy an attacker hits.
///
/// `in_range` is never empty and the returned coordinate must come from it.
pub trait AttackPolicy {
    fn choose_target(&mut self, state: &GameState, attacker: Coord, in_range: &[Coord]) -> Coord;
}

/// Uniform random target selection
#[derive(Clone, Debug)]
pub struct RandomAttack {
    rng: ChaCha8Rng,
}

impl RandomAttack {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl AttackPolicy for RandomAttack {
    fn choose_target(&mut self, _state: &GameState, _attacker: Coord, in_range: &[Coord]) -> Coord {
        in_range[self.rng.gen_range(0..in_range.len())]
    }
}

/// Deterministic policy: hit the closest target, ties broken by coordinate
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestAttack;

impl AttackPolicy for NearestAttack {
    fn choose_target(&mut self, _state: &GameState, attacker: Coord, in_range: &[Coord]) -> Coord {
        *in_range
            .iter()
            .min_by_key(|c| (attacker.dist_sq_to(**c), c.y, c.x))
            .expect("in-range list must not be empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ants::{AntType, StructureType};
    use crate::game::{Ant, Inventory, Phase, Player, Structure};

    fn tiny_state() -> GameState {
        let mut one = Inventory::default();
        one.structures.push(Structure::new(
            Some(Player::One),
            StructureType::Anthill,
            Coord::new(0, 0),
        ));
        one.ants
            .push(Ant::new(Player::One, AntType::Queen, Coord::new(0, 0)));
        let mut two = Inventory::default();
        two.structures.push(Structure::new(
            Some(Player::Two),
            StructureType::Anthill,
            Coord::new(9, 9),
        ));
        two.ants
            .push(Ant::new(Player::Two, AntType::Queen, Coord::new(9, 9)));
        GameState::new([one, two], vec![], Player::One, Phase::Play)
    }

    #[test]
    fn test_rules_oracle_always_offers_end_turn() {
        let oracle = RulesOracle;
        let state = tiny_state();
        assert!(oracle.legal_actions(&state).contains(&Action::EndTurn));
    }

    #[test]
    fn test_random_attack_is_seeded() {
        let state = tiny_state();
        let targets = vec![Coord::new(1, 1), Coord::new(2, 2), Coord::new(3, 3)];

        let mut a = RandomAttack::with_seed(7);
        let mut b = RandomAttack::with_seed(7);
        for _ in 0..10 {
            let ta = a.choose_target(&state, Coord::new(0, 0), &targets);
            let tb = b.choose_target(&state, Coord::new(0, 0), &targets);
            assert_eq!(ta, tb);
            assert!(targets.contains(&ta));
        }
    }

    #[test]
    fn test_nearest_attack_picks_closest() {
        let state = tiny_state();
        let targets = vec![Coord::new(5, 5), Coord::new(1, 0), Coord::new(3, 3)];
        let mut policy = NearestAttack;
        assert_eq!(
            policy.choose_target(&state, Coord::new(0, 0), &targets),
            Coord::new(1, 0)
        );
    }
}
