//! Scenario - declarative board setup
//!
//! A scenario describes where each colony's structures sit and where the
//! neutral terrain goes; `build` turns it into a playable starting state
//! with a queen on each anthill and a worker on each tunnel.

use crate::ants::{AntType, StructureType};
use crate::board::Coord;
use crate::game::{Ant, GameState, Inventory, Phase, Player, Structure};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Board layout for a two-colony game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// One anthill per player, indexed by player
    pub anthills: [Coord; 2],
    /// One tunnel per player, indexed by player
    pub tunnels: [Coord; 2],
    pub grass: Vec<Coord>,
    pub food: Vec<Coord>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("coordinate {0:?} is off the board")]
    OffBoard(Coord),
    #[error("coordinate {0:?} is used twice")]
    Overlap(Coord),
}

impl Scenario {
    /// Build the starting game state
    pub fn build(&self) -> Result<GameState, ScenarioError> {
        let mut seen = FxHashSet::default();
        for &c in self
            .anthills
            .iter()
            .chain(self.tunnels.iter())
            .chain(self.grass.iter())
            .chain(self.food.iter())
        {
            if !c.is_valid() {
                return Err(ScenarioError::OffBoard(c));
            }
            if !seen.insert(c) {
                return Err(ScenarioError::Overlap(c));
            }
        }

        let mut inventories: [Inventory; 2] = [Inventory::default(), Inventory::default()];
        for player in [Player::One, Player::Two] {
            let i = player.index();
            let inv = &mut inventories[i];
            inv.structures.push(Structure::new(
                Some(player),
                StructureType::Anthill,
                self.anthills[i],
            ));
            inv.structures.push(Structure::new(
                Some(player),
                StructureType::Tunnel,
                self.tunnels[i],
            ));
            inv.ants
                .push(Ant::new(player, AntType::Queen, self.anthills[i]));
            inv.ants
                .push(Ant::new(player, AntType::Worker, self.tunnels[i]));
        }

        let neutral = self
            .grass
            .iter()
            .map(|&c| Structure::new(None, StructureType::Grass, c))
            .chain(
                self.food
                    .iter()
                    .map(|&c| Structure::new(None, StructureType::Food, c)),
            )
            .collect();

        Ok(GameState::new(inventories, neutral, Player::One, Phase::Play))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            anthills: [Coord::new(3, 1), Coord::new(6, 8)],
            tunnels: [Coord::new(6, 2), Coord::new(3, 7)],
            grass: vec![
                Coord::new(0, 3),
                Coord::new(9, 3),
                Coord::new(0, 6),
                Coord::new(9, 6),
            ],
            food: vec![
                Coord::new(1, 4),
                Coord::new(8, 4),
                Coord::new(1, 5),
                Coord::new(8, 5),
            ],
        }
    }
}
