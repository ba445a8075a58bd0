//! FORMIC Core - Game engine and evaluation
//!
//! This crate provides the core game logic for FORMIC:
//! - Board geometry (10x10 square grid)
//! - Ant and structure types with stat tables
//! - Game state, transition engine, and legal-action generation
//! - External decision interfaces (move oracle, attack policy)
//! - Position evaluation (linear heuristic, network, TD table)

pub mod board;
pub mod ants;
pub mod game;
pub mod oracle;
pub mod eval;
pub mod learned;
pub mod scenario;

// Re-exports for convenient access
pub use board::{Coord, BOARD_SIZE};
pub use ants::{AntStats, AntType, StructureStats, StructureType};
pub use game::{Action, Ant, BuildItem, GameState, Inventory, Phase, Player, Structure, FOOD_GOAL};
pub use oracle::{AttackPolicy, MoveOracle, NearestAttack, RandomAttack, RulesOracle};
pub use eval::{Evaluator, HeuristicEvaluator, Weights, LOSS_SCORE, WIN_SCORE};
pub use learned::{NetEvaluator, TableEvaluator};
pub use scenario::{Scenario, ScenarioError};
