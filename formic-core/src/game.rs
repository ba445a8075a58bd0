//! Game state, transition engine, and legal-action generation

use crate::ants::{AntType, StructureType};
use crate::board::Coord;
use crate::oracle::AttackPolicy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Food count that wins the game
pub const FOOD_GOAL: u32 = 11;

/// Movement cost of stepping onto a grass tile (plain tiles cost 1)
const GRASS_STEP_COST: u32 = 2;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Game phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Play,
}

/// An ant on the board
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub owner: Player,
    pub kind: AntType,
    pub pos: Coord,
    pub health: i32,
    pub carrying: bool,
    pub has_acted: bool,
}

impl Ant {
    /// New ant at full health that has not acted yet
    pub fn new(owner: Player, kind: AntType, pos: Coord) -> Self {
        Self {
            owner,
            kind,
            pos,
            health: kind.stats().health,
            carrying: false,
            has_acted: false,
        }
    }
}

/// A structure on the board (owner None = neutral)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub owner: Option<Player>,
    pub kind: StructureType,
    pub pos: Coord,
    pub capture_health: i32,
}

impl Structure {
    pub fn new(owner: Option<Player>, kind: StructureType, pos: Coord) -> Self {
        Self {
            owner,
            kind,
            pos,
            capture_health: kind.stats().capture_health,
        }
    }
}

/// Everything one player owns
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub ants: Vec<Ant>,
    pub structures: Vec<Structure>,
    pub food: u32,
}

impl Inventory {
    pub fn queen(&self) -> Option<&Ant> {
        self.ants.iter().find(|a| a.kind == AntType::Queen)
    }

    pub fn anthill(&self) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.kind == StructureType::Anthill)
    }

    pub fn workers(&self) -> impl Iterator<Item = &Ant> {
        self.ants.iter().filter(|a| a.kind == AntType::Worker)
    }
}

/// What a build action produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildItem {
    Ant(AntType),
    Tunnel,
}

impl BuildItem {
    pub fn cost(self) -> u32 {
        match self {
            BuildItem::Ant(kind) => kind.stats().cost,
            BuildItem::Tunnel => StructureType::Tunnel.stats().build_cost,
        }
    }
}

/// A legal action
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    EndTurn,
    Build { at: Coord, item: BuildItem },
    /// Ordered path; first = origin, last = destination
    Move { path: Vec<Coord> },
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (clone to mutate)
#[derive(Clone, Debug)]
pub struct GameState {
    /// One inventory per player
    inventories: [Inventory; 2],

    /// Neutral structures (food nodes, grass)
    neutral: Vec<Structure>,

    /// Current player
    whose_turn: Player,

    /// Game phase
    phase: Phase,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(
        inventories: [Inventory; 2],
        neutral: Vec<Structure>,
        whose_turn: Player,
        phase: Phase,
    ) -> Self {
        Self {
            inventories,
            neutral,
            whose_turn,
            phase,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Current player (the mover)
    pub fn current_player(&self) -> Player {
        self.whose_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn inventory(&self, player: Player) -> &Inventory {
        &self.inventories[player.index()]
    }

    pub fn inventory_mut(&mut self, player: Player) -> &mut Inventory {
        &mut self.inventories[player.index()]
    }

    /// Get the ant at a coordinate, if any
    pub fn ant_at(&self, pos: Coord) -> Option<&Ant> {
        self.inventories
            .iter()
            .flat_map(|inv| inv.ants.iter())
            .find(|a| a.pos == pos)
    }

    /// Get the structure at a coordinate, if any
    pub fn structure_at(&self, pos: Coord) -> Option<&Structure> {
        self.inventories
            .iter()
            .flat_map(|inv| inv.structures.iter())
            .chain(self.neutral.iter())
            .find(|s| s.pos == pos)
    }

    /// Iterate all ants on the board
    pub fn ants(&self) -> impl Iterator<Item = &Ant> {
        self.inventories.iter().flat_map(|inv| inv.ants.iter())
    }

    /// Coordinates of a player's drop-off structures (anthill + tunnels)
    pub fn dropoffs(&self, player: Player) -> Vec<Coord> {
        self.inventories[player.index()]
            .structures
            .iter()
            .filter(|s| s.kind.is_dropoff())
            .map(|s| s.pos)
            .collect()
    }

    /// Coordinates of the neutral food nodes
    pub fn food_nodes(&self) -> Vec<Coord> {
        self.neutral
            .iter()
            .filter(|s| s.kind == StructureType::Food)
            .map(|s| s.pos)
            .collect()
    }

    // ========================================================================
    // WIN / LOSS
    // ========================================================================

    /// Whether a player has lost: queen gone, anthill fully captured,
    /// or the opponent reached the food goal
    pub fn has_lost(&self, player: Player) -> bool {
        if self.phase != Phase::Play {
            return false;
        }
        let inv = self.inventory(player);
        inv.queen().is_none()
            || inv.anthill().map_or(true, |h| h.capture_health <= 0)
            || self.inventory(player.opponent()).food >= FOOD_GOAL
    }

    pub fn has_won(&self, player: Player) -> bool {
        self.has_lost(player.opponent())
    }

    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::One) {
            Some(Player::One)
        } else if self.has_won(Player::Two) {
            Some(Player::Two)
        } else {
            None
        }
    }

    // ========================================================================
    // APPLY ACTION
    // ========================================================================

    /// Apply action, return new state. The input state is never mutated;
    /// every caller gets an independent copy.
    pub fn apply_action(&self, action: &Action, attack: &mut dyn AttackPolicy) -> Self {
        let mut next = self.clone();
        next.apply_action_internal(action, attack);
        next
    }

    fn apply_action_internal(&mut self, action: &Action, attack: &mut dyn AttackPolicy) {
        match action {
            Action::EndTurn => self.end_turn(),
            Action::Build { at, item } => self.apply_build(*at, *item),
            Action::Move { path } => self.apply_move_ant(path, attack),
        }
    }

    fn end_turn(&mut self) {
        self.whose_turn = self.whose_turn.opponent();
        // A new turn means all of the new mover's ants may act again
        for ant in &mut self.inventories[self.whose_turn.index()].ants {
            ant.has_acted = false;
        }
    }

    fn apply_build(&mut self, at: Coord, item: BuildItem) {
        let me = self.whose_turn;
        let cost = item.cost();
        let inv = &mut self.inventories[me.index()];
        assert!(
            inv.food >= cost,
            "build precondition violated: cost {} exceeds food {}",
            cost,
            inv.food
        );
        inv.food -= cost;
        match item {
            BuildItem::Ant(kind) => inv.ants.push(Ant::new(me, kind, at)),
            BuildItem::Tunnel => inv
                .structures
                .push(Structure::new(Some(me), StructureType::Tunnel, at)),
        }
    }

    fn apply_move_ant(&mut self, path: &[Coord], attack: &mut dyn AttackPolicy) {
        let me = self.whose_turn;
        let foe = me.opponent();
        let from = *path.first().expect("move path must not be empty");
        let to = *path.last().expect("move path must not be empty");

        let dest = self.structure_at(to).map(|s| (s.kind, s.owner));

        // Relocate and resolve resource interaction
        let mut delivered = false;
        let kind = {
            let inv = &mut self.inventories[me.index()];
            let ant = inv
                .ants
                .iter_mut()
                .find(|a| a.pos == from)
                .expect("no ant at move origin");
            ant.pos = to;
            ant.has_acted = true;

            if ant.kind.can_carry() {
                match dest {
                    // Pick up: carrier on a food node
                    Some((StructureType::Food, _)) if !ant.carrying => ant.carrying = true,
                    // Drop off: carrier on an own drop-off structure
                    Some((k, Some(owner))) if k.is_dropoff() && owner == me && ant.carrying => {
                        ant.carrying = false;
                        delivered = true;
                    }
                    _ => {}
                }
            }
            ant.kind
        };
        if delivered {
            self.inventories[me.index()].food += 1;
        }

        // Ending the move on the enemy anthill wears its capture health down
        if let Some(hill) = self.inventories[foe.index()]
            .structures
            .iter_mut()
            .find(|s| s.kind == StructureType::Anthill && s.pos == to)
        {
            hill.capture_health = (hill.capture_health - 1).max(0);
        }

        // Combat: squared Euclidean range check, one target per move
        let stats = kind.stats();
        let range_sq = stats.range * stats.range;
        let in_range: Vec<Coord> = self.inventories[foe.index()]
            .ants
            .iter()
            .filter(|a| to.dist_sq_to(a.pos) <= range_sq)
            .map(|a| a.pos)
            .collect();

        if !in_range.is_empty() {
            let target = attack.choose_target(self, to, &in_range);
            let foe_inv = &mut self.inventories[foe.index()];
            let idx = foe_inv
                .ants
                .iter()
                .position(|a| a.pos == target)
                .expect("attack target not at chosen coordinate");
            let victim = &mut foe_inv.ants[idx];
            victim.health = (victim.health - stats.attack).max(0);
            if victim.health == 0 {
                foe_inv.ants.remove(idx);
            }
        }
    }

    // ========================================================================
    // LEGAL ACTIONS
    // ========================================================================

    /// Generate all legal actions for the current player.
    ///
    /// EndTurn is always present, so the set is never empty during play.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.phase != Phase::Play {
            return vec![];
        }

        let me = self.whose_turn;
        let mut actions = Vec::new();

        if self.winner().is_none() {
            let inv = &self.inventories[me.index()];
            for ant in &inv.ants {
                if !ant.has_acted {
                    self.push_move_actions(ant, &mut actions);
                }
            }
            self.push_build_actions(&mut actions);
        }

        actions.push(Action::EndTurn);
        actions
    }

    /// One Move per destination reachable within the ant's movement budget
    fn push_move_actions(&self, ant: &Ant, out: &mut Vec<Action>) {
        let budget = ant.kind.stats().movement;

        // Cheapest-cost relaxation over orthogonal steps; occupied squares
        // block traversal entirely
        let mut cost: FxHashMap<Coord, u32> = FxHashMap::default();
        let mut parent: FxHashMap<Coord, Coord> = FxHashMap::default();
        let mut order: Vec<Coord> = Vec::new();
        let mut queue: VecDeque<Coord> = VecDeque::new();

        cost.insert(ant.pos, 0);
        queue.push_back(ant.pos);

        while let Some(cur) = queue.pop_front() {
            let cur_cost = cost[&cur];
            for next in cur.neighbors() {
                if self.ant_at(next).is_some() {
                    continue;
                }
                let next_cost = cur_cost + self.step_cost(next);
                if next_cost > budget {
                    continue;
                }
                let prev = cost.get(&next).copied();
                if prev.map_or(false, |c| c <= next_cost) {
                    continue;
                }
                if prev.is_none() {
                    order.push(next);
                }
                cost.insert(next, next_cost);
                parent.insert(next, cur);
                queue.push_back(next);
            }
        }

        // The trivial stay-put move is legal: the ant spends its action in place
        out.push(Action::Move {
            path: vec![ant.pos],
        });

        for dest in order {
            let mut path = vec![dest];
            let mut cur = dest;
            while let Some(&prev) = parent.get(&cur) {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            out.push(Action::Move { path });
        }
    }

    fn push_build_actions(&self, out: &mut Vec<Action>) {
        let me = self.whose_turn;
        let inv = &self.inventories[me.index()];

        // New ants hatch on an unoccupied anthill
        if let Some(hill) = inv.anthill() {
            if self.ant_at(hill.pos).is_none() {
                for kind in AntType::BUILDABLE {
                    if inv.food >= kind.stats().cost {
                        out.push(Action::Build {
                            at: hill.pos,
                            item: BuildItem::Ant(kind),
                        });
                    }
                }
            }
        }

        // A worker on bare ground can dig a tunnel
        if inv.food >= BuildItem::Tunnel.cost() {
            for worker in inv.workers() {
                if !worker.has_acted && self.structure_at(worker.pos).is_none() {
                    out.push(Action::Build {
                        at: worker.pos,
                        item: BuildItem::Tunnel,
                    });
                }
            }
        }
    }

    fn step_cost(&self, pos: Coord) -> u32 {
        match self.structure_at(pos) {
            Some(s) if s.kind == StructureType::Grass => GRASS_STEP_COST,
            _ => 1,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
