//! Ant and structure type definitions

use serde::{Deserialize, Serialize};

/// Ant type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntType {
    Queen,
    Worker,
    Drone,
    Soldier,
    Ranger,
}

/// Per-type combat and economy stats
#[derive(Clone, Debug)]
pub struct AntStats {
    pub name: &'static str,
    pub health: i32,
    /// Movement budget per action
    pub movement: u32,
    pub attack: i32,
    /// Attack reach, compared as range^2 >= squared distance
    pub range: i32,
    /// Food cost to build
    pub cost: u32,
}

impl AntStats {
    const fn new(
        name: &'static str,
        health: i32,
        movement: u32,
        attack: i32,
        range: i32,
        cost: u32,
    ) -> Self {
        Self {
            name,
            health,
            movement,
            attack,
            range,
            cost,
        }
    }
}

/// Stat table, indexed by AntType discriminant order
static ANT_STATS: [AntStats; 5] = [
    AntStats::new("Queen", 10, 2, 2, 1, 0),
    AntStats::new("Worker", 2, 2, 1, 1, 1),
    AntStats::new("Drone", 3, 3, 2, 1, 2),
    AntStats::new("Soldier", 5, 2, 3, 1, 3),
    AntStats::new("Ranger", 2, 1, 2, 3, 2),
];

impl AntType {
    /// Types that can be built during play (the queen only exists from setup)
    pub const BUILDABLE: [AntType; 4] = [
        AntType::Worker,
        AntType::Drone,
        AntType::Soldier,
        AntType::Ranger,
    ];

    pub fn stats(self) -> &'static AntStats {
        &ANT_STATS[self as usize]
    }

    /// Whether this type can pick up and carry food
    pub fn can_carry(self) -> bool {
        matches!(self, AntType::Worker)
    }
}

/// Structure type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    Anthill,
    Tunnel,
    Grass,
    Food,
}

/// Per-type structure stats
#[derive(Clone, Debug)]
pub struct StructureStats {
    pub name: &'static str,
    /// Food cost to build during play (0 = not buildable)
    pub build_cost: u32,
    /// Starting capture health (0 = not capturable)
    pub capture_health: i32,
}

impl StructureStats {
    const fn new(name: &'static str, build_cost: u32, capture_health: i32) -> Self {
        Self {
            name,
            build_cost,
            capture_health,
        }
    }
}

static STRUCTURE_STATS: [StructureStats; 4] = [
    StructureStats::new("Anthill", 0, 3),
    StructureStats::new("Tunnel", 3, 0),
    StructureStats::new("Grass", 0, 0),
    StructureStats::new("Food", 0, 0),
];

impl StructureType {
    pub fn stats(self) -> &'static StructureStats {
        &STRUCTURE_STATS[self as usize]
    }

    /// Whether a carrying ant converts its load to food here
    pub fn is_dropoff(self) -> bool {
        matches!(self, StructureType::Anthill | StructureType::Tunnel)
    }
}
