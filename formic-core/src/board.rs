//! Square board geometry with integer coordinates

use serde::{Deserialize, Serialize};

/// Board side length (the board is BOARD_SIZE x BOARD_SIZE)
pub const BOARD_SIZE: i8 = 10;

/// A square on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan_to(&self, other: Coord) -> i32 {
        (self.x - other.x).abs() as i32 + (self.y - other.y).abs() as i32
    }

    /// Squared Euclidean distance to another coordinate
    pub fn dist_sq_to(&self, other: Coord) -> i32 {
        let dx = (self.x - other.x) as i32;
        let dy = (self.y - other.y) as i32;
        dx * dx + dy * dy
    }

    /// Get neighbor in direction (0-3)
    pub fn neighbor(&self, direction: u8) -> Coord {
        let (dx, dy) = DIRECTIONS[direction as usize % 4];
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Iterate the on-board orthogonal neighbors
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| Coord::new(self.x + dx, self.y + dy))
            .filter(|c| c.is_valid())
    }
}

/// Direction vectors (dx, dy)
/// Index: 0=N, 1=E, 2=S, 3=W
pub const DIRECTIONS: [(i8, i8); 4] = [
    (0, -1), // N
    (1, 0),  // E
    (0, 1),  // S
    (-1, 0), // W
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_validity() {
        assert!(Coord::new(0, 0).is_valid());
        assert!(Coord::new(9, 9).is_valid());
        assert!(Coord::new(5, 0).is_valid());
        assert!(!Coord::new(10, 0).is_valid());
        assert!(!Coord::new(0, 10).is_valid());
        assert!(!Coord::new(-1, 3).is_valid());
    }

    #[test]
    fn test_distance() {
        assert_eq!(Coord::new(0, 0).manhattan_to(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(2, 2).manhattan_to(Coord::new(2, 2)), 0);
        assert_eq!(Coord::new(0, 0).dist_sq_to(Coord::new(3, 4)), 25);
    }

    #[test]
    fn test_neighbors() {
        let corner: Vec<_> = Coord::new(0, 0).neighbors().collect();
        assert_eq!(corner.len(), 2);

        let center: Vec<_> = Coord::new(5, 5).neighbors().collect();
        assert_eq!(center.len(), 4);
    }
}
