//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a plant. Never reused within one garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(pub u64);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plant#{}", self.0)
    }
}

/// 2D position in the arena
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: &Position) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether the position lies inside `[0, width) x [0, height)`
    pub fn within(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.x < width && self.y >= 0.0 && self.y < height
    }
}

/// Partition of the collision registry. Only colliders of the same kind are
/// ever tested against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderKind {
    Roots,
}

impl fmt::Display for ColliderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColliderKind::Roots => write!(f, "roots"),
        }
    }
}

/// Handle to a registered collider. Equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle {
    pub kind: ColliderKind,
    pub id: u64,
}

impl ColliderHandle {
    pub fn new(kind: ColliderKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ColliderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_within_is_half_open() {
        assert!(Position::new(0.0, 0.0).within(10.0, 10.0));
        assert!(Position::new(9.5, 9.5).within(10.0, 10.0));
        assert!(!Position::new(10.0, 5.0).within(10.0, 10.0));
        assert!(!Position::new(5.0, -0.1).within(10.0, 10.0));
    }

    #[test]
    fn test_offset() {
        let pos = Position::new(1.0, 2.0).offset(-1.0, 0.5);
        assert_eq!(pos, Position::new(0.0, 2.5));
    }

    #[test]
    fn test_handle_display() {
        let handle = ColliderHandle::new(ColliderKind::Roots, 7);
        assert_eq!(handle.to_string(), "roots#7");
    }
}
