//! Kind-partitioned collider registry.

use garden_core::{ColliderHandle, ColliderKind, Error, Position, Result};
use std::collections::HashMap;
use tracing::trace;

/// A disc in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Position,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Position, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict overlap: discs that merely touch do not collide
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(&other.center) < self.radius + other.radius
    }
}

/// Geometry of a registered collider, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Roots(Circle),
}

impl ColliderShape {
    pub fn kind(&self) -> ColliderKind {
        match self {
            ColliderShape::Roots(_) => ColliderKind::Roots,
        }
    }

    /// Symmetric same-kind predicate
    pub fn collides_with(&self, other: &ColliderShape) -> bool {
        match (self, other) {
            (ColliderShape::Roots(a), ColliderShape::Roots(b)) => a.overlaps(b),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    handle: ColliderHandle,
    shape: ColliderShape,
}

/// Brute-force collision membership, one bucket per collider kind.
///
/// A kind's bucket is created by its first registration and survives even
/// when every collider of that kind has been removed. Querying a kind that was
/// never registered is an error; querying a kind with an empty bucket simply
/// finds nothing to collide with.
#[derive(Debug, Default)]
pub struct ColliderRegistry {
    buckets: HashMap<ColliderKind, Vec<Entry>>,
    next_id: u64,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider to the bucket of its kind
    pub fn register(&mut self, shape: ColliderShape) -> ColliderHandle {
        let handle = ColliderHandle::new(shape.kind(), self.next_id);
        self.next_id += 1;
        self.buckets
            .entry(handle.kind)
            .or_default()
            .push(Entry { handle, shape });
        trace!(collider = %handle, "Registered collider");
        handle
    }

    /// Detach a collider, returning its last known shape
    pub fn remove(&mut self, handle: ColliderHandle) -> Result<ColliderShape> {
        let bucket = self
            .buckets
            .get_mut(&handle.kind)
            .ok_or(Error::UnknownHandle(handle))?;
        let index = bucket
            .iter()
            .position(|entry| entry.handle == handle)
            .ok_or(Error::UnknownHandle(handle))?;
        trace!(collider = %handle, "Removed collider");
        Ok(bucket.swap_remove(index).shape)
    }

    /// Replace the geometry of a registered collider
    pub fn update(&mut self, handle: ColliderHandle, shape: ColliderShape) -> Result<()> {
        if shape.kind() != handle.kind {
            return Err(Error::Validation(format!(
                "cannot give {handle} a {} shape",
                shape.kind()
            )));
        }
        let entry = self
            .buckets
            .get_mut(&handle.kind)
            .and_then(|bucket| bucket.iter_mut().find(|entry| entry.handle == handle))
            .ok_or(Error::UnknownHandle(handle))?;
        entry.shape = shape;
        Ok(())
    }

    pub fn shape(&self, handle: ColliderHandle) -> Result<ColliderShape> {
        self.buckets
            .get(&handle.kind)
            .and_then(|bucket| bucket.iter().find(|entry| entry.handle == handle))
            .map(|entry| entry.shape)
            .ok_or(Error::UnknownHandle(handle))
    }

    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.shape(handle).is_ok()
    }

    /// Whether `kind` has ever been registered
    pub fn is_populated(&self, kind: ColliderKind) -> bool {
        self.buckets.contains_key(&kind)
    }

    /// Number of colliders currently registered under `kind`
    pub fn len(&self, kind: ColliderKind) -> usize {
        self.buckets.get(&kind).map_or(0, Vec::len)
    }

    /// First other collider of the same kind that `handle` overlaps
    pub fn first_collision(&self, handle: ColliderHandle) -> Result<Option<ColliderHandle>> {
        let bucket = self
            .buckets
            .get(&handle.kind)
            .ok_or(Error::KindNotPopulated(handle.kind))?;
        let shape = bucket
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.shape)
            .ok_or(Error::UnknownHandle(handle))?;

        Ok(bucket
            .iter()
            .filter(|other| other.handle != handle)
            .find(|other| shape.collides_with(&other.shape))
            .map(|other| other.handle))
    }

    pub fn is_colliding(&self, handle: ColliderHandle) -> Result<bool> {
        Ok(self.first_collision(handle)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roots(x: f32, y: f32, radius: f32) -> ColliderShape {
        ColliderShape::Roots(Circle::new(Position::new(x, y), radius))
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Circle::new(Position::new(0.0, 0.0), 2.0);
        let b = Circle::new(Position::new(5.0, 0.0), 3.0);
        assert!(!a.overlaps(&b));

        let c = Circle::new(Position::new(4.9, 0.0), 3.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_unpopulated_kind_is_an_error() {
        let registry = ColliderRegistry::new();
        let handle = ColliderHandle::new(ColliderKind::Roots, 0);
        assert!(matches!(
            registry.is_colliding(handle),
            Err(Error::KindNotPopulated(ColliderKind::Roots))
        ));
    }

    #[test]
    fn test_self_is_never_a_collision() {
        let mut registry = ColliderRegistry::new();
        let handle = registry.register(roots(0.0, 0.0, 10.0));
        assert!(!registry.is_colliding(handle).unwrap());
    }

    #[test]
    fn test_detects_overlapping_pair() {
        let mut registry = ColliderRegistry::new();
        let a = registry.register(roots(0.0, 0.0, 3.0));
        let b = registry.register(roots(4.0, 0.0, 3.0));
        let far = registry.register(roots(100.0, 100.0, 1.0));

        assert_eq!(registry.first_collision(a).unwrap(), Some(b));
        assert_eq!(registry.first_collision(b).unwrap(), Some(a));
        assert!(!registry.is_colliding(far).unwrap());
    }

    #[test]
    fn test_removed_collider_is_never_reported() {
        let mut registry = ColliderRegistry::new();
        let stays = registry.register(roots(0.0, 0.0, 5.0));
        let leaves = registry.register(roots(1.0, 1.0, 5.0));
        assert!(registry.is_colliding(stays).unwrap());

        registry.remove(leaves).unwrap();
        assert!(!registry.contains(leaves));
        assert_eq!(registry.first_collision(stays).unwrap(), None);
        assert!(matches!(
            registry.is_colliding(leaves),
            Err(Error::UnknownHandle(_))
        ));
    }

    #[test]
    fn test_empty_bucket_stays_populated() {
        let mut registry = ColliderRegistry::new();
        let only = registry.register(roots(0.0, 0.0, 1.0));
        registry.remove(only).unwrap();

        assert!(registry.is_populated(ColliderKind::Roots));
        assert_eq!(registry.len(ColliderKind::Roots), 0);

        let again = registry.register(roots(0.0, 0.0, 1.0));
        assert!(!registry.is_colliding(again).unwrap());
    }

    #[test]
    fn test_remove_twice_fails() {
        let mut registry = ColliderRegistry::new();
        let handle = registry.register(roots(0.0, 0.0, 1.0));
        assert!(registry.remove(handle).is_ok());
        assert!(matches!(
            registry.remove(handle),
            Err(Error::UnknownHandle(h)) if h == handle
        ));
    }

    #[test]
    fn test_update_changes_outcome() {
        let mut registry = ColliderRegistry::new();
        let a = registry.register(roots(0.0, 0.0, 0.0));
        let _b = registry.register(roots(10.0, 0.0, 0.0));
        assert!(!registry.is_colliding(a).unwrap());

        registry.update(a, roots(0.0, 0.0, 11.0)).unwrap();
        assert!(registry.is_colliding(a).unwrap());
        assert_eq!(registry.shape(a).unwrap(), roots(0.0, 0.0, 11.0));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut registry = ColliderRegistry::new();
        let a = registry.register(roots(0.0, 0.0, 1.0));
        registry.remove(a).unwrap();
        let b = registry.register(roots(0.0, 0.0, 1.0));
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.0f32..300.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.0f32..300.0,
        ) {
            let a = roots(ax, ay, ar);
            let b = roots(bx, by, br);
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));

            let mut registry = ColliderRegistry::new();
            let ha = registry.register(a);
            let hb = registry.register(b);
            prop_assert_eq!(registry.is_colliding(ha).unwrap(), registry.is_colliding(hb).unwrap());
        }
    }
}
