//! Body storage: the accessor trait the world steps over, and an arena-backed set.

use std::fmt::Debug;

use thunderdome::{Arena, Index};

use super::rigid_body::RigidBody;

/// Mutable access to a collection of rigid bodies.
///
/// The world only needs the keys in a stable order and mutable access to one
/// body or two distinct bodies at a time.
pub trait BodyStore {
    type Key: Copy + Debug;

    /// Keys of all bodies, in storage order. Pair iteration follows this order.
    fn keys(&self) -> Vec<Self::Key>;

    fn body_mut(&mut self, key: Self::Key) -> Option<&mut RigidBody>;

    /// Two distinct bodies at once. `None` if either key is missing or both
    /// keys are the same.
    fn pair_mut(&mut self, a: Self::Key, b: Self::Key)
        -> Option<(&mut RigidBody, &mut RigidBody)>;
}

/// Handle to a body in a [`BodySet`]. Stale handles never alias new bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(Index);

impl BodyHandle {
    /// Slot of the body in the arena.
    pub fn index(&self) -> u32 {
        self.0.slot()
    }
}

/// Generational arena of rigid bodies.
#[derive(Debug, Default)]
pub struct BodySet {
    bodies: Arena<RigidBody>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        BodyHandle(self.bodies.insert(body))
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle.0)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter().map(|(index, body)| (BodyHandle(index), body))
    }
}

impl BodyStore for BodySet {
    type Key = BodyHandle;

    fn keys(&self) -> Vec<BodyHandle> {
        self.bodies.iter().map(|(index, _)| BodyHandle(index)).collect()
    }

    fn body_mut(&mut self, key: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key.0)
    }

    fn pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a == b {
            return None;
        }
        match self.bodies.get2_mut(a.0, b.0) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::physics::collider::Shape;

    fn ball(x: f32) -> RigidBody {
        RigidBody::new_dynamic(Shape::circle(0.5).unwrap(), Vec2::new(x, 0.0), 1.0).unwrap()
    }

    #[test]
    fn test_insert_get_remove() {
        let mut set = BodySet::new();
        assert!(set.is_empty());

        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(b).map(|body| body.position.x), Some(2.0));

        set.get_mut(a).unwrap().position.x = 5.0;
        assert_eq!(set.get(a).unwrap().position.x, 5.0);

        assert!(set.remove(a).is_some());
        assert!(set.get(a).is_none());
        assert!(set.remove(a).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut set = BodySet::new();
        let old = set.insert(ball(1.0));
        set.remove(old);
        let new = set.insert(ball(2.0));

        // Same slot, different generation
        assert_eq!(old.index(), new.index());
        assert!(set.get(old).is_none());
        assert!(set.get(new).is_some());
    }

    #[test]
    fn test_keys_in_slot_order() {
        let mut set = BodySet::new();
        let handles: Vec<_> = (0..4).map(|i| set.insert(ball(i as f32))).collect();
        assert_eq!(set.keys(), handles);

        let xs: Vec<f32> = set.iter().map(|(_, body)| body.position.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pair_mut() {
        let mut set = BodySet::new();
        let a = set.insert(ball(1.0));
        let b = set.insert(ball(2.0));

        let (body_a, body_b) = set.pair_mut(a, b).unwrap();
        body_a.linear_velocity = Vec2::X;
        body_b.linear_velocity = Vec2::Y;
        assert_eq!(set.get(a).unwrap().linear_velocity, Vec2::X);
        assert_eq!(set.get(b).unwrap().linear_velocity, Vec2::Y);

        assert!(set.pair_mut(a, a).is_none());
        set.remove(b);
        assert!(set.pair_mut(a, b).is_none());
    }
}
