//! Bridge between the physics pipeline and ECS storage.

use hecs::{Entity, World};

use crate::physics::body_set::BodyStore;
use crate::physics::rigid_body::RigidBody;

/// Spawn a rigid body as an ECS entity.
pub fn spawn_body(world: &mut World, body: RigidBody) -> Entity {
    world.spawn((body,))
}

/// Entities with a [`RigidBody`] component, ordered by entity id so pair
/// order does not depend on archetype layout.
impl BodyStore for World {
    type Key = Entity;

    fn keys(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .query::<&RigidBody>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        entities.sort_by_key(|entity| entity.id());
        entities
    }

    fn body_mut(&mut self, key: Entity) -> Option<&mut RigidBody> {
        self.query_one_mut::<&mut RigidBody>(key).ok()
    }

    fn pair_mut(&mut self, a: Entity, b: Entity) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a == b {
            return None;
        }
        match self.query_many_mut::<&mut RigidBody, 2>([a, b]) {
            [Ok(a), Ok(b)] => Some((a, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::physics::collider::Shape;
    use crate::physics::{PhysicsConfig, PhysicsWorld};

    fn ball(x: f32, vx: f32) -> RigidBody {
        RigidBody::new_dynamic(Shape::circle(1.0).unwrap(), Vec2::new(x, 0.0), 1.0)
            .unwrap()
            .with_velocity(Vec2::new(vx, 0.0))
    }

    #[test]
    fn test_keys_skip_entities_without_body() {
        let mut world = World::new();
        let a = spawn_body(&mut world, ball(0.0, 0.0));
        world.spawn(("not a body",));
        let b = spawn_body(&mut world, ball(5.0, 0.0));

        assert_eq!(world.keys(), vec![a, b]);
    }

    #[test]
    fn test_pair_mut() {
        let mut world = World::new();
        let a = spawn_body(&mut world, ball(0.0, 0.0));
        let b = spawn_body(&mut world, ball(5.0, 0.0));
        let other = world.spawn(("not a body",));

        let (body_a, body_b) = world.pair_mut(a, b).unwrap();
        body_a.linear_velocity = Vec2::X;
        body_b.linear_velocity = Vec2::Y;
        assert_eq!(world.body_mut(a).unwrap().linear_velocity, Vec2::X);
        assert_eq!(world.body_mut(b).unwrap().linear_velocity, Vec2::Y);

        assert!(world.pair_mut(a, a).is_none());
        assert!(world.pair_mut(a, other).is_none());
        assert!(world.body_mut(other).is_none());
    }

    #[test]
    fn test_physics_world_steps_ecs() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default()).unwrap();

        let a = spawn_body(&mut world, ball(0.0, 2.0));
        let b = spawn_body(&mut world, ball(1.9, -2.0));

        physics.step(&mut world, 1.0 / 60.0);

        assert_eq!(physics.contacts().len(), 1);
        let va = world.body_mut(a).unwrap().linear_velocity;
        let vb = world.body_mut(b).unwrap().linear_velocity;
        // Head-on with equal masses: the balls now move apart
        assert!(va.x < 0.0);
        assert!(vb.x > 0.0);
    }
}
