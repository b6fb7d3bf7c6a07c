//! Scene setup shared by the physics benchmarks.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rein2d::physics::body_set::BodySet;
use rein2d::physics::collider::Shape;
use rein2d::physics::rigid_body::RigidBody;
use rein2d::{PhysicsConfig, PhysicsWorld};

fn random_body(rng: &mut StdRng, extent: f32) -> RigidBody {
    let position = Vec2::new(rng.gen_range(-extent..extent), rng.gen_range(0.0..2.0 * extent));
    let shape = if rng.gen_bool(0.5) {
        Shape::Circle {
            radius: rng.gen_range(0.2..0.6),
        }
    } else {
        Shape::Polygon {
            vertices: box_vertices(rng.gen_range(0.4..1.2), rng.gen_range(0.4..1.2)),
        }
    };
    let mass = shape.area().max(0.05);
    RigidBody::new_dynamic(shape, position, mass)
        .expect("positive mass")
        .with_orientation(rng.gen_range(0.0..std::f32::consts::TAU))
        .with_velocity(Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)))
}

pub fn box_vertices(width: f32, height: f32) -> Vec<Vec2> {
    let hw = width * 0.5;
    let hh = height * 0.5;
    vec![
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
}

/// Static ground plus `n` mixed circles and boxes packed densely above it.
pub fn setup_scene(n: usize) -> (BodySet, PhysicsWorld) {
    let mut bodies = BodySet::new();
    bodies.insert(RigidBody::new_static(
        Shape::Polygon {
            vertices: box_vertices(200.0, 1.0),
        },
        Vec2::new(0.0, -0.5),
    ));

    let extent = (n as f32).sqrt() * 0.6;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..n {
        bodies.insert(random_body(&mut rng, extent));
    }

    let config = PhysicsConfig {
        gravity: Vec2::new(0.0, -9.81),
        ..Default::default()
    };
    let physics = PhysicsWorld::new(config).expect("valid physics config");
    (bodies, physics)
}

/// Same scene as [`setup_scene`] stored in a `hecs::World`.
pub fn setup_ecs_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let (bodies, physics) = setup_scene(n);
    let mut world = hecs::World::new();
    for (_, body) in bodies.iter() {
        rein2d::ecs::spawn_body(&mut world, body.clone());
    }
    (world, physics)
}
