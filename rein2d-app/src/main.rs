//! Headless demo: a few bodies dropped onto the ground, stepped at a fixed
//! rate. Run with `RUST_LOG=info` (or `debug` for per-step summaries).

use anyhow::Context;
use glam::Vec2;
use rein2d::ecs::spawn_body;
use rein2d::{BodyStore, PhysicsConfig, PhysicsWorld, RigidBody, Shape, SurfaceMaterial};

const FRAME_TIME: f64 = 1.0 / 60.0;

fn build_scene(world: &mut hecs::World) -> anyhow::Result<Vec<(&'static str, hecs::Entity)>> {
    let mut named = Vec::new();

    let ground = RigidBody::new_static(Shape::rectangle(20.0, 1.0)?, Vec2::new(0.0, -0.5));
    named.push(("ground", spawn_body(world, ground)));

    let ramp = RigidBody::new_static(Shape::rectangle(6.0, 0.4)?, Vec2::new(-4.0, 2.0))
        .with_orientation(-0.35);
    named.push(("ramp", spawn_body(world, ramp)));

    let crate_box = RigidBody::new_dynamic(Shape::rectangle(1.0, 1.0)?, Vec2::new(0.0, 3.0), 1.0)?
        .with_orientation(0.4);
    named.push(("box", spawn_body(world, crate_box)));

    let ball = RigidBody::new_dynamic(Shape::circle(0.4)?, Vec2::new(-5.5, 4.0), 0.5)?
        .with_material(SurfaceMaterial::FRICTIONLESS);
    named.push(("ball", spawn_body(world, ball)));

    let triangle = RigidBody::new_dynamic(
        Shape::polygon(vec![
            Vec2::new(-0.6, -1.0 / 3.0),
            Vec2::new(0.6, -1.0 / 3.0),
            Vec2::new(0.0, 2.0 / 3.0),
        ])?,
        Vec2::new(2.5, 5.0),
        0.8,
    )?
    .with_velocity(Vec2::new(-1.0, 0.0))
    .with_angular_velocity(2.0);
    named.push(("triangle", spawn_body(world, triangle)));

    Ok(named)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let frames: u32 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count: {arg}"))?,
        None => 300,
    };

    let config = PhysicsConfig {
        gravity: Vec2::new(0.0, -9.81),
        ..Default::default()
    };
    let mut physics = PhysicsWorld::new(config)?;
    let mut world = hecs::World::new();
    let bodies = build_scene(&mut world)?;

    log::info!("simulating {} bodies for {frames} frames", bodies.len());

    let mut total_steps = 0;
    for frame in 0..frames {
        total_steps += physics.advance(&mut world, FRAME_TIME);

        if frame % 60 == 0 || frame + 1 == frames {
            for (name, entity) in &bodies {
                let body = world
                    .body_mut(*entity)
                    .with_context(|| format!("{name} lost its rigid body"))?;
                log::info!(
                    "frame {frame:>4} {name:<8} pos=({:>7.3}, {:>7.3}) angle={:>6.3} vel=({:>6.3}, {:>6.3})",
                    body.position.x,
                    body.position.y,
                    body.orientation,
                    body.linear_velocity.x,
                    body.linear_velocity.y,
                );
            }
            log::info!("frame {frame:>4} contacts={}", physics.contacts().len());
        }
    }

    log::info!("done after {total_steps} steps");
    Ok(())
}
