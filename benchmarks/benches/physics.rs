//! Physics engine benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- narrowphase

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Affine2, Vec2};
use rein2d::physics::broadphase::AllPairs;
use rein2d::physics::collider::Shape;
use rein2d::physics::contact::Manifold;
use rein2d::physics::narrowphase::{circle_circle, detect_collision, polygon_polygon};
use rein2d::physics::rigid_body::{RigidBodyType, SurfaceMaterial};
use rein2d::physics::solver::{resolve_collision, ContactBody};
use rein2d_bench::*;

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadphase/all_pairs");
    for &n in &[100, 500, 1000] {
        let mut body_types = vec![RigidBodyType::Dynamic; n];
        body_types[0] = RigidBodyType::Static;
        let broadphase = AllPairs::new();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| broadphase.find_pairs(&body_types));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("narrowphase/circle_circle");
        group.bench_function("intersecting", |b| {
            b.iter(|| circle_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0));
        });
        group.bench_function("separated", |b| {
            b.iter(|| circle_circle(Vec2::ZERO, 1.0, Vec2::new(5.0, 0.0), 1.0));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/polygon_polygon");
        let a = box_vertices(2.0, 2.0);
        let hit: Vec<Vec2> = a.iter().map(|v| *v + Vec2::new(1.5, 0.2)).collect();
        let miss: Vec<Vec2> = a.iter().map(|v| *v + Vec2::new(5.0, 0.0)).collect();

        group.bench_function("intersecting", |b| {
            b.iter(|| polygon_polygon(&a, Vec2::ZERO, &hit, Vec2::new(1.5, 0.2), 0.0005));
        });
        group.bench_function("separated", |b| {
            b.iter(|| polygon_polygon(&a, Vec2::ZERO, &miss, Vec2::new(5.0, 0.0), 0.0005));
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("narrowphase/dispatch");
        let shapes = [
            Shape::Circle { radius: 0.5 },
            Shape::Polygon {
                vertices: box_vertices(1.0, 1.0),
            },
        ];
        let ta = Affine2::IDENTITY;
        let tb = Affine2::from_angle_translation(0.3, Vec2::new(0.8, 0.1));
        group.bench_function("all_shape_pairs", |b| {
            b.iter(|| {
                for sa in &shapes {
                    for sb in &shapes {
                        detect_collision(sa, &ta, sb, &tb);
                    }
                }
            });
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/resolve_collision");
    let manifold = Manifold {
        normal: Vec2::Y,
        penetration: 0.05,
        contacts: [Vec2::new(-0.5, 0.5), Vec2::new(0.5, 0.5)],
        contact_count: 2,
    };
    let material = SurfaceMaterial::default();

    group.bench_function("box_on_ground", |b| {
        b.iter(|| {
            let (mut va, mut wa) = (Vec2::ZERO, 0.0);
            let (mut vb, mut wb) = (Vec2::new(1.0, -3.0), 0.2);
            resolve_collision(
                &manifold,
                ContactBody {
                    center: Vec2::ZERO,
                    linear_velocity: &mut va,
                    angular_velocity: &mut wa,
                    inv_mass: 0.0,
                    inv_inertia: 0.0,
                    material,
                },
                ContactBody {
                    center: Vec2::new(0.0, 1.0),
                    linear_velocity: &mut vb,
                    angular_velocity: &mut wb,
                    inv_mass: 1.0,
                    inv_inertia: 6.0,
                    material,
                },
                0.7,
            )
        });
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn bench_pipeline(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("pipeline/step");
        group.sample_size(30);
        for &n in &[50, 100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_scene(n),
                    |(mut bodies, mut physics)| {
                        physics.step(&mut bodies, 1.0 / 60.0);
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/sustained_10steps");
        group.sample_size(20);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_scene(n),
                    |(mut bodies, mut physics)| {
                        for _ in 0..10 {
                            physics.step(&mut bodies, 1.0 / 60.0);
                        }
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/ecs_step");
        group.sample_size(30);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_ecs_scene(n),
                    |(mut world, mut physics)| {
                        physics.step(&mut world, 1.0 / 60.0);
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_broadphase,
    bench_narrowphase,
    bench_solver,
    bench_pipeline,
);
criterion_main!(benches);
