//! 2D rigid-body physics: collision detection and impulse-based response.
//!
//! # Architecture
//!
//! Each step runs a fixed sequence:
//!
//! 1. Integrate every dynamic body (position, orientation, damped velocities)
//! 2. Enumerate body pairs in storage order, skipping static-static pairs
//! 3. Narrowphase collision detection (SAT for circles and convex polygons)
//! 4. Positional correction along the contact normal
//! 5. Resolve normal and friction impulses
//!
//! Pairs are handled one after another, so a pair sees the corrections and
//! impulses applied to earlier pairs in the same step.

pub mod body_set;
pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod geometry;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;
use tracing::{debug, trace, warn};

use crate::error::PhysicsError;

use self::body_set::BodyStore;
use self::broadphase::AllPairs;
use self::contact::Manifold;
use self::narrowphase::{detect_body_collision, DEFAULT_CONTACT_EPSILON};
use self::solver::{
    apply_positional_correction, resolve_collision, ContactImpulses, PositionCorrection,
};

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Acceleration added to every dynamic body. Default: zero.
    pub gravity: Vec2,
    /// Velocity decay per second, applied as `damping^dt`. Default: 0.8.
    pub damping: f32,
    /// Coefficient of restitution for every contact. Default: 0.7.
    pub restitution: f32,
    /// Positional correction parameters.
    pub correction: PositionCorrection,
    /// Tolerance for tied contact distances. Default: 0.0005.
    pub contact_epsilon: f32,
    /// Fixed timestep for [`PhysicsWorld::advance`] in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of steps per [`PhysicsWorld::advance`] call. Default: 4.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            damping: 0.8,
            restitution: 0.7,
            correction: PositionCorrection::default(),
            contact_epsilon: DEFAULT_CONTACT_EPSILON,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig("gravity must be finite"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(PhysicsError::InvalidConfig("damping must be in (0, 1]"));
        }
        if !(self.restitution.is_finite() && self.restitution >= 0.0) {
            return Err(PhysicsError::InvalidConfig(
                "restitution must be finite and non-negative",
            ));
        }
        if !(self.correction.percent >= 0.0 && self.correction.percent <= 1.0) {
            return Err(PhysicsError::InvalidConfig(
                "correction percent must be in [0, 1]",
            ));
        }
        if !(self.correction.slop.is_finite() && self.correction.slop >= 0.0) {
            return Err(PhysicsError::InvalidConfig(
                "correction slop must be finite and non-negative",
            ));
        }
        if !(self.contact_epsilon.is_finite() && self.contact_epsilon > 0.0) {
            return Err(PhysicsError::InvalidConfig("contact epsilon must be positive"));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig("fixed timestep must be positive"));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidConfig("max substeps must be at least 1"));
        }
        Ok(())
    }
}

/// A contact resolved during the last step.
///
/// `first` and `second` are positions in the store's key order, `first < second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub first: usize,
    pub second: usize,
    pub manifold: Manifold,
    pub impulses: ContactImpulses,
}

/// The physics world: configuration, timestep accumulator and last contacts.
///
/// Bodies are owned by the caller and passed in through a [`BodyStore`].
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    broadphase: AllPairs,
    contacts: Vec<ContactPair>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            accumulator: 0.0,
            broadphase: AllPairs::new(),
            contacts: Vec::new(),
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Contacts resolved during the most recent step.
    pub fn contacts(&self) -> &[ContactPair] {
        &self.contacts
    }

    /// Advance the simulation by `frame_time` seconds in fixed steps.
    ///
    /// Runs at most `max_substeps` steps. If the simulation falls further
    /// behind than that, the backlog is dropped. Returns the number of steps run.
    pub fn advance<S: BodyStore + ?Sized>(&mut self, bodies: &mut S, frame_time: f64) -> u32 {
        self.accumulator += frame_time.max(0.0);

        let fixed_timestep = self.config.fixed_timestep;
        let mut substeps = 0u32;
        while self.accumulator >= fixed_timestep && substeps < self.config.max_substeps {
            self.step(bodies, fixed_timestep as f32);
            self.accumulator -= fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > fixed_timestep * self.config.max_substeps as f64 {
            warn!(
                dropped = self.accumulator,
                "physics falling behind, dropping accumulated time"
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run one simulation step of `dt` seconds.
    pub fn step<S: BodyStore + ?Sized>(&mut self, bodies: &mut S, dt: f32) {
        let all_keys = bodies.keys();
        let mut keys = Vec::with_capacity(all_keys.len());
        let mut body_types = Vec::with_capacity(all_keys.len());

        for key in all_keys {
            if let Some(body) = bodies.body_mut(key) {
                body.integrate(dt, self.config.damping, self.config.gravity);
                keys.push(key);
                body_types.push(body.body_type);
            }
        }

        let pairs = self.broadphase.find_pairs(&body_types);

        self.contacts.clear();
        for &(i, j) in &pairs {
            let Some((a, b)) = bodies.pair_mut(keys[i], keys[j]) else {
                continue;
            };
            let Some(manifold) = detect_body_collision(a, b, self.config.contact_epsilon) else {
                continue;
            };
            trace!(
                first = ?keys[i],
                second = ?keys[j],
                penetration = manifold.penetration,
                contact_count = manifold.contact_count,
                "contact"
            );

            apply_positional_correction(
                &mut a.position,
                &mut b.position,
                a.inv_mass,
                b.inv_mass,
                manifold.penetration,
                manifold.normal,
                &self.config.correction,
            );

            let impulses = resolve_collision(
                &manifold,
                a.contact_body(),
                b.contact_body(),
                self.config.restitution,
            );

            self.contacts.push(ContactPair {
                first: i,
                second: j,
                manifold,
                impulses,
            });
        }

        debug!(
            bodies = keys.len(),
            pairs = pairs.len(),
            contacts = self.contacts.len(),
            "physics step"
        );
    }
}
