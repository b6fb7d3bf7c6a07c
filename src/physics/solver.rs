//! Impulse-based contact resolution with Coulomb friction, and positional
//! correction.

use glam::Vec2;

use super::contact::Manifold;
use super::rigid_body::SurfaceMaterial;

/// Effective masses and tangent lengths below this are treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Fraction of the penetration removed per step and the penetration allowed
/// before any correction is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionCorrection {
    pub percent: f32,
    pub slop: f32,
}

impl Default for PositionCorrection {
    fn default() -> Self {
        Self {
            percent: 0.2,
            slop: 0.01,
        }
    }
}

/// The state of one body the resolver reads and writes.
///
/// Velocities are borrowed so impulses land directly in the body that owns them.
#[derive(Debug)]
pub struct ContactBody<'a> {
    pub center: Vec2,
    pub linear_velocity: &'a mut Vec2,
    pub angular_velocity: &'a mut f32,
    pub inv_mass: f32,
    pub inv_inertia: f32,
    pub material: SurfaceMaterial,
}

impl ContactBody<'_> {
    /// Velocity of the material point at offset `r` from the center.
    #[inline]
    fn point_velocity(&self, r: Vec2) -> Vec2 {
        *self.linear_velocity + r.perp() * *self.angular_velocity
    }

    #[inline]
    fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        *self.linear_velocity += impulse * self.inv_mass;
        *self.angular_velocity += r.perp_dot(impulse) * self.inv_inertia;
    }

    /// Inverse effective mass contribution along `direction` at offset `r`.
    #[inline]
    fn inverse_effective_mass(&self, r: Vec2, direction: Vec2) -> f32 {
        let r_perp_dot = r.perp().dot(direction);
        self.inv_mass + r_perp_dot * r_perp_dot * self.inv_inertia
    }
}

/// Impulses applied by [`resolve_collision`]. Only the first `contact_count`
/// entries are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactImpulses {
    /// Normal impulse magnitude per contact (0 when ignored).
    pub normal: [f32; 2],
    /// Signed friction impulse along the contact tangent.
    pub friction: [f32; 2],
    /// Contacts that were separating or had no effective mass.
    pub ignored: [bool; 2],
    pub contact_count: usize,
}

/// Resolve a contact by applying normal and friction impulses to both bodies.
///
/// The manifold normal points from `a` to `b`. Normal impulses for every
/// contact are computed from the incoming velocities and applied together;
/// friction is then computed from the updated velocities. With two contacts
/// each impulse is halved so the pair receives the same total impulse as a
/// single contact would.
pub fn resolve_collision(
    manifold: &Manifold,
    mut a: ContactBody<'_>,
    mut b: ContactBody<'_>,
    restitution: f32,
) -> ContactImpulses {
    let normal = manifold.normal;
    let count = manifold.contact_count.clamp(1, 2);
    let share = count as f32;

    let mut result = ContactImpulses {
        contact_count: count,
        ..Default::default()
    };
    let mut arms = [(Vec2::ZERO, Vec2::ZERO); 2];

    for i in 0..count {
        let contact = manifold.contacts[i];
        let r_a = contact - a.center;
        let r_b = contact - b.center;
        arms[i] = (r_a, r_b);

        let relative_velocity = b.point_velocity(r_b) - a.point_velocity(r_a);
        let contact_velocity = relative_velocity.dot(normal);
        if contact_velocity >= 0.0 {
            result.ignored[i] = true;
            continue;
        }

        let denom = a.inverse_effective_mass(r_a, normal) + b.inverse_effective_mass(r_b, normal);
        if denom <= DEGENERATE_EPSILON {
            tracing::trace!(contact = i, denom, "skipping contact without effective mass");
            result.ignored[i] = true;
            continue;
        }

        result.normal[i] = -(1.0 + restitution) * contact_velocity / denom / share;
    }

    for i in 0..count {
        if result.ignored[i] {
            continue;
        }
        let (r_a, r_b) = arms[i];
        let impulse = normal * result.normal[i];
        a.apply_impulse(-impulse, r_a);
        b.apply_impulse(impulse, r_b);
    }

    let static_friction = a.material.static_friction_with(&b.material);
    let dynamic_friction = a.material.dynamic_friction_with(&b.material);
    let mut tangents = [Vec2::ZERO; 2];

    for i in 0..count {
        if result.ignored[i] {
            continue;
        }
        let (r_a, r_b) = arms[i];

        let relative_velocity = b.point_velocity(r_b) - a.point_velocity(r_a);
        let tangential = relative_velocity - normal * relative_velocity.dot(normal);
        let tangent_len = tangential.length();
        if tangent_len <= DEGENERATE_EPSILON {
            continue;
        }
        let tangent = tangential / tangent_len;

        let denom = a.inverse_effective_mass(r_a, tangent) + b.inverse_effective_mass(r_b, tangent);
        if denom <= DEGENERATE_EPSILON {
            continue;
        }

        let jt = -relative_velocity.dot(tangent) / denom / share;
        let j = result.normal[i];

        // Coulomb: static friction holds up to j * mu_s, beyond that the
        // contact slides with dynamic friction.
        result.friction[i] = if jt.abs() <= j * static_friction {
            jt
        } else {
            -j * dynamic_friction
        };
        tangents[i] = tangent;
    }

    for i in 0..count {
        if result.friction[i] == 0.0 {
            continue;
        }
        let (r_a, r_b) = arms[i];
        let impulse = tangents[i] * result.friction[i];
        a.apply_impulse(-impulse, r_a);
        b.apply_impulse(impulse, r_b);
    }

    result
}

/// Push two overlapping bodies apart along `normal` (from A to B).
///
/// Only the penetration beyond `slop` is corrected, scaled by `percent` and
/// split by inverse mass. Two immovable bodies are left alone.
pub fn apply_positional_correction(
    pos_a: &mut Vec2,
    pos_b: &mut Vec2,
    inv_mass_a: f32,
    inv_mass_b: f32,
    penetration: f32,
    normal: Vec2,
    params: &PositionCorrection,
) {
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= DEGENERATE_EPSILON {
        return;
    }

    let correction =
        (penetration - params.slop).max(0.0) / inv_mass_sum * params.percent * normal;
    *pos_a -= correction * inv_mass_a;
    *pos_b += correction * inv_mass_b;
}
