use tracing::debug;

use super::{ensure_movable, ensure_nonzero, inverse_masses};
use crate::collision::Contact;
use crate::error::EngineResult;
use crate::math::Vec2;
use crate::objects::BodyArena;

impl Contact {
    /// Impulse exchange along the contact normal, ignoring rotation.
    ///
    /// The closing speed is the magnitude of `(v0 - v1) . normal`, so the
    /// impulse always pushes body 0 along the normal whatever the sign of the
    /// approach. Bodies that are not moving relative to each other receive a
    /// zero impulse.
    pub fn resolve_velocities(&self, bodies: &mut BodyArena, restitution: f64) -> EngineResult<()> {
        let mut pair = self.body_pair(bodies)?;
        let inverse_mass = inverse_masses(&pair);
        let velocity_per_impulse = inverse_mass[0] + inverse_mass[1];
        ensure_movable(velocity_per_impulse)?;

        let mut closing_velocity = Vec2::ZERO;
        for (i, body) in pair.iter().enumerate() {
            if let Some(body) = body {
                let sign = if i == 0 { 1.0 } else { -1.0 };
                closing_velocity.add_scaled(body.velocity(), sign);
            }
        }
        let closing_speed = self.normal.dot(closing_velocity).abs();

        let desired_change = -(1.0 + restitution) * closing_speed;
        let impulse_magnitude = desired_change / velocity_per_impulse;
        let impulse = -self.normal * impulse_magnitude;

        for (i, body) in pair.iter_mut().enumerate() {
            if let Some(body) = body {
                let applied = if i == 0 { impulse } else { -impulse };
                body.add_velocity(applied * inverse_mass[i]);
            }
        }

        debug!(closing_speed, restitution, %impulse, "velocities resolved");
        Ok(())
    }

    /// Experimental, known defect: impulse exchange with a rotational term.
    ///
    /// Each body's contact offset is taken into its local frame and turned
    /// into an extra "velocity per unit impulse" through the inverse inertia.
    /// That rotational term dominates the denominator and suppresses most of
    /// the linear response. Offsets stay in local space while the impulse is
    /// in world space when the angular change is computed. Kept as-is behind
    /// `VelocityMode::ExperimentalRotational`.
    pub fn resolve_velocities_and_rotations(
        &self,
        bodies: &mut BodyArena,
        restitution: f64,
    ) -> EngineResult<()> {
        let mut pair = self.body_pair(bodies)?;
        let inverse_mass = inverse_masses(&pair);

        let mut relative_contact = [Vec2::ZERO; 2];
        let mut linear_per_impulse = 0.0;
        let mut rotational_per_impulse = 0.0;
        let mut linear_closing = Vec2::ZERO;
        let mut rotational_closing = Vec2::ZERO;

        for (i, body) in pair.iter().enumerate() {
            let Some(body) = body else {
                continue;
            };
            let pose = body.transform();
            let offset = pose.apply_inverse(self.point);
            relative_contact[i] = offset;

            linear_per_impulse += inverse_mass[i];

            let relative_normal = pose.rotate_to_local(self.normal);
            let torque_per_impulse = offset.cross(relative_normal);
            let rotation_per_impulse = torque_per_impulse * body.inverse_inertia();
            let velocity_per_impulse = Vec2::new(
                -offset.y * rotation_per_impulse,
                offset.x * rotation_per_impulse,
            );
            if velocity_per_impulse.magnitude() != 0.0 {
                rotational_per_impulse += relative_normal.dot(velocity_per_impulse).abs();
            }

            let sign = if i == 0 { 1.0 } else { -1.0 };
            let spin = body.angular_velocity().to_radians();
            linear_closing.add_scaled(body.velocity(), sign);
            rotational_closing.add_scaled(Vec2::new(-offset.y * spin, offset.x * spin), sign);
        }

        let per_impulse = linear_per_impulse + rotational_per_impulse;
        ensure_nonzero(per_impulse)?;

        let contact_velocity =
            self.normal.dot(linear_closing).abs() + self.normal.dot(rotational_closing).abs();
        let desired_change = -contact_velocity * (1.0 + restitution);
        let impulse_magnitude = desired_change / per_impulse;
        let impulse = -self.normal * impulse_magnitude;

        for (i, body) in pair.iter_mut().enumerate() {
            if let Some(body) = body {
                let applied = if i == 1 { -impulse } else { impulse };
                body.add_velocity(applied * inverse_mass[i]);
                body.add_angular_velocity(relative_contact[i].cross(applied) * body.inverse_inertia());
            }
        }

        debug!(
            contact_velocity,
            linear_per_impulse,
            rotational_per_impulse,
            %impulse,
            "velocities resolved with rotation"
        );
        Ok(())
    }
}
