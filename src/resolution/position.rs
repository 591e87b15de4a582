use tracing::debug;

use super::{ensure_movable, ensure_nonzero, inverse_masses};
use crate::collision::Contact;
use crate::error::EngineResult;
use crate::math::Vec2;
use crate::objects::BodyArena;

impl Contact {
    /// Removes the penetration by moving the bodies apart along the normal,
    /// each in proportion to its inverse mass.
    ///
    /// Body 0 moves along the normal, body 1 against it. Absent bodies take
    /// no share. Stateless: repeating the call on unchanged input repeats the
    /// same displacement.
    pub fn resolve_position(&self, bodies: &mut BodyArena) -> EngineResult<()> {
        let mut pair = self.body_pair(bodies)?;
        let inverse_mass = inverse_masses(&pair);
        let total_inverse_mass = inverse_mass[0] + inverse_mass[1];
        ensure_movable(total_inverse_mass)?;

        let movement = [
            self.penetration * inverse_mass[0] / total_inverse_mass,
            -self.penetration * inverse_mass[1] / total_inverse_mass,
        ];

        for (body, amount) in pair.iter_mut().zip(movement) {
            if let Some(body) = body {
                body.translate(self.normal * amount);
            }
        }

        debug!(
            penetration = self.penetration,
            first_move = movement[0],
            second_move = movement[1],
            "position resolved"
        );
        Ok(())
    }

    /// Experimental, unvalidated: adds a rotational share to
    /// `resolve_position`.
    ///
    /// The contact point and normal are taken into each body's frame and the
    /// scalar `local_point x local_normal * inverse_inertia` is treated as an
    /// angular inertia alongside the inverse mass. The resulting angular move
    /// is added straight onto the orientation in degrees, which is not
    /// dimensionally consistent with the linear move.
    pub fn resolve_position_with_rotation(&self, bodies: &mut BodyArena) -> EngineResult<()> {
        let mut pair = self.body_pair(bodies)?;
        let inverse_mass = inverse_masses(&pair);

        let mut angular_inertia = [0.0; 2];
        let mut total_inertia = 0.0;
        for (i, body) in pair.iter().enumerate() {
            let Some(body) = body else {
                continue;
            };
            let pose = body.transform();
            let local_point = pose.apply_inverse(self.point);
            let local_normal = pose.rotate_to_local(self.normal);
            angular_inertia[i] = local_point.cross(local_normal) * body.inverse_inertia();
            total_inertia += inverse_mass[i] + angular_inertia[i];
        }
        ensure_nonzero(total_inertia)?;

        let linear_move = [
            self.penetration * inverse_mass[0] / total_inertia,
            -self.penetration * inverse_mass[1] / total_inertia,
        ];
        let angular_move = [
            self.penetration * angular_inertia[0] / total_inertia,
            -self.penetration * angular_inertia[1] / total_inertia,
        ];

        for (i, body) in pair.iter_mut().enumerate() {
            if let Some(body) = body {
                body.translate(self.normal * linear_move[i]);
                body.rotate(angular_move[i]);
            }
        }

        debug!(
            penetration = self.penetration,
            total_inertia,
            first_turn = angular_move[0],
            second_turn = angular_move[1],
            "position resolved with rotation"
        );
        Ok(())
    }
}

/// Displacement `resolve_position` would apply to each slot, without
/// touching the bodies.
pub fn linear_position_moves(contact: &Contact, bodies: &BodyArena) -> EngineResult<[Vec2; 2]> {
    let mut inverse_mass = [0.0; 2];
    for (slot, handle) in inverse_mass.iter_mut().zip([Some(contact.first), contact.second]) {
        if let Some(handle) = handle {
            *slot = bodies.body(handle)?.inverse_mass();
        }
    }
    let total = inverse_mass[0] + inverse_mass[1];
    ensure_movable(total)?;
    Ok([
        contact.normal * (contact.penetration * inverse_mass[0] / total),
        contact.normal * (-contact.penetration * inverse_mass[1] / total),
    ])
}
