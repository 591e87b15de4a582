//! Contact resolution.
//!
//! Every resolver reads the contact and the bodies it references, checks its
//! precondition, and only then mutates the bodies in place. A contact whose
//! participants cannot absorb any correction is rejected with
//! `EngineError::NoMovableBody` and leaves every body untouched.

pub mod position;
pub mod velocity;

use crate::collision::Contact;
use crate::common::{PositionMode, ResolverConfig, VelocityMode};
use crate::error::{EngineError, EngineResult};
use crate::objects::{Body, BodyArena};

/// Mutable views of a contact's bodies in slot order. Slot 1 is `None` for
/// half-space contacts.
pub(crate) type BodyPair<'a> = [Option<&'a mut Body>; 2];

impl Contact {
    /// Borrows the referenced bodies from the arena.
    pub(crate) fn body_pair<'a>(&self, bodies: &'a mut BodyArena) -> EngineResult<BodyPair<'a>> {
        match self.second {
            Some(second) => {
                let (first, second) = bodies.pair_mut(self.first, second)?;
                Ok([Some(first), Some(second)])
            }
            None => Ok([Some(bodies.body_mut(self.first)?), None]),
        }
    }

    /// Applies the resolvers selected in `config`: position first, then
    /// velocity.
    pub fn resolve(&self, bodies: &mut BodyArena, config: &ResolverConfig) -> EngineResult<()> {
        match config.position_mode {
            PositionMode::Disabled => {}
            PositionMode::Linear => self.resolve_position(bodies)?,
            PositionMode::ExperimentalRotational => self.resolve_position_with_rotation(bodies)?,
        }
        match config.velocity_mode {
            VelocityMode::Disabled => {}
            VelocityMode::Linear => self.resolve_velocities(bodies, config.restitution)?,
            VelocityMode::ExperimentalRotational => {
                self.resolve_velocities_and_rotations(bodies, config.restitution)?
            }
        }
        Ok(())
    }
}

/// Inverse masses per slot; absent bodies count as zero.
pub(crate) fn inverse_masses(pair: &BodyPair<'_>) -> [f64; 2] {
    let mut masses = [0.0; 2];
    for (slot, body) in masses.iter_mut().zip(pair.iter()) {
        if let Some(body) = body {
            *slot = body.inverse_mass();
        }
    }
    masses
}

/// Rejects a zero, negative or non-finite divisor before any body is touched.
pub(crate) fn ensure_movable(total: f64) -> EngineResult<()> {
    if total > 0.0 && total.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NoMovableBody { total })
    }
}

/// Like `ensure_movable` but only zero is fatal; the experimental resolvers
/// can legitimately produce a negative combined term.
pub(crate) fn ensure_nonzero(total: f64) -> EngineResult<()> {
    if total != 0.0 && total.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NoMovableBody { total })
    }
}
