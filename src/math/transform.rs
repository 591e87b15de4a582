use super::vec2::Vec2;

/// Wraps an angle in degrees to the range [0, 360).
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Pose of a body: position plus orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub orientation: f64,
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, orientation: f64) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            orientation: 0.0,
        }
    }

    /// Applies the transform (rotation then translation) to a point.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.orientation) + self.position
    }

    /// Applies the inverse transform (inverse translation then inverse rotation) to a point.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.orientation)
    }

    /// Rotates a direction into world space. Translation does not apply to directions.
    pub fn rotate_to_world(self, direction: Vec2) -> Vec2 {
        direction.rotate(self.orientation)
    }

    /// Rotates a world-space direction into this transform's local frame.
    pub fn rotate_to_local(self, direction: Vec2) -> Vec2 {
        direction.rotate(-self.orientation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
