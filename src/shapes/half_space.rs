use crate::math::Vec2;

/// Everything behind an infinite line: `{p : normal . p <= offset}`.
/// Negative normals need a negative offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpace {
    normal: Vec2,
    pub offset: f64,
}

impl HalfSpace {
    /// The normal is normalized on construction.
    pub fn new(normal: Vec2, offset: f64) -> Self {
        assert!(
            normal.magnitude_squared() > 0.0,
            "HalfSpace normal cannot be zero"
        );
        Self {
            normal: normal.unit(),
            offset,
        }
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// The point on the boundary closest to the origin.
    pub fn boundary_point(&self) -> Vec2 {
        self.normal * self.offset
    }

    /// Positive in front of the boundary, negative inside the solid region.
    pub fn signed_distance(&self, point: Vec2) -> f64 {
        self.normal.dot(point) - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_half_space_normalizes() {
        let h = HalfSpace::new(Vec2::new(1.0, 1.0), 15.0);
        assert!((h.normal().magnitude() - 1.0).abs() < EPSILON);
        assert_eq!(h.offset, 15.0);
    }

    #[test]
    #[should_panic]
    fn test_half_space_zero_normal() {
        HalfSpace::new(Vec2::ZERO, 1.0);
    }

    #[test]
    fn test_half_space_signed_distance() {
        let floor = HalfSpace::new(Vec2::new(0.0, 1.0), 1.0);
        assert!((floor.signed_distance(Vec2::new(5.0, 3.0)) - 2.0).abs() < EPSILON);
        assert!((floor.signed_distance(Vec2::new(5.0, 0.0)) - -1.0).abs() < EPSILON);
        assert_eq!(floor.boundary_point(), Vec2::new(0.0, 1.0));
    }
}
