use crate::error::{EngineError, EngineResult};
use crate::math::{Transform, Vec2};

/// Rectangle defined by its half-extents along its local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub half_size: Vec2,
}

impl Cuboid {
    /// Creates a box `size.x` wide and `size.y` tall.
    pub fn new(size: Vec2) -> Self {
        Self::from_half_size(size * 0.5)
    }

    pub fn square(side: f64) -> Self {
        Self::new(Vec2::new(side, side))
    }

    pub fn from_half_size(half_size: Vec2) -> Self {
        assert!(
            half_size.x > 0.0 && half_size.y > 0.0,
            "Cuboid extents must be positive"
        );
        Self { half_size }
    }

    pub fn size(&self) -> Vec2 {
        self.half_size * 2.0
    }

    /// Inverse moment of inertia for a rectangle, I = 1/12 m (w^2 + h^2).
    pub fn inverse_inertia(&self, inverse_mass: f64) -> f64 {
        let size = self.size();
        if inverse_mass <= 0.0 {
            return 0.0;
        }
        12.0 * inverse_mass / (size.x * size.x + size.y * size.y)
    }

    /// Local X axis in world space.
    pub fn x_axis(orientation: f64) -> Vec2 {
        Vec2::UNIT_X.rotate(orientation)
    }

    /// Local Y axis in world space.
    pub fn y_axis(orientation: f64) -> Vec2 {
        Vec2::UNIT_Y.rotate(orientation)
    }

    /// Half-width of the box's shadow on `axis`.
    pub fn project_onto(&self, orientation: f64, axis: Vec2) -> f64 {
        self.half_size.x * axis.dot(Self::x_axis(orientation)).abs()
            + self.half_size.y * axis.dot(Self::y_axis(orientation)).abs()
    }

    /// World-space corners, starting at (-hx,-hy) and winding through
    /// (+hx,-hy), (+hx,+hy), (-hx,+hy) before rotation.
    pub fn vertices(&self, pose: Transform) -> [Vec2; 4] {
        let centre = pose.position;
        let h = self.half_size;
        let mut vertices = [
            Vec2::new(centre.x - h.x, centre.y - h.y),
            Vec2::new(centre.x + h.x, centre.y - h.y),
            Vec2::new(centre.x + h.x, centre.y + h.y),
            Vec2::new(centre.x - h.x, centre.y + h.y),
        ];

        // Exact shortcuts avoid trigonometric noise on the common orientations.
        if pose.orientation == 0.0 {
            return vertices;
        }
        if pose.orientation == 180.0 {
            vertices.swap(0, 2);
            vertices.swap(1, 3);
            return vertices;
        }

        for vertex in vertices.iter_mut() {
            *vertex = vertex.rotate_about(centre, pose.orientation);
        }
        vertices
    }

    /// Writes the corners into a caller-owned buffer of exactly four slots.
    pub fn write_vertices(&self, pose: Transform, out: &mut [Vec2]) -> EngineResult<()> {
        if out.len() != 4 {
            return Err(EngineError::VertexBufferSize {
                expected: 4,
                actual: out.len(),
            });
        }
        out.copy_from_slice(&self.vertices(pose));
        Ok(())
    }
}
