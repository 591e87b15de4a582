pub mod circle;
pub mod cuboid;
pub mod half_space;

pub use circle::Circle;
pub use cuboid::Cuboid;
pub use half_space::HalfSpace;

use crate::math::Vec2;
use crate::objects::Body;

/// Discriminant of a `Shape`, used to file shapes in an object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cuboid,
    Circle,
    HalfSpace,
}

/// Enum representing the collision geometry attached to a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid(Cuboid),
    Circle(Circle),
    HalfSpace(HalfSpace),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Cuboid(_) => ShapeKind::Cuboid,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::HalfSpace(_) => ShapeKind::HalfSpace,
        }
    }

    /// Half-spaces never translate, rotate or change mass.
    pub fn is_movable(&self) -> bool {
        !matches!(self, Shape::HalfSpace(_))
    }

    /// Inverse inertia implied by this geometry for the given inverse mass.
    pub fn inverse_inertia(&self, inverse_mass: f64) -> f64 {
        match self {
            Shape::Cuboid(cuboid) => cuboid.inverse_inertia(inverse_mass),
            Shape::Circle(circle) => circle.inverse_inertia(inverse_mass),
            Shape::HalfSpace(_) => 0.0,
        }
    }

    /// Returns `(inverse_mass, inverse_inertia)` for a mass. Non-positive or
    /// non-finite masses, and every half-space, give an immovable body.
    pub fn mass_properties(&self, mass: f64) -> (f64, f64) {
        if !self.is_movable() || !mass.is_finite() || mass <= 0.0 {
            return (0.0, 0.0);
        }
        let inverse_mass = 1.0 / mass;
        (inverse_mass, self.inverse_inertia(inverse_mass))
    }
}

/// Everything needed to construct a shape and its body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDesc {
    pub shape: Shape,
    pub position: Vec2,
    pub orientation: f64,
    /// `None` takes the world's default mass.
    pub mass: Option<f64>,
    pub velocity: Vec2,
    pub angular_velocity: f64,
}

impl ShapeDesc {
    fn from_shape(shape: Shape, position: Vec2) -> Self {
        Self {
            shape,
            position,
            orientation: 0.0,
            mass: None,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// A box centred on `position`, `size.x` wide and `size.y` tall.
    pub fn cuboid(position: Vec2, size: Vec2) -> Self {
        Self::from_shape(Shape::Cuboid(Cuboid::new(size)), position)
    }

    pub fn square(position: Vec2, side: f64) -> Self {
        Self::from_shape(Shape::Cuboid(Cuboid::square(side)), position)
    }

    pub fn circle(position: Vec2, radius: f64) -> Self {
        Self::from_shape(Shape::Circle(Circle::new(radius)), position)
    }

    /// Half-spaces are always immovable; their body sits on the boundary point.
    pub fn half_space(normal: Vec2, offset: f64) -> Self {
        let half_space = HalfSpace::new(normal, offset);
        Self::from_shape(Shape::HalfSpace(half_space), half_space.boundary_point())
    }

    /// Orientation in degrees. Ignored for half-spaces.
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Shortcut for an infinite-mass box or circle.
    pub fn immovable(self) -> Self {
        self.with_mass(f64::INFINITY)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, degrees_per_second: f64) -> Self {
        self.angular_velocity = degrees_per_second;
        self
    }

    /// Builds the body this shape will own.
    pub fn build_body(&self, default_mass: f64) -> Body {
        if !self.shape.is_movable() {
            return Body::immovable(self.position);
        }
        let (inverse_mass, inverse_inertia) =
            self.shape.mass_properties(self.mass.unwrap_or(default_mass));
        let mut body = Body::new(self.position, self.orientation, inverse_mass, inverse_inertia);
        body.set_velocity(self.velocity);
        body.set_angular_velocity(self.angular_velocity);
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_shape_kind_and_movability() {
        let b = Shape::Cuboid(Cuboid::square(2.0));
        let c = Shape::Circle(Circle::new(1.0));
        let h = Shape::HalfSpace(HalfSpace::new(Vec2::UNIT_Y, 0.0));
        assert_eq!(b.kind(), ShapeKind::Cuboid);
        assert_eq!(c.kind(), ShapeKind::Circle);
        assert_eq!(h.kind(), ShapeKind::HalfSpace);
        assert!(b.is_movable() && c.is_movable());
        assert!(!h.is_movable());
    }

    #[test]
    fn test_mass_properties() {
        let c = Shape::Circle(Circle::new(2.0));
        let (im, ii) = c.mass_properties(4.0);
        assert!((im - 0.25).abs() < EPSILON);
        assert!((ii - 1.0 / 8.0).abs() < EPSILON);

        assert_eq!(c.mass_properties(0.0), (0.0, 0.0));
        assert_eq!(c.mass_properties(f64::INFINITY), (0.0, 0.0));

        let h = Shape::HalfSpace(HalfSpace::new(Vec2::UNIT_Y, 0.0));
        assert_eq!(h.mass_properties(10.0), (0.0, 0.0));
    }

    #[test]
    fn test_desc_build_body_uses_default_mass() {
        let desc = ShapeDesc::square(Vec2::new(6.0, 6.0), 8.0)
            .with_orientation(30.0)
            .with_velocity(Vec2::new(-10.0, 0.0));
        let body = desc.build_body(10.0);
        assert!((body.inverse_mass() - 0.1).abs() < EPSILON);
        assert_eq!(body.orientation(), 30.0);
        assert_eq!(body.velocity(), Vec2::new(-10.0, 0.0));
        assert_eq!(body.position(), Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_desc_half_space_is_immovable() {
        let desc = ShapeDesc::half_space(Vec2::new(0.0, 2.0), 1.0).with_mass(5.0);
        let body = desc.build_body(10.0);
        assert!(!body.is_movable());
        assert_eq!(body.inverse_inertia(), 0.0);
        assert_eq!(body.position(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_desc_immovable_box() {
        let body = ShapeDesc::square(Vec2::ZERO, 1.0).immovable().build_body(10.0);
        assert!(!body.is_movable());
    }
}
