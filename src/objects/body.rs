use crate::math::{wrap_degrees, Transform, Vec2};

/// Physical state of a rigid body.
///
/// Orientation is kept in degrees within [0, 360). An inverse mass or inverse
/// inertia of zero marks the body as immovable along that degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    orientation: f64, // Degrees
    rotation: f64,    // Angular velocity, degrees per second
    inverse_mass: f64,
    inverse_inertia: f64,
}

impl Body {
    /// Creates a resting body with the given mass properties.
    pub fn new(position: Vec2, orientation: f64, inverse_mass: f64, inverse_inertia: f64) -> Self {
        debug_assert!(inverse_mass >= 0.0, "inverse mass cannot be negative");
        debug_assert!(inverse_inertia >= 0.0, "inverse inertia cannot be negative");
        Self {
            position,
            velocity: Vec2::ZERO,
            orientation: wrap_degrees(orientation),
            rotation: 0.0,
            inverse_mass,
            inverse_inertia,
        }
    }

    /// Creates a body with infinite mass and inertia.
    pub fn immovable(position: Vec2) -> Self {
        Self::new(position, 0.0, 0.0, 0.0)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.rotation
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn inverse_inertia(&self) -> f64 {
        self.inverse_inertia
    }

    /// Mass of the body; infinite for immovable bodies.
    pub fn mass(&self) -> f64 {
        if self.inverse_mass > 0.0 {
            1.0 / self.inverse_mass
        } else {
            f64::INFINITY
        }
    }

    pub fn is_movable(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Current pose as a transform.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation)
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn translate(&mut self, translation: Vec2) {
        self.position += translation;
    }

    /// Adds `degrees` to the orientation, keeping it inside [0, 360).
    pub(crate) fn rotate(&mut self, degrees: f64) {
        self.orientation = wrap_degrees(self.orientation + degrees);
    }

    pub(crate) fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    pub(crate) fn add_angular_velocity(&mut self, delta: f64) {
        self.rotation += delta;
    }

    pub(crate) fn set_mass_properties(&mut self, inverse_mass: f64, inverse_inertia: f64) {
        self.inverse_mass = inverse_mass;
        self.inverse_inertia = inverse_inertia;
    }

    /// Position and orientation read-out.
    pub fn position_info_text(&self) -> String {
        format!(
            "Position: {}\nOrientation: {}\n",
            self.position, self.orientation
        )
    }

    /// Velocity and angular velocity read-out.
    pub fn velocity_info_text(&self) -> String {
        format!("Velocity: {}\nRotation: {}\n", self.velocity, self.rotation)
    }
}
