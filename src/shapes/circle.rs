#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        assert!(radius > 0.0, "Circle radius must be positive");
        Self { radius }
    }

    /// Inverse moment of inertia for a disc, I = 0.5 m r^2.
    pub fn inverse_inertia(&self, inverse_mass: f64) -> f64 {
        if inverse_mass <= 0.0 {
            return 0.0;
        }
        2.0 * inverse_mass / (self.radius * self.radius)
    }
}
