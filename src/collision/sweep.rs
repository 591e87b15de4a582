use tracing::debug;

use super::contact::Contact;
use super::detection::{
    box_and_box, box_and_circle, box_and_half_space, circle_and_circle, circle_and_half_space,
    CircleCollider, CuboidCollider, HalfSpaceCollider,
};

/// Posed geometry for every registered shape, grouped by kind in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    pub cuboids: Vec<CuboidCollider>,
    pub circles: Vec<CircleCollider>,
    pub half_spaces: Vec<HalfSpaceCollider>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cuboids.len() + self.circles.len() + self.half_spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.cuboids.clear();
        self.circles.clear();
        self.half_spaces.clear();
    }
}

/// Brute-force sweep over every unordered pair of colliders.
///
/// Boxes go first: each box is tested against the boxes after it, then every
/// circle, then every half-space. Circles follow against the circles after
/// them and every half-space. Half-spaces are never tested against each
/// other. Returns the number of contacts appended.
pub fn generate_contacts(colliders: &ColliderSet, contacts: &mut Vec<Contact>) -> usize {
    let mut count = 0;

    for (i, cuboid) in colliders.cuboids.iter().enumerate() {
        for other in &colliders.cuboids[i + 1..] {
            count += box_and_box(cuboid, other, contacts);
        }
        for circle in &colliders.circles {
            count += box_and_circle(cuboid, circle, contacts);
        }
        for half_space in &colliders.half_spaces {
            count += box_and_half_space(cuboid, half_space, contacts);
        }
    }

    for (i, circle) in colliders.circles.iter().enumerate() {
        for other in &colliders.circles[i + 1..] {
            count += circle_and_circle(circle, other, contacts);
        }
        for half_space in &colliders.half_spaces {
            count += circle_and_half_space(circle, half_space, contacts);
        }
    }

    debug!(shapes = colliders.len(), contacts = count, "contact sweep finished");
    count
}
