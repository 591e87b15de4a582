use std::fmt;

use crate::math::Vec2;
use crate::objects::{BodyArena, BodyHandle};

/// A single point of contact between two shapes, produced fresh by every
/// sweep and discarded after resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point in world coordinates.
    pub point: Vec2,
    /// Unit normal along which the first body is pushed out of the second.
    pub normal: Vec2,
    /// Overlap along the normal. Never negative.
    pub penetration: f64,
    /// The body that moves along `normal`.
    pub first: BodyHandle,
    /// The opposing body, or `None` for immovable half-spaces.
    pub second: Option<BodyHandle>,
}

impl Contact {
    pub fn new(
        point: Vec2,
        normal: Vec2,
        penetration: f64,
        first: BodyHandle,
        second: Option<BodyHandle>,
    ) -> Self {
        Self {
            point,
            normal,
            penetration,
            first,
            second,
        }
    }

    /// Body by slot index. Slot 1 is empty for half-space contacts, and any
    /// index past 1 yields `None`.
    pub fn body(&self, index: usize) -> Option<BodyHandle> {
        match index {
            0 => Some(self.first),
            1 => self.second,
            _ => None,
        }
    }

    /// Present bodies in slot order.
    pub fn bodies(&self) -> impl Iterator<Item = BodyHandle> {
        std::iter::once(self.first).chain(self.second)
    }

    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.first == handle || self.second == Some(handle)
    }

    /// True if at least one referenced body has a finite mass. Resolution
    /// must only be invoked on such contacts.
    pub fn has_movable_body(&self, bodies: &BodyArena) -> bool {
        self.bodies()
            .filter_map(|handle| bodies.get(handle))
            .any(|body| body.is_movable())
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contact normal: {}", self.normal)?;
        writeln!(f, "Contact point: {}", self.point)?;
        writeln!(f, "Penetration depth: {}", self.penetration)?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Body;

    fn arena_with(bodies: &[Body]) -> (BodyArena, Vec<BodyHandle>) {
        let mut arena = BodyArena::new();
        let handles = bodies.iter().map(|b| arena.insert(*b)).collect();
        (arena, handles)
    }

    #[test]
    fn test_body_slots() {
        let (_, h) = arena_with(&[Body::immovable(Vec2::ZERO), Body::immovable(Vec2::ZERO)]);
        let contact = Contact::new(Vec2::ZERO, Vec2::UNIT_Y, 0.5, h[0], Some(h[1]));
        assert_eq!(contact.body(0), Some(h[0]));
        assert_eq!(contact.body(1), Some(h[1]));
        assert_eq!(contact.body(2), None);
        assert!(contact.involves(h[1]));
        assert_eq!(contact.bodies().count(), 2);

        let half_space_contact = Contact::new(Vec2::ZERO, Vec2::UNIT_Y, 0.5, h[0], None);
        assert_eq!(half_space_contact.body(1), None);
        assert!(!half_space_contact.involves(h[1]));
        assert_eq!(half_space_contact.bodies().count(), 1);
    }

    #[test]
    fn test_has_movable_body() {
        let (arena, h) = arena_with(&[
            Body::immovable(Vec2::ZERO),
            Body::new(Vec2::ZERO, 0.0, 1.0, 1.0),
        ]);
        assert!(!Contact::new(Vec2::ZERO, Vec2::UNIT_Y, 0.1, h[0], None).has_movable_body(&arena));
        assert!(Contact::new(Vec2::ZERO, Vec2::UNIT_Y, 0.1, h[0], Some(h[1])).has_movable_body(&arena));
    }

    #[test]
    fn test_display() {
        let (_, h) = arena_with(&[Body::immovable(Vec2::ZERO)]);
        let contact = Contact::new(Vec2::new(1.0, 2.0), Vec2::new(0.0, 1.0), 0.5, h[0], None);
        assert_eq!(
            contact.to_string(),
            "Contact normal: (0,1)\nContact point: (1,2)\nPenetration depth: 0.5\n\n"
        );
    }
}
