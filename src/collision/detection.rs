//! Narrow-phase detectors, one per shape pairing.
//!
//! Every detector appends at most one contact to `contacts` and returns how
//! many it added. Colliders are snapshots of a shape's geometry at its body's
//! current pose, so detection never touches the body arena.

use tracing::trace;

use super::contact::Contact;
use crate::math::{Transform, Vec2};
use crate::objects::{Body, BodyHandle};
use crate::shapes::{Cuboid, HalfSpace};

/// A box posed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidCollider {
    pub cuboid: Cuboid,
    pub pose: Transform,
    pub body: BodyHandle,
}

impl CuboidCollider {
    pub fn new(cuboid: Cuboid, body: BodyHandle, state: &Body) -> Self {
        Self {
            cuboid,
            pose: state.transform(),
            body,
        }
    }

    pub fn x_axis(&self) -> Vec2 {
        Cuboid::x_axis(self.pose.orientation)
    }

    pub fn y_axis(&self) -> Vec2 {
        Cuboid::y_axis(self.pose.orientation)
    }

    pub fn vertices(&self) -> [Vec2; 4] {
        self.cuboid.vertices(self.pose)
    }

    fn project_onto(&self, axis: Vec2) -> f64 {
        self.cuboid.project_onto(self.pose.orientation, axis)
    }
}

/// A circle posed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider {
    pub centre: Vec2,
    pub radius: f64,
    pub body: BodyHandle,
}

impl CircleCollider {
    pub fn new(radius: f64, body: BodyHandle, state: &Body) -> Self {
        Self {
            centre: state.position(),
            radius,
            body,
        }
    }
}

/// Half-spaces never respond to contacts, so no body is carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpaceCollider {
    pub half_space: HalfSpace,
}

/// Checks for collision between two circles.
/// Coincident centres are rejected along with touching and separated circles.
pub fn circle_and_circle(
    one: &CircleCollider,
    two: &CircleCollider,
    contacts: &mut Vec<Contact>,
) -> usize {
    let midline = one.centre - two.centre;
    let distance = midline.magnitude();
    let radii_sum = one.radius + two.radius;

    if distance <= 0.0 || distance >= radii_sum {
        return 0;
    }

    // Normal points from circle two towards circle one.
    let normal = midline * (1.0 / distance);
    let penetration = radii_sum - distance;

    trace!(pair = "circle-circle", penetration, %normal, "contact generated");
    contacts.push(Contact::new(
        one.centre - normal * one.radius,
        normal,
        penetration,
        one.body,
        Some(two.body),
    ));
    1
}

/// Checks a circle against a half-space.
pub fn circle_and_half_space(
    circle: &CircleCollider,
    half_space: &HalfSpaceCollider,
    contacts: &mut Vec<Contact>,
) -> usize {
    let plane = &half_space.half_space;
    let distance = plane.signed_distance(circle.centre) - circle.radius;

    if distance >= 0.0 {
        return 0;
    }

    let normal = plane.normal();
    trace!(pair = "circle-halfspace", penetration = -distance, %normal, "contact generated");
    contacts.push(Contact::new(
        circle.centre - normal * (distance + circle.radius),
        normal,
        -distance,
        circle.body,
        None,
    ));
    1
}

/// Checks a box against a half-space. Only the single deepest vertex makes a
/// contact; on a tie the later vertex wins.
pub fn box_and_half_space(
    cuboid: &CuboidCollider,
    half_space: &HalfSpaceCollider,
    contacts: &mut Vec<Contact>,
) -> usize {
    let plane = &half_space.half_space;
    let normal = plane.normal();

    let mut deepest: Option<(Vec2, f64)> = None;
    for vertex in cuboid.vertices() {
        let distance = vertex.dot(normal);
        if distance > plane.offset {
            continue;
        }
        match deepest {
            Some((_, smallest)) if distance > smallest => {}
            _ => deepest = Some((vertex, distance)),
        }
    }

    let Some((vertex, smallest)) = deepest else {
        return 0;
    };

    let penetration = plane.offset - smallest;
    trace!(pair = "box-halfspace", penetration, %vertex, "contact generated");
    contacts.push(Contact::new(vertex, normal, penetration, cuboid.body, None));
    1
}

/// Checks a box against a circle by clamping the circle centre onto the box
/// in the box's local frame.
pub fn box_and_circle(
    cuboid: &CuboidCollider,
    circle: &CircleCollider,
    contacts: &mut Vec<Contact>,
) -> usize {
    let relative_centre = cuboid.pose.apply_inverse(circle.centre);
    let radius = circle.radius;
    let half_size = cuboid.cuboid.half_size;

    // Early out on the separating local axes.
    if relative_centre.x.abs() - radius > half_size.x
        || relative_centre.y.abs() - radius > half_size.y
    {
        return 0;
    }

    let closest_local = Vec2::new(
        relative_centre.x.clamp(-half_size.x, half_size.x),
        relative_centre.y.clamp(-half_size.y, half_size.y),
    );

    let distance_sq = (closest_local - relative_centre).magnitude_squared();
    if distance_sq > radius * radius {
        return 0;
    }

    let closest_point = cuboid.pose.apply(closest_local);
    // A centre inside the box clamps to itself and leaves a zero normal.
    let normal = (closest_point - circle.centre).unit();
    let penetration = radius - distance_sq.sqrt();

    trace!(pair = "box-circle", penetration, %normal, "contact generated");
    contacts.push(Contact::new(
        closest_point,
        normal,
        penetration,
        cuboid.body,
        Some(circle.body),
    ));
    1
}

/// Separating Axis Test between two boxes over both boxes' local axes.
/// The axis of least overlap becomes the contact normal; ties keep the
/// earlier axis.
pub fn box_and_box(
    one: &CuboidCollider,
    two: &CuboidCollider,
    contacts: &mut Vec<Contact>,
) -> usize {
    let to_centre = two.pose.position - one.pose.position;

    let mut best_overlap = f64::MAX;
    let mut best_case = 0;
    let mut best_axis = Vec2::ZERO;

    for case in 0..4 {
        // Axes are fetched lazily so an early separation skips the rest.
        let axis = match case {
            0 => one.x_axis(),
            1 => one.y_axis(),
            2 => two.x_axis(),
            _ => two.y_axis(),
        };

        let overlap = penetration_on_axis(one, two, axis, to_centre);
        if overlap < 0.0 {
            return 0;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_case = case;
            best_axis = axis;
        }
    }

    // Axes from box one mean a vertex of box two lies on box one's face,
    // and the other way round.
    let contact = if best_case < 2 {
        box_box_contact(one, two, best_axis, to_centre, best_overlap)
    } else {
        box_box_contact(two, one, best_axis, -to_centre, best_overlap)
    };

    trace!(pair = "box-box", axis = best_case, penetration = best_overlap, "contact generated");
    contacts.push(contact);
    1
}

/// Overlap of the two boxes' shadows on `axis`; negative means separated.
fn penetration_on_axis(
    one: &CuboidCollider,
    two: &CuboidCollider,
    axis: Vec2,
    to_centre: Vec2,
) -> f64 {
    one.project_onto(axis) + two.project_onto(axis) - to_centre.dot(axis).abs()
}

fn box_box_contact(
    reference: &CuboidCollider,
    incident: &CuboidCollider,
    axis: Vec2,
    to_centre: Vec2,
    penetration: f64,
) -> Contact {
    let mut normal = axis;
    if normal.dot(to_centre) > 0.0 {
        normal.invert();
    }

    // Pick the incident corner that faces the reference box.
    let mut vertex = incident.cuboid.half_size;
    if incident.x_axis().dot(normal) < 0.0 {
        vertex.x = -vertex.x;
    }
    if incident.y_axis().dot(normal) < 0.0 {
        vertex.y = -vertex.y;
    }

    Contact::new(
        incident.pose.apply(vertex),
        normal,
        penetration,
        reference.body,
        Some(incident.body),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::BodyArena;
    use crate::shapes::{Circle, Cuboid};
    const EPSILON: f64 = 1e-9;

    struct Scene {
        arena: BodyArena,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                arena: BodyArena::new(),
            }
        }

        fn circle(&mut self, centre: Vec2, radius: f64) -> CircleCollider {
            let circle = Circle::new(radius);
            let body = Body::new(centre, 0.0, 0.1, circle.inverse_inertia(0.1));
            let handle = self.arena.insert(body);
            CircleCollider::new(radius, handle, &self.arena[handle])
        }

        fn cuboid(&mut self, centre: Vec2, size: Vec2, orientation: f64) -> CuboidCollider {
            let cuboid = Cuboid::new(size);
            let body = Body::new(centre, orientation, 0.1, cuboid.inverse_inertia(0.1));
            let handle = self.arena.insert(body);
            CuboidCollider::new(cuboid, handle, &self.arena[handle])
        }
    }

    fn half_space(normal: Vec2, offset: f64) -> HalfSpaceCollider {
        HalfSpaceCollider {
            half_space: HalfSpace::new(normal, offset),
        }
    }

    fn assert_vec_close(actual: Vec2, expected: Vec2) {
        assert!(
            actual.distance(expected) < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    // --- Circle vs Circle ---

    #[test]
    fn test_circle_circle_no_collision() {
        let mut scene = Scene::new();
        let a = scene.circle(Vec2::new(0.0, 0.0), 1.0);
        let b = scene.circle(Vec2::new(3.0, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_circle(&a, &b, &mut contacts), 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_circle_circle_touching_is_not_contact() {
        let mut scene = Scene::new();
        let a = scene.circle(Vec2::new(0.0, 0.0), 1.0);
        let b = scene.circle(Vec2::new(2.0, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_circle(&a, &b, &mut contacts), 0);
    }

    #[test]
    fn test_circle_circle_concentric_is_not_contact() {
        let mut scene = Scene::new();
        let a = scene.circle(Vec2::new(4.0, 4.0), 1.0);
        let b = scene.circle(Vec2::new(4.0, 4.0), 2.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_circle(&a, &b, &mut contacts), 0);
    }

    #[test]
    fn test_circle_circle_colliding() {
        let mut scene = Scene::new();
        let a = scene.circle(Vec2::new(0.0, 0.0), 1.0);
        let b = scene.circle(Vec2::new(1.5, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_circle(&a, &b, &mut contacts), 1);

        let contact = contacts[0];
        assert!((contact.penetration - 0.5).abs() < EPSILON);
        // From circle two towards circle one.
        assert_vec_close(contact.normal, Vec2::new(-1.0, 0.0));
        assert_vec_close(contact.point, Vec2::new(1.0, 0.0));
        assert_eq!(contact.first, a.body);
        assert_eq!(contact.second, Some(b.body));
    }

    // --- Circle vs HalfSpace ---

    #[test]
    fn test_circle_half_space_separated() {
        let mut scene = Scene::new();
        let c = scene.circle(Vec2::new(5.0, 5.0), 1.0);
        let floor = half_space(Vec2::UNIT_Y, 1.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_half_space(&c, &floor, &mut contacts), 0);
    }

    #[test]
    fn test_circle_half_space_penetrating() {
        let mut scene = Scene::new();
        let c = scene.circle(Vec2::new(5.0, 1.5), 1.0);
        let floor = half_space(Vec2::UNIT_Y, 1.0);
        let mut contacts = Vec::new();
        assert_eq!(circle_and_half_space(&c, &floor, &mut contacts), 1);

        let contact = contacts[0];
        assert!((contact.penetration - 0.5).abs() < EPSILON);
        assert_vec_close(contact.normal, Vec2::UNIT_Y);
        // Projection of the centre onto the boundary.
        assert_vec_close(contact.point, Vec2::new(5.0, 1.0));
        assert_eq!(contact.second, None);
    }

    // --- Box vs HalfSpace ---

    #[test]
    fn test_box_half_space_separated() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::new(0.0, 5.0), Vec2::new(2.0, 2.0), 0.0);
        let floor = half_space(Vec2::UNIT_Y, 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_half_space(&b, &floor, &mut contacts), 0);
    }

    #[test]
    fn test_box_half_space_picks_deepest_vertex() {
        let mut scene = Scene::new();
        // Tilted box whose lowest corner dips below y = 1.
        let b = scene.cuboid(Vec2::new(0.0, 2.0), Vec2::new(2.0, 2.0), 30.0);
        let floor = half_space(Vec2::UNIT_Y, 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_half_space(&b, &floor, &mut contacts), 1);

        let lowest = b
            .vertices()
            .into_iter()
            .min_by(|p, q| p.y.partial_cmp(&q.y).unwrap())
            .unwrap();
        let contact = contacts[0];
        assert_vec_close(contact.point, lowest);
        assert!((contact.penetration - (1.0 - lowest.y)).abs() < EPSILON);
        assert_vec_close(contact.normal, Vec2::UNIT_Y);
    }

    #[test]
    fn test_box_half_space_flat_tie_takes_last_vertex() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::new(0.0, 1.5), Vec2::new(2.0, 2.0), 0.0);
        let floor = half_space(Vec2::UNIT_Y, 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_half_space(&b, &floor, &mut contacts), 1);
        // Vertices 0 and 1 share y = 0.5; the later one is kept.
        assert_vec_close(contacts[0].point, Vec2::new(1.0, 0.5));
        assert!((contacts[0].penetration - 0.5).abs() < EPSILON);
    }

    // --- Box vs Circle ---

    #[test]
    fn test_box_circle_early_out() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 0.0);
        let c = scene.circle(Vec2::new(5.0, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_circle(&b, &c, &mut contacts), 0);
    }

    #[test]
    fn test_box_circle_corner_miss() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 0.0);
        // Passes the per-axis early out but misses the corner.
        let c = scene.circle(Vec2::new(1.8, 1.8), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_circle(&b, &c, &mut contacts), 0);
    }

    #[test]
    fn test_box_circle_face_contact() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 0.0);
        let c = scene.circle(Vec2::new(1.5, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_circle(&b, &c, &mut contacts), 1);

        let contact = contacts[0];
        assert_vec_close(contact.point, Vec2::new(1.0, 0.0));
        // From the circle centre towards the box.
        assert_vec_close(contact.normal, Vec2::new(-1.0, 0.0));
        assert!((contact.penetration - 0.5).abs() < EPSILON);
        assert_eq!(contact.first, b.body);
        assert_eq!(contact.second, Some(c.body));
    }

    #[test]
    fn test_box_circle_rotated_box() {
        let mut scene = Scene::new();
        let b = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 45.0);
        // The corner of the rotated box points along +x at distance sqrt(2).
        let c = scene.circle(Vec2::new(2.0, 0.0), 1.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_circle(&b, &c, &mut contacts), 1);

        let contact = contacts[0];
        assert_vec_close(contact.point, Vec2::new(2.0_f64.sqrt(), 0.0));
        assert!((contact.penetration - (1.0 - (2.0 - 2.0_f64.sqrt()))).abs() < 1e-6);
    }

    // --- Box vs Box ---

    #[test]
    fn test_box_box_overlap_on_x() {
        let mut scene = Scene::new();
        let a = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 0.0);
        let b = scene.cuboid(Vec2::new(1.5, 0.0), Vec2::new(2.0, 2.0), 0.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_box(&a, &b, &mut contacts), 1);

        let contact = contacts[0];
        assert!((contact.penetration - 0.5).abs() < EPSILON);
        assert_vec_close(contact.normal, Vec2::new(-1.0, 0.0));
        assert_vec_close(contact.point, Vec2::new(0.5, 1.0));
        assert_eq!(contact.first, a.body);
        assert_eq!(contact.second, Some(b.body));
    }

    #[test]
    fn test_box_box_separated() {
        let mut scene = Scene::new();
        let a = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 0.0);
        let b = scene.cuboid(Vec2::new(3.0, 0.0), Vec2::new(2.0, 2.0), 0.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_box(&a, &b, &mut contacts), 0);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_box_box_second_box_axis_swaps_roles() {
        let mut scene = Scene::new();
        // Box one is rotated, so box two's axes give the smaller overlap
        // when box two sits squarely above it.
        let a = scene.cuboid(Vec2::ZERO, Vec2::new(2.0, 2.0), 45.0);
        let b = scene.cuboid(Vec2::new(0.0, 2.2), Vec2::new(4.0, 2.0), 0.0);
        let mut contacts = Vec::new();
        assert_eq!(box_and_box(&a, &b, &mut contacts), 1);

        let contact = contacts[0];
        // Box two is the reference and is pushed up, away from box one.
        assert_eq!(contact.first, b.body);
        assert_eq!(contact.second, Some(a.body));
        assert_vec_close(contact.normal, Vec2::new(0.0, 1.0));
        // The incident vertex is box one's top corner.
        assert_vec_close(contact.point, Vec2::new(0.0, 2.0_f64.sqrt()));
        let expected = 2.0_f64.sqrt() + 1.0 - 2.2;
        assert!((contact.penetration - expected).abs() < EPSILON);
    }
}
