use tracing::{debug, warn};

use super::ShapeHandle;
use crate::collision::{
    generate_contacts, CircleCollider, ColliderSet, Contact, CuboidCollider, HalfSpaceCollider,
    ObjectList,
};
use crate::common::{EngineConfig, PositionMode, UnitScale, VelocityMode};
use crate::error::{EngineError, EngineResult};
use crate::math::Vec2;
use crate::objects::{Body, BodyArena, BodyHandle};
use crate::shapes::{Shape, ShapeDesc};

/// A shape and the body it is attached to.
///
/// After its body is transferred away the entry keeps the handle for
/// identity checks but is detached and refuses every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEntry {
    pub shape: Shape,
    pub body: BodyHandle,
    pub attached: bool,
}

impl ShapeEntry {
    /// Same body and, for boxes and circles, identical size.
    fn is_same_as(&self, other: &ShapeEntry) -> bool {
        if self.body != other.body {
            return false;
        }
        match (self.shape, other.shape) {
            (Shape::Cuboid(a), Shape::Cuboid(b)) => a.half_size == b.half_size,
            (Shape::Circle(a), Shape::Circle(b)) => a.radius == b.radius,
            (Shape::HalfSpace(_), Shape::HalfSpace(_)) => true,
            _ => false,
        }
    }
}

/// Outcome of one detect-then-resolve step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Contacts found by the sweep, in sweep order.
    pub contacts: Vec<Contact>,
    pub resolved: usize,
    /// Contacts with no movable body, left untouched.
    pub skipped: usize,
}

impl StepReport {
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}

/// Owns every body and shape, the list of shapes taking part in detection,
/// and the resolver configuration.
pub struct CollisionWorld {
    config: EngineConfig,
    bodies: BodyArena,
    shapes: Vec<ShapeEntry>,
    objects: ObjectList,
    warned_experimental: bool,
}

impl CollisionWorld {
    /// Creates an empty world after validating `config`.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bodies: BodyArena::new(),
            shapes: Vec::new(),
            objects: ObjectList::new(),
            warned_experimental: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn units(&self) -> &UnitScale {
        &self.config.units
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: EngineConfig) -> EngineResult<()> {
        config.validate()?;
        self.config = config;
        self.warned_experimental = false;
        Ok(())
    }

    pub fn bodies(&self) -> &BodyArena {
        &self.bodies
    }

    pub fn objects(&self) -> &ObjectList {
        &self.objects
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    // --- Construction and membership ---

    /// Creates a shape with a fresh body. The shape is not yet part of the
    /// object list.
    pub fn create(&mut self, desc: ShapeDesc) -> ShapeHandle {
        let body = self.bodies.insert(desc.build_body(self.config.default_mass));
        let handle = ShapeHandle(self.shapes.len());
        self.shapes.push(ShapeEntry {
            shape: desc.shape,
            body,
            attached: true,
        });
        debug!(shape = handle.index(), kind = ?desc.shape.kind(), "shape created");
        handle
    }

    /// Creates a shape and adds it to the object list.
    pub fn spawn(&mut self, desc: ShapeDesc) -> ShapeHandle {
        let handle = self.create(desc);
        self.objects.insert(handle, desc.shape.kind());
        handle
    }

    /// Adds a shape to the object list. Returns `Ok(false)` if it was
    /// already listed.
    pub fn insert(&mut self, handle: ShapeHandle) -> EngineResult<bool> {
        let entry = *self.attached_entry(handle)?;
        Ok(self.objects.insert(handle, entry.shape.kind()))
    }

    /// Removes every listed shape that is the same as `handle` (same body
    /// and size) and returns how many were removed.
    pub fn remove(&mut self, handle: ShapeHandle) -> EngineResult<usize> {
        let target = *self.entry(handle)?;
        let shapes = &self.shapes;
        let removed = self.objects.remove_matching(target.shape.kind(), |listed| {
            shapes
                .get(listed.index())
                .is_some_and(|entry| target.is_same_as(entry))
        });
        Ok(removed)
    }

    // --- Lookup ---

    pub fn entry(&self, handle: ShapeHandle) -> EngineResult<&ShapeEntry> {
        self.shapes
            .get(handle.index())
            .ok_or(EngineError::UnknownShape(handle))
    }

    fn attached_entry(&self, handle: ShapeHandle) -> EngineResult<&ShapeEntry> {
        let entry = self.entry(handle)?;
        if entry.attached {
            Ok(entry)
        } else {
            Err(EngineError::DetachedShape(handle))
        }
    }

    /// Entry of a shape that may be moved: attached and not a half-space.
    fn movable_entry(&self, handle: ShapeHandle) -> EngineResult<ShapeEntry> {
        let entry = *self.attached_entry(handle)?;
        if entry.shape.is_movable() {
            Ok(entry)
        } else {
            Err(EngineError::ImmovableShape(handle))
        }
    }

    pub fn shape(&self, handle: ShapeHandle) -> EngineResult<&Shape> {
        Ok(&self.entry(handle)?.shape)
    }

    pub fn body_handle(&self, handle: ShapeHandle) -> EngineResult<BodyHandle> {
        Ok(self.attached_entry(handle)?.body)
    }

    pub fn body(&self, handle: ShapeHandle) -> EngineResult<&Body> {
        let entry = self.attached_entry(handle)?;
        self.bodies.body(entry.body)
    }

    fn movable_body_mut(&mut self, handle: ShapeHandle) -> EngineResult<&mut Body> {
        let entry = self.movable_entry(handle)?;
        self.bodies.body_mut(entry.body)
    }

    /// Corners of a box in world space; `None` for other shapes.
    pub fn vertices(&self, handle: ShapeHandle) -> EngineResult<Option<[Vec2; 4]>> {
        let entry = self.attached_entry(handle)?;
        match entry.shape {
            Shape::Cuboid(cuboid) => Ok(Some(cuboid.vertices(self.bodies.body(entry.body)?.transform()))),
            _ => Ok(None),
        }
    }

    /// Both shapes share the same body, attached or not.
    pub fn body_same_as(&self, a: ShapeHandle, b: ShapeHandle) -> EngineResult<bool> {
        Ok(self.entry(a)?.body == self.entry(b)?.body)
    }

    /// Same body and, for boxes and circles, identical size.
    pub fn is_same_as(&self, a: ShapeHandle, b: ShapeHandle) -> EngineResult<bool> {
        Ok(self.entry(a)?.is_same_as(self.entry(b)?))
    }

    // --- Mutation ---

    pub fn translate(&mut self, handle: ShapeHandle, translation: Vec2) -> EngineResult<()> {
        self.movable_body_mut(handle)?.translate(translation);
        Ok(())
    }

    pub fn set_position(&mut self, handle: ShapeHandle, position: Vec2) -> EngineResult<()> {
        self.movable_body_mut(handle)?.set_position(position);
        Ok(())
    }

    /// Rotates the shape about its own centre.
    pub fn rotate(&mut self, handle: ShapeHandle, degrees: f64) -> EngineResult<()> {
        self.movable_body_mut(handle)?.rotate(degrees);
        Ok(())
    }

    /// Swings the shape's position about (0, 0). Boxes also turn by the same
    /// angle; circles only move.
    pub fn rotate_about_world_origin(&mut self, handle: ShapeHandle, degrees: f64) -> EngineResult<()> {
        let entry = self.movable_entry(handle)?;
        let body = self.bodies.body_mut(entry.body)?;
        body.set_position(body.position().rotate(degrees));
        if let Shape::Cuboid(_) = entry.shape {
            body.rotate(degrees);
        }
        Ok(())
    }

    pub fn set_velocity(&mut self, handle: ShapeHandle, velocity: Vec2) -> EngineResult<()> {
        self.movable_body_mut(handle)?.set_velocity(velocity);
        Ok(())
    }

    /// Angular velocity in degrees per second.
    pub fn set_angular_velocity(&mut self, handle: ShapeHandle, rotation: f64) -> EngineResult<()> {
        self.movable_body_mut(handle)?.set_angular_velocity(rotation);
        Ok(())
    }

    /// Sets the mass and recomputes the inverse inertia from the shape's
    /// geometry. A non-positive or non-finite mass makes the body immovable.
    pub fn set_mass(&mut self, handle: ShapeHandle, mass: f64) -> EngineResult<()> {
        let entry = self.movable_entry(handle)?;
        let (inverse_mass, inverse_inertia) = entry.shape.mass_properties(mass);
        self.bodies
            .body_mut(entry.body)?
            .set_mass_properties(inverse_mass, inverse_inertia);
        Ok(())
    }

    /// Moves `from`'s body onto `to`.
    ///
    /// `to`'s previous body is released, `from` becomes detached and leaves
    /// the object list, and the body's inverse inertia is recomputed for its
    /// new geometry. Half-spaces can neither give nor take a body.
    pub fn transfer_body(&mut self, from: ShapeHandle, to: ShapeHandle) -> EngineResult<()> {
        if from == to {
            return Ok(());
        }
        let source = self.movable_entry(from)?;
        let target = *self.entry(to)?;
        if !target.shape.is_movable() {
            return Err(EngineError::ImmovableShape(to));
        }
        // Validate before anything changes.
        let inverse_mass = self.bodies.body(source.body)?.inverse_mass();

        if target.attached && target.body != source.body {
            self.bodies.remove(target.body);
        }
        self.shapes[to.index()].body = source.body;
        self.shapes[to.index()].attached = true;
        self.shapes[from.index()].attached = false;
        self.objects.forget(from);

        let inverse_inertia = target.shape.inverse_inertia(inverse_mass);
        self.bodies
            .body_mut(source.body)?
            .set_mass_properties(inverse_mass, inverse_inertia);

        debug!(from = from.index(), to = to.index(), "body transferred");
        Ok(())
    }

    // --- Detection and resolution ---

    /// Snapshots every listed shape at its body's pose.
    fn colliders(&self) -> ColliderSet {
        let mut set = ColliderSet::new();
        let listed = self
            .objects
            .cuboids()
            .iter()
            .chain(self.objects.circles())
            .chain(self.objects.half_spaces());

        for &handle in listed {
            let Some(entry) = self.shapes.get(handle.index()).filter(|e| e.attached) else {
                continue;
            };
            let Some(body) = self.bodies.get(entry.body) else {
                warn!(shape = handle.index(), "listed shape has a stale body, skipped");
                continue;
            };
            match entry.shape {
                Shape::Cuboid(cuboid) => set.cuboids.push(CuboidCollider::new(cuboid, entry.body, body)),
                Shape::Circle(circle) => {
                    set.circles.push(CircleCollider::new(circle.radius, entry.body, body))
                }
                Shape::HalfSpace(half_space) => set.half_spaces.push(HalfSpaceCollider { half_space }),
            }
        }
        set
    }

    /// Clears `contacts` and refills it with one sweep over the object list.
    /// Returns the number of contacts found.
    pub fn generate_contacts(&self, contacts: &mut Vec<Contact>) -> usize {
        contacts.clear();
        generate_contacts(&self.colliders(), contacts)
    }

    fn warn_experimental(&mut self, resolver: &'static str) {
        if !self.warned_experimental {
            warn!(resolver, "experimental resolver in use; results are unvalidated");
            self.warned_experimental = true;
        }
    }

    pub fn resolve_position(&mut self, contact: &Contact) -> EngineResult<()> {
        contact.resolve_position(&mut self.bodies)
    }

    pub fn resolve_position_with_rotation(&mut self, contact: &Contact) -> EngineResult<()> {
        self.warn_experimental("position_with_rotation");
        contact.resolve_position_with_rotation(&mut self.bodies)
    }

    /// Uses the configured restitution.
    pub fn resolve_velocities(&mut self, contact: &Contact) -> EngineResult<()> {
        contact.resolve_velocities(&mut self.bodies, self.config.resolver.restitution)
    }

    pub fn resolve_velocities_and_rotations(&mut self, contact: &Contact) -> EngineResult<()> {
        self.warn_experimental("velocities_and_rotations");
        contact.resolve_velocities_and_rotations(&mut self.bodies, self.config.resolver.restitution)
    }

    /// One sweep followed by the configured resolvers on every contact with
    /// a movable body. Contacts without one are skipped.
    pub fn step(&mut self) -> EngineResult<StepReport> {
        let resolver = self.config.resolver;
        if resolver.position_mode == PositionMode::ExperimentalRotational {
            self.warn_experimental("position_with_rotation");
        }
        if resolver.velocity_mode == VelocityMode::ExperimentalRotational {
            self.warn_experimental("velocities_and_rotations");
        }

        let mut report = StepReport::default();
        self.generate_contacts(&mut report.contacts);

        for contact in &report.contacts {
            if !contact.has_movable_body(&self.bodies) {
                warn!(normal = %contact.normal, penetration = contact.penetration, "contact has no movable body, skipped");
                report.skipped += 1;
                continue;
            }
            contact.resolve(&mut self.bodies, &resolver)?;
            report.resolved += 1;
        }

        debug!(
            contacts = report.contact_count(),
            resolved = report.resolved,
            skipped = report.skipped,
            "step finished"
        );
        Ok(report)
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            bodies: BodyArena::new(),
            shapes: Vec::new(),
            objects: ObjectList::new(),
            warned_experimental: false,
        }
    }
}
