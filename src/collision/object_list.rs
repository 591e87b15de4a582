use crate::shapes::ShapeKind;
use crate::world::ShapeHandle;

/// Shapes taking part in the contact sweep, filed by kind in the order they
/// were added.
#[derive(Debug, Clone, Default)]
pub struct ObjectList {
    cuboids: Vec<ShapeHandle>,
    circles: Vec<ShapeHandle>,
    half_spaces: Vec<ShapeHandle>,
}

impl ObjectList {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, kind: ShapeKind) -> &Vec<ShapeHandle> {
        match kind {
            ShapeKind::Cuboid => &self.cuboids,
            ShapeKind::Circle => &self.circles,
            ShapeKind::HalfSpace => &self.half_spaces,
        }
    }

    fn bucket_mut(&mut self, kind: ShapeKind) -> &mut Vec<ShapeHandle> {
        match kind {
            ShapeKind::Cuboid => &mut self.cuboids,
            ShapeKind::Circle => &mut self.circles,
            ShapeKind::HalfSpace => &mut self.half_spaces,
        }
    }

    /// Adds a shape. Returns `false` if it is already listed.
    pub fn insert(&mut self, handle: ShapeHandle, kind: ShapeKind) -> bool {
        let bucket = self.bucket_mut(kind);
        if bucket.contains(&handle) {
            return false;
        }
        bucket.push(handle);
        true
    }

    /// Removes every entry of `kind` for which `matches` holds and returns
    /// how many went. Order of the survivors is preserved.
    pub fn remove_matching<F>(&mut self, kind: ShapeKind, mut matches: F) -> usize
    where
        F: FnMut(ShapeHandle) -> bool,
    {
        let bucket = self.bucket_mut(kind);
        let before = bucket.len();
        bucket.retain(|&handle| !matches(handle));
        before - bucket.len()
    }

    /// Drops a handle from whichever bucket holds it.
    pub fn forget(&mut self, handle: ShapeHandle) -> bool {
        let mut removed = 0;
        for kind in [ShapeKind::Cuboid, ShapeKind::Circle, ShapeKind::HalfSpace] {
            removed += self.remove_matching(kind, |listed| listed == handle);
        }
        removed > 0
    }

    pub fn contains(&self, handle: ShapeHandle) -> bool {
        [ShapeKind::Cuboid, ShapeKind::Circle, ShapeKind::HalfSpace]
            .into_iter()
            .any(|kind| self.bucket(kind).contains(&handle))
    }

    pub fn cuboids(&self) -> &[ShapeHandle] {
        &self.cuboids
    }

    pub fn circles(&self) -> &[ShapeHandle] {
        &self.circles
    }

    pub fn half_spaces(&self) -> &[ShapeHandle] {
        &self.half_spaces
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
