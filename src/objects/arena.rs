//! Generational arena owning every body in a world.
//!
//! Shapes and contacts refer to bodies through `BodyHandle`s. Releasing a
//! body bumps its slot's generation so old handles stop resolving.

use std::ops::{Index, IndexMut};

use super::body::Body;
use crate::error::{EngineError, EngineResult};

/// Opaque reference to a body in a `BodyArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a body and returns its handle. Released slots are reused first.
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyHandle {
            index,
            generation: 0,
        }
    }

    /// Releases a body. Every copy of `handle` becomes stale.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    /// Like `get`, but reports a stale handle as an error.
    pub fn body(&self, handle: BodyHandle) -> EngineResult<&Body> {
        self.get(handle).ok_or(EngineError::StaleBody(handle))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> EngineResult<&mut Body> {
        self.get_mut(handle).ok_or(EngineError::StaleBody(handle))
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Borrows two distinct bodies mutably at once.
    pub fn pair_mut(
        &mut self,
        first: BodyHandle,
        second: BodyHandle,
    ) -> EngineResult<(&mut Body, &mut Body)> {
        if first.index == second.index {
            return Err(EngineError::SelfContact(first));
        }
        // Validate both before splitting so the error names the right handle.
        self.body(first)?;
        self.body(second)?;

        let (lo, hi) = (first.index.min(second.index), first.index.max(second.index));
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        let lo_body = head[lo as usize].body.as_mut();
        let hi_body = tail[0].body.as_mut();
        match (lo_body, hi_body) {
            (Some(lo_body), Some(hi_body)) => {
                if first.index < second.index {
                    Ok((lo_body, hi_body))
                } else {
                    Ok((hi_body, lo_body))
                }
            }
            _ => Err(EngineError::StaleBody(first)),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates live bodies with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body.as_ref().map(|body| {
                (
                    BodyHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    body,
                )
            })
        })
    }
}

impl Index<BodyHandle> for BodyArena {
    type Output = Body;

    fn index(&self, handle: BodyHandle) -> &Body {
        match self.get(handle) {
            Some(body) => body,
            None => panic!("stale body handle {handle:?}"),
        }
    }
}

impl IndexMut<BodyHandle> for BodyArena {
    fn index_mut(&mut self, handle: BodyHandle) -> &mut Body {
        match self.get_mut(handle) {
            Some(body) => body,
            None => panic!("stale body handle {handle:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn body_at(x: f64) -> Body {
        Body::new(Vec2::new(x, 0.0), 0.0, 1.0, 1.0)
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        let b = arena.insert(body_at(2.0));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[a].position().x, 1.0);
        assert_eq!(arena[b].position().x, 2.0);
    }

    #[test]
    fn test_remove_invalidates_handle() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        assert!(arena.remove(a).is_some());
        assert!(!arena.contains(a));
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.body(a), Err(EngineError::StaleBody(a)));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_reused_slot_does_not_resurrect_old_handle() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        arena.remove(a);
        let b = arena.insert(body_at(5.0));
        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert_eq!(arena[b].position().x, 5.0);
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        let b = arena.insert(body_at(2.0));
        {
            let (first, second) = arena.pair_mut(b, a).unwrap();
            assert_eq!(first.position().x, 2.0);
            assert_eq!(second.position().x, 1.0);
            first.translate(Vec2::new(1.0, 0.0));
        }
        assert_eq!(arena[b].position().x, 3.0);
    }

    #[test]
    fn test_pair_mut_rejects_same_body() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        assert_eq!(arena.pair_mut(a, a).unwrap_err(), EngineError::SelfContact(a));
    }

    #[test]
    fn test_iter_skips_released_slots() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        let b = arena.insert(body_at(2.0));
        arena.remove(a);
        let handles: Vec<BodyHandle> = arena.iter().map(|(h, _)| h).collect();
        assert_eq!(handles, vec![b]);
    }

    #[test]
    #[should_panic]
    fn test_index_stale_handle_panics() {
        let mut arena = BodyArena::new();
        let a = arena.insert(body_at(1.0));
        arena.remove(a);
        let _body: Body = arena[a];
    }
}
