//! Fixed-capacity entity pool
//!
//! Slots are allocated once at construction and reused forever. A slot's
//! identity is its index; the pool never grows, shrinks or reorders.

/// An entity that can live in an [`EntityPool`] slot
pub trait Poolable {
    /// Whether the slot currently takes part in simulation
    fn is_active(&self) -> bool;
    /// Return the slot to the free state
    fn release(&mut self);
}

/// Flat fixed-size array of reusable entities
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Box<[T]>,
}

impl<T: Poolable> EntityPool<T> {
    /// Build a pool of `capacity` slots, initializing slot `i` with `init(i)`
    pub fn from_fn(capacity: usize, init: impl FnMut(usize) -> T) -> Self {
        Self {
            slots: (0..capacity).map(init).collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// First inactive slot, or `None` when the pool is exhausted.
    ///
    /// The slot stays free until the caller activates it. Exhaustion is a
    /// normal saturating condition, not an error.
    pub fn acquire(&mut self) -> Option<(usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.is_active())
    }

    /// Mark a slot inactive. Out-of-range indices are ignored.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.release();
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// All slots, active and inactive, in index order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Active slots with their indices
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Slot {
        active: bool,
        value: u32,
    }

    impl Poolable for Slot {
        fn is_active(&self) -> bool {
            self.active
        }

        fn release(&mut self) {
            self.active = false;
        }
    }

    #[test]
    fn test_acquire_returns_first_free_slot() {
        let mut pool = EntityPool::from_fn(4, |_| Slot::default());
        pool.get_mut(0).unwrap().active = true;
        pool.get_mut(2).unwrap().active = true;

        let (index, slot) = pool.acquire().unwrap();
        assert_eq!(index, 1);
        slot.active = true;
        slot.value = 7;

        let (index, _) = pool.acquire().unwrap();
        assert_eq!(index, 3);
        assert_eq!(pool.get(1).unwrap().value, 7);
    }

    #[test]
    fn test_exhausted_pool_is_a_no_op() {
        let mut pool = EntityPool::from_fn(2, |_| Slot {
            active: true,
            value: 0,
        });
        assert!(pool.acquire().is_none());
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_release_frees_slot() {
        let mut pool = EntityPool::from_fn(3, |_| Slot {
            active: true,
            value: 0,
        });
        pool.release(1);
        pool.release(99);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.acquire().map(|(i, _)| i), Some(1));
        let active: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
        assert_eq!(active, vec![0, 2]);
    }
}
