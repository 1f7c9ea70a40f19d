use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes, addressed by [`Handle`].
///
/// Freed slots are recycled by later allocations, so a handle is only meaningful while the
/// element it was issued for is alive.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live elements.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            return handle;
        }
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Some(element) => element,
            None => panic!("`Arena::get()` - `{handle:?}` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Some(element) => element,
            None => panic!("`Arena::get_mut()` - `{handle:?}` is vacant!"),
        }
    }

    /// Borrows two distinct elements mutably at once.
    pub(crate) fn pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::pair_mut()` - handles must be distinct!");
        let (low, high) = self.slots.split_at_mut(i.max(j));
        let (first, second) = (&mut low[i.min(j)], &mut high[0]);
        let (a_slot, b_slot) = if i < j { (first, second) } else { (second, first) };
        match (a_slot.as_mut(), b_slot.as_mut()) {
            (Some(a), Some(b)) => (a, b),
            _ => panic!("`Arena::pair_mut()` - `{a:?}` or `{b:?}` is vacant!"),
        }
    }

    /// Removes an element, recycling its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        match self.slots[handle.to_index()].take() {
            Some(element) => {
                self.free.push(handle);
                element
            }
            None => panic!("`Arena::take()` - `{handle:?}` is vacant!"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
