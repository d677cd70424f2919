//! Instance handles and the slot allocator behind them.

use serde::{Deserialize, Serialize};

/// Opaque handle to a playing animation instance.
///
/// `index` addresses a slot in the pool; `generation` is bumped every time the
/// slot is freed, so a handle kept past its `stop` no longer matches and is
/// rejected instead of aliasing whichever instance reuses the slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle {
    index: u32,
    generation: u32,
}

impl InstanceHandle {
    #[inline]
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the owning pool.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Slot allocator with LIFO index reuse and per-slot generations.
///
/// Freed indices are handed out again most-recently-freed first; new indices
/// are only minted when the free list is empty. A slot whose generation has
/// reached `u32::MAX` is retired on free and never handed out again, so a
/// stale handle can not match after the counter would have wrapped.
#[derive(Default, Debug)]
pub struct SlotAllocator {
    generations: Vec<u32>,
    live: Vec<bool>,
    free: Vec<u32>,
    retired: usize,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            live: Vec::with_capacity(capacity),
            free: Vec::new(),
            retired: 0,
        }
    }

    /// Allocate a slot, returning its handle.
    #[inline]
    pub fn alloc(&mut self) -> InstanceHandle {
        if let Some(index) = self.free.pop() {
            let i = index as usize;
            self.live[i] = true;
            return InstanceHandle::new(index, self.generations[i]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.live.push(true);
        InstanceHandle::new(index, 0)
    }

    /// Free the slot behind `handle`. Returns false (and changes nothing) when
    /// the handle is out of range, already freed, or from an older generation.
    #[inline]
    pub fn free(&mut self, handle: InstanceHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.release(handle.index);
        true
    }

    fn release(&mut self, index: u32) {
        let i = index as usize;
        self.live[i] = false;
        match self.generations[i].checked_add(1) {
            Some(next) => {
                self.generations[i] = next;
                self.free.push(index);
            }
            None => self.retired += 1,
        }
    }

    #[inline]
    pub fn is_live(&self, handle: InstanceHandle) -> bool {
        let i = handle.index as usize;
        i < self.generations.len() && self.live[i] && self.generations[i] == handle.generation
    }

    /// Current handle for slot `index`, if that slot is live.
    #[inline]
    pub fn live_handle(&self, index: u32) -> Option<InstanceHandle> {
        let i = index as usize;
        (i < self.live.len() && self.live[i])
            .then(|| InstanceHandle::new(index, self.generations[i]))
    }

    /// Total slots ever minted, live or free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free.len() - self.retired
    }

    /// Free every live slot. Outstanding handles become stale.
    pub fn reset(&mut self) {
        for i in 0..self.generations.len() as u32 {
            if self.live[i as usize] {
                self.release(i);
            }
        }
    }
}
