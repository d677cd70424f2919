//! Instance pool: slot table of playing clips with LIFO slot reuse.

use std::sync::Arc;

use crate::data::AnimationClip;
use crate::error::PlayError;
use crate::ids::{InstanceHandle, SlotAllocator};
use crate::library::ClipLibrary;

/// One playing clip.
#[derive(Debug, Clone)]
pub struct AnimationInstance {
    clip: Arc<AnimationClip>,
    /// Playback time in ticks, always in `[0, clip.duration())`.
    time: f32,
}

impl AnimationInstance {
    fn new(clip: Arc<AnimationClip>) -> Self {
        Self { clip, time: 0.0 }
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

/// `t mod duration`, normalized into `[0, duration)`.
pub(crate) fn wrap_time(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 || !t.is_finite() {
        return 0.0;
    }
    let m = t % duration;
    let m = if m < 0.0 { m + duration } else { m };
    // m + duration can round up to duration for tiny negative m
    if m >= duration {
        0.0
    } else {
        m
    }
}

#[derive(Debug, Default)]
pub struct InstancePool {
    slots: Vec<Option<AnimationInstance>>,
    alloc: SlotAllocator,
}

impl InstancePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            alloc: SlotAllocator::with_capacity(capacity),
        }
    }

    /// Start playing `clip_name` from time 0.
    pub fn play(
        &mut self,
        library: &ClipLibrary,
        clip_name: &str,
    ) -> Result<InstanceHandle, PlayError> {
        let clip = library.get(clip_name).ok_or_else(|| PlayError::UnknownClip {
            name: clip_name.to_string(),
        })?;
        Ok(self.play_clip(clip))
    }

    /// Start playing a clip already in hand from time 0.
    pub fn play_clip(&mut self, clip: Arc<AnimationClip>) -> InstanceHandle {
        let handle = self.alloc.alloc();
        let index = handle.index() as usize;
        if index == self.slots.len() {
            self.slots.push(None);
        }
        log::debug!("play '{}' as {handle}", clip.name());
        self.slots[index] = Some(AnimationInstance::new(clip));
        handle
    }

    /// Destroy the instance and release its slot for reuse.
    ///
    /// Stale, freed or out-of-range handles are rejected without touching the
    /// pool, so a slot can never sit on the free list twice.
    pub fn stop(&mut self, handle: InstanceHandle) -> Result<(), PlayError> {
        if !self.alloc.free(handle) {
            return Err(PlayError::InvalidHandle { handle });
        }
        self.slots[handle.index() as usize] = None;
        log::debug!("stop {handle}");
        Ok(())
    }

    /// Advance every live instance by `delta_time`, wrapping at clip duration.
    pub fn tick(&mut self, delta_time: f32) {
        for inst in self.slots.iter_mut().flatten() {
            inst.time = wrap_time(inst.time + delta_time, inst.clip.duration());
        }
    }

    #[inline]
    pub fn get(&self, handle: InstanceHandle) -> Option<&AnimationInstance> {
        if !self.alloc.is_live(handle) {
            return None;
        }
        self.slots.get(handle.index() as usize)?.as_ref()
    }

    #[inline]
    pub fn time(&self, handle: InstanceHandle) -> Option<f32> {
        self.get(handle).map(AnimationInstance::time)
    }

    /// Jump to `time`, wrapped into the clip's range.
    pub fn seek(&mut self, handle: InstanceHandle, time: f32) -> Result<(), PlayError> {
        if !self.alloc.is_live(handle) {
            return Err(PlayError::InvalidHandle { handle });
        }
        match self.slots.get_mut(handle.index() as usize) {
            Some(Some(inst)) => {
                inst.time = wrap_time(time, inst.clip.duration());
                Ok(())
            }
            _ => Err(PlayError::InvalidHandle { handle }),
        }
    }

    /// Handles of all live instances, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = InstanceHandle> + '_ {
        (0..self.slots.len() as u32).filter_map(move |i| self.alloc.live_handle(i))
    }

    /// Live instances.
    pub fn len(&self) -> usize {
        self.alloc.live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots in the table, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Stop every instance. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        log::debug!("clearing {} instances", self.len());
        self.alloc.reset();
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
