//! Engine: per-frame facade over the clip library and the instance pool.
//!
//! Methods:
//! - new, load, play, stop, update (tick), sample_channel, sample_pose, clean_up
//!
//! The driver calls `update(dt)` once per frame, before any sampling for that
//! frame. Everything is single-threaded; wrap the engine in an `RwLock` to
//! share it, with `load`/`update`/`clean_up` on the write side and sampling on
//! the read side.

use std::sync::Arc;

use crate::config::Config;
use crate::data::AnimationClip;
use crate::error::{LoadError, PlayError, SampleError};
use crate::ids::InstanceHandle;
use crate::library::ClipLibrary;
use crate::pool::InstancePool;
use crate::sampling::{self, ChannelSample};
use crate::source::AnimationSource;

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    clips: ClipLibrary,
    instances: InstancePool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        let mut clips = ClipLibrary::with_capacity(cfg.clip_capacity);
        clips.set_warn_on_duplicate_channels(cfg.warn_on_duplicate_channels);
        Self {
            clips,
            instances: InstancePool::with_capacity(cfg.instance_capacity),
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Load the first track of `source` as clip `name`.
    pub fn load(&mut self, name: &str, source: &dyn AnimationSource) -> Result<(), LoadError> {
        self.clips.load(name, source)
    }

    pub fn clip(&self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.get(name)
    }

    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    pub fn clips_mut(&mut self) -> &mut ClipLibrary {
        &mut self.clips
    }

    pub fn instances(&self) -> &InstancePool {
        &self.instances
    }

    pub fn play(&mut self, clip_name: &str) -> Result<InstanceHandle, PlayError> {
        self.instances.play(&self.clips, clip_name)
    }

    pub fn stop(&mut self, handle: InstanceHandle) -> Result<(), PlayError> {
        self.instances.stop(handle)
    }

    pub fn seek(&mut self, handle: InstanceHandle, time: f32) -> Result<(), PlayError> {
        self.instances.seek(handle, time)
    }

    pub fn time(&self, handle: InstanceHandle) -> Option<f32> {
        self.instances.time(handle)
    }

    /// Advance every playing instance by `dt` ticks.
    pub fn update(&mut self, dt: f32) {
        self.instances.tick(dt);
    }

    pub fn sample_channel(
        &self,
        handle: InstanceHandle,
        node_name: &str,
    ) -> Result<ChannelSample, SampleError> {
        sampling::sample_channel(&self.instances, handle, node_name)
    }

    pub fn sample_pose(
        &self,
        handle: InstanceHandle,
    ) -> Result<Vec<(String, ChannelSample)>, SampleError> {
        sampling::sample_pose(&self.instances, handle)
    }

    /// Stop every instance and drop every clip.
    pub fn clean_up(&mut self) {
        self.instances.clear();
        self.clips.clear();
    }
}
