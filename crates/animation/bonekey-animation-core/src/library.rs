//! Clip library: owns loaded clips by name.
//!
//! Clips are handed out as `Arc<AnimationClip>`. Instances hold their own
//! reference, so replacing, removing or clearing a clip never invalidates an
//! instance that is already playing it.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::data::{AnimationClip, KeyframeChannel};
use crate::error::LoadError;
use crate::source::AnimationSource;

#[derive(Debug)]
pub struct ClipLibrary {
    clips: HashMap<String, Arc<AnimationClip>>,
    warn_on_duplicate_channels: bool,
}

impl Default for ClipLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            clips: HashMap::with_capacity(capacity),
            warn_on_duplicate_channels: true,
        }
    }

    pub fn set_warn_on_duplicate_channels(&mut self, warn: bool) {
        self.warn_on_duplicate_channels = warn;
    }

    /// Load the first track of `source` as clip `name`.
    ///
    /// Extra tracks are ignored. An existing clip of the same name is
    /// replaced; instances already playing it keep the old data.
    pub fn load(&mut self, name: &str, source: &dyn AnimationSource) -> Result<(), LoadError> {
        let scene = source
            .scene()
            .map_err(|reason| LoadError::SourceUnreadable { reason })?;

        let Some(track) = scene.tracks.first() else {
            return Err(LoadError::NoAnimationData);
        };
        if scene.tracks.len() > 1 {
            log::debug!(
                "clip '{name}': using first of {} tracks, ignoring the rest",
                scene.tracks.len()
            );
        }

        let channels = track
            .channels
            .iter()
            .map(|c| {
                KeyframeChannel::new(
                    c.node_name.clone(),
                    c.position_keys.clone(),
                    c.rotation_keys.clone(),
                )
            })
            .collect();
        let clip = AnimationClip::new(name, track.duration, channels)?;

        log::info!(
            "loaded clip '{name}' ({} channels, duration {})",
            clip.channels().len(),
            clip.duration()
        );
        self.insert(clip);
        Ok(())
    }

    /// Insert an already built clip under its own name, returning the clip it
    /// replaced.
    pub fn insert(&mut self, clip: AnimationClip) -> Option<Arc<AnimationClip>> {
        if self.warn_on_duplicate_channels {
            for node in clip.duplicate_node_names() {
                log::warn!(
                    "clip '{}': several channels drive node '{node}', the last one wins",
                    clip.name()
                );
            }
        }
        let replaced = self.clips.insert(clip.name().to_string(), Arc::new(clip));
        if let Some(old) = &replaced {
            log::debug!("replaced clip '{}'", old.name());
        }
        replaced
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.get(name).cloned()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<AnimationClip>> {
        self.clips.remove(name)
    }

    /// Drop every clip the library owns. Playing instances keep theirs.
    pub fn clear(&mut self) {
        log::debug!("clearing {} clips", self.clips.len());
        self.clips.clear();
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{JsonSource, SourceChannel, SourceScene, SourceTrack};

    fn scene(duration: f32, nodes: &[&str]) -> SourceScene {
        SourceScene {
            tracks: vec![SourceTrack {
                name: None,
                duration,
                channels: nodes
                    .iter()
                    .map(|n| SourceChannel {
                        node_name: n.to_string(),
                        position_keys: vec![[0.0; 3]],
                        rotation_keys: vec![[0.0, 0.0, 0.0, 1.0]],
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn load_and_get() {
        let mut lib = ClipLibrary::new();
        lib.load("walk", &scene(2.0, &["hips", "spine"])).unwrap();
        let clip = lib.get("walk").unwrap();
        assert_eq!(clip.name(), "walk");
        assert_eq!(clip.duration(), 2.0);
        assert_eq!(clip.channels().len(), 2);
        assert!(lib.get("run").is_none());
    }

    #[test]
    fn load_errors() {
        let mut lib = ClipLibrary::new();
        assert_eq!(
            lib.load("x", &SourceScene::default()),
            Err(LoadError::NoAnimationData)
        );
        assert!(matches!(
            lib.load("x", &JsonSource("not json")),
            Err(LoadError::SourceUnreadable { .. })
        ));
        assert!(matches!(
            lib.load("x", &scene(0.0, &["a"])),
            Err(LoadError::InvalidDuration { .. })
        ));
        assert!(lib.is_empty());
    }

    #[test]
    fn reload_replaces_but_old_arc_survives() {
        let mut lib = ClipLibrary::new();
        lib.load("walk", &scene(2.0, &["a"])).unwrap();
        let old = lib.get("walk").unwrap();
        lib.load("walk", &scene(5.0, &["a", "b"])).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(old.duration(), 2.0);
        assert_eq!(lib.get("walk").unwrap().duration(), 5.0);

        lib.clear();
        assert!(lib.is_empty());
        assert_eq!(old.channels().len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut lib = ClipLibrary::new();
        lib.load("walk", &scene(1.0, &["a"])).unwrap();
        lib.load("idle", &scene(1.0, &["a"])).unwrap();
        assert_eq!(lib.names(), vec!["idle", "walk"]);
        assert!(lib.remove("idle").is_some());
        assert!(!lib.contains("idle"));
    }
}
