//! Clip data model: keyframe channels and the clips that group them.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Position and rotation keys driving one skeletal node.
///
/// Keys carry no timestamps. Key `i` of a sequence with `n` keys sits at
/// `i / (n - 1)` of the clip duration, so the two sequences may have
/// different lengths.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyframeChannel {
    pub node_name: String,
    /// Translation keys (x, y, z).
    pub positions: Vec<[f32; 3]>,
    /// Rotation keys as quaternions (x, y, z, w).
    pub rotations: Vec<[f32; 4]>,
}

impl KeyframeChannel {
    pub fn new(
        node_name: impl Into<String>,
        positions: Vec<[f32; 3]>,
        rotations: Vec<[f32; 4]>,
    ) -> Self {
        Self {
            node_name: node_name.into(),
            positions,
            rotations,
        }
    }

    /// Both key sequences must be non-empty.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.positions.is_empty() || self.rotations.is_empty() {
            return Err(LoadError::EmptyChannel {
                node_name: self.node_name.clone(),
            });
        }
        Ok(())
    }
}

/// An immutable, loaded animation clip.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    name: String,
    /// Duration in ticks, > 0.
    duration: f32,
    channels: Vec<KeyframeChannel>,
    /// node name -> index into `channels`; the last channel for a name wins.
    by_node: HashMap<String, usize>,
}

impl AnimationClip {
    /// Build a clip, validating the duration and every channel.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        channels: Vec<KeyframeChannel>,
    ) -> Result<Self, LoadError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(LoadError::InvalidDuration { duration });
        }
        let mut by_node = HashMap::with_capacity(channels.len());
        for (idx, channel) in channels.iter().enumerate() {
            channel.validate()?;
            by_node.insert(channel.node_name.clone(), idx);
        }
        Ok(Self {
            name: name.into(),
            duration,
            channels,
            by_node,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// All channels in load order, shadowed duplicates included.
    pub fn channels(&self) -> &[KeyframeChannel] {
        &self.channels
    }

    /// Channel driving `node_name`.
    pub fn channel(&self, node_name: &str) -> Option<&KeyframeChannel> {
        self.by_node.get(node_name).map(|&idx| &self.channels[idx])
    }

    /// Channels reachable by name, i.e. without the shadowed duplicates, in
    /// load order.
    pub fn addressable_channels(&self) -> impl Iterator<Item = &KeyframeChannel> {
        self.channels
            .iter()
            .enumerate()
            .filter(move |(idx, c)| self.by_node.get(&c.node_name) == Some(idx))
            .map(|(_, c)| c)
    }

    /// Node names that appear on more than one channel.
    pub fn duplicate_node_names(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = self
            .addressable_channels()
            .filter(|c| {
                self.channels
                    .iter()
                    .filter(|other| other.node_name == c.node_name)
                    .nth(1)
                    .is_some()
            })
            .map(|c| c.node_name.as_str())
            .collect();
        dups.sort_unstable();
        dups
    }
}
