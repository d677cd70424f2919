//! Channel sampling at an instance's playback time.
//!
//! Model:
//! - Keys have no timestamps; a sequence of `n` keys is spread uniformly over
//!   `[0, duration]`, so the fractional key for time `t` is
//!   `t * (n - 1) / duration`. Clips whose keys are not evenly spaced will
//!   sample off-beat; that is a property of the clip format.
//! - Positions blend linearly between the bracketing keys.
//! - Rotations use the hemisphere-corrected NLERP in `interp::functions`.
//! - Single-key sequences return their key unchanged.
//!
//! API:
//! - sample_channel(pool, handle, node) for one bone of a playing instance
//! - sample_pose(pool, handle) for every bone of a playing instance
//! - KeyframeChannel::sample(time, duration) without a pool

use serde::{Deserialize, Serialize};

use crate::data::KeyframeChannel;
use crate::error::SampleError;
use crate::ids::InstanceHandle;
use crate::interp::functions::{lerp_vec3, nlerp_quat};
use crate::pool::InstancePool;

/// Interpolated local transform of one node.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChannelSample {
    pub position: [f32; 3],
    /// Unit quaternion (x, y, z, w).
    pub rotation: [f32; 4],
}

/// Bracketing key index and blend weight for `time` over `key_count`
/// uniformly spaced keys. Requires `key_count >= 2`.
///
/// The index is clamped to `key_count - 2` so `index + 1` is always a valid
/// key, and the weight to `[0, 1]`.
#[inline]
fn key_segment(time: f32, duration: f32, key_count: usize) -> (usize, f32) {
    let last_segment = key_count - 2;
    let key = (time * (key_count - 1) as f32 / duration).max(0.0);
    let index = (key.floor() as usize).min(last_segment);
    let lambda = (key - index as f32).clamp(0.0, 1.0);
    (index, lambda)
}

fn sample_positions(keys: &[[f32; 3]], time: f32, duration: f32) -> [f32; 3] {
    match keys {
        [] => [0.0; 3],
        [only] => *only,
        _ => {
            let (i, lambda) = key_segment(time, duration, keys.len());
            lerp_vec3(keys[i], keys[i + 1], lambda)
        }
    }
}

fn sample_rotations(keys: &[[f32; 4]], time: f32, duration: f32) -> [f32; 4] {
    match keys {
        [] => [0.0, 0.0, 0.0, 1.0],
        [only] => *only,
        _ => {
            let (i, lambda) = key_segment(time, duration, keys.len());
            nlerp_quat(keys[i], keys[i + 1], lambda)
        }
    }
}

impl KeyframeChannel {
    /// Sample this channel at `time` within a clip of length `duration`.
    pub fn sample(&self, time: f32, duration: f32) -> ChannelSample {
        ChannelSample {
            position: sample_positions(&self.positions, time, duration),
            rotation: sample_rotations(&self.rotations, time, duration),
        }
    }
}

/// Sample the channel driving `node_name` of the instance behind `handle`.
pub fn sample_channel(
    pool: &InstancePool,
    handle: InstanceHandle,
    node_name: &str,
) -> Result<ChannelSample, SampleError> {
    let inst = pool
        .get(handle)
        .ok_or(SampleError::InvalidHandle { handle })?;
    let clip = inst.clip();
    let channel = clip
        .channel(node_name)
        .ok_or_else(|| SampleError::UnknownChannel {
            node_name: node_name.to_string(),
        })?;
    Ok(channel.sample(inst.time(), clip.duration()))
}

/// Sample every addressable channel of the instance behind `handle`, in clip
/// load order.
pub fn sample_pose(
    pool: &InstancePool,
    handle: InstanceHandle,
) -> Result<Vec<(String, ChannelSample)>, SampleError> {
    let inst = pool
        .get(handle)
        .ok_or(SampleError::InvalidHandle { handle })?;
    let clip = inst.clip();
    Ok(clip
        .addressable_channels()
        .map(|c| (c.node_name.clone(), c.sample(inst.time(), clip.duration())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_segment_uniform_spacing() {
        // 5 keys over 4 ticks: one key per tick.
        assert_eq!(key_segment(0.0, 4.0, 5), (0, 0.0));
        assert_eq!(key_segment(2.5, 4.0, 5), (2, 0.5));
        // Last segment is clamped so index + 1 stays in range.
        assert_eq!(key_segment(4.0, 4.0, 5), (3, 1.0));
        assert_eq!(key_segment(-1.0, 4.0, 5), (0, 0.0));
    }

    #[test]
    fn different_key_counts_per_sequence() {
        let ch = KeyframeChannel::new(
            "n",
            vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [4.0, 0.0, 0.0]],
            vec![[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]],
        );
        let s = ch.sample(1.0, 4.0);
        assert_eq!(s.position, [1.0, 0.0, 0.0]);
        assert_eq!(s.rotation, [0.0, 0.0, 0.0, 1.0]);
    }
}
