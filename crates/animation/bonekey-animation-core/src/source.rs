//! Animation sources: the parsed scene handed to `ClipLibrary::load`.
//!
//! The core never touches files. An importer produces a [`SourceScene`]
//! (tracks → channels → ordered keys); anything that can hand one out
//! implements [`AnimationSource`]. [`JsonSource`] reads the JSON scene layout:
//!
//! ```json
//! { "tracks": [ { "name": "walk", "duration": 4.0, "channels": [
//!     { "node": "spine",
//!       "positionKeys": [[0, 0, 0], { "x": 1, "y": 2, "z": 3 }],
//!       "rotationKeys": [[0, 0, 0, 1]] } ] } ] }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

/// A parsed animation scene: zero or more tracks.
///
/// The serde form is the JSON scene layout itself, so a serialized scene
/// loads back through [`JsonSource`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceScene {
    #[serde(default)]
    pub tracks: Vec<SourceTrack>,
}

/// One animation track of a scene.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SourceTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Duration in ticks.
    pub duration: f32,
    #[serde(default)]
    pub channels: Vec<SourceChannel>,
}

/// Keys for one node, ordered by key index.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SourceChannel {
    #[serde(rename = "node")]
    pub node_name: String,
    #[serde(rename = "positionKeys", default, deserialize_with = "vec3_keys")]
    pub position_keys: Vec<[f32; 3]>,
    /// Quaternions in (x, y, z, w) order.
    #[serde(rename = "rotationKeys", default, deserialize_with = "quat_keys")]
    pub rotation_keys: Vec<[f32; 4]>,
}

/// Anything `ClipLibrary::load` can read a scene from.
///
/// The error string becomes `LoadError::SourceUnreadable`'s reason.
pub trait AnimationSource {
    fn scene(&self) -> Result<Cow<'_, SourceScene>, String>;
}

impl AnimationSource for SourceScene {
    fn scene(&self) -> Result<Cow<'_, SourceScene>, String> {
        Ok(Cow::Borrowed(self))
    }
}

/// JSON text in the scene layout described at module level.
#[derive(Clone, Copy, Debug)]
pub struct JsonSource<'a>(pub &'a str);

impl AnimationSource for JsonSource<'_> {
    fn scene(&self) -> Result<Cow<'_, SourceScene>, String> {
        parse_scene_json(self.0).map(Cow::Owned)
    }
}

/// Parse the JSON scene layout into a [`SourceScene`].
///
/// Vectors and quaternions may be written as arrays or as `{x, y, z[, w]}`
/// objects. Key order is preserved; per-key times, if present, are ignored.
pub fn parse_scene_json(s: &str) -> Result<SourceScene, String> {
    serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))
}

// ----- key shapes (serde) -----

fn vec3_keys<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<[f32; 3]>, D::Error> {
    let raw = Vec::<RawVec3>::deserialize(d)?;
    Ok(raw.iter().map(RawVec3::to_array).collect())
}

fn quat_keys<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<[f32; 4]>, D::Error> {
    let raw = Vec::<RawQuat>::deserialize(d)?;
    Ok(raw.iter().map(RawQuat::to_array).collect())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVec3 {
    Array([f64; 3]),
    Object { x: f64, y: f64, z: f64 },
}

impl RawVec3 {
    fn to_array(&self) -> [f32; 3] {
        match *self {
            RawVec3::Array([x, y, z]) | RawVec3::Object { x, y, z } => {
                [x as f32, y as f32, z as f32]
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuat {
    Array([f64; 4]),
    Object { x: f64, y: f64, z: f64, w: f64 },
}

impl RawQuat {
    fn to_array(&self) -> [f32; 4] {
        match *self {
            RawQuat::Array([x, y, z, w]) | RawQuat::Object { x, y, z, w } => {
                [x as f32, y as f32, z as f32, w as f32]
            }
        }
    }
}
