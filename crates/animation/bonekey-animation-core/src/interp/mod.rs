//! Interpolation helpers for keyframe sampling.
//!
//! Positions blend linearly; rotations use a normalized linear blend with a
//! hemisphere sign correction (see [`functions::nlerp_quat`]).

pub mod functions;

pub use functions::{lerp_f32, lerp_vec3, nlerp_quat};
