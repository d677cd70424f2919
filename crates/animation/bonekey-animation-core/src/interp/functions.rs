//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - nlerp_quat (normalized linear blend with hemisphere correction)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub(crate) fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub(crate) fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Quaternion blend with hemisphere correction, quaternions in (x,y,z,w).
///
/// Weights are `(1 - t, t)` when `dot(a, b) >= 0` and `(1 - t, -t)` otherwise,
/// so the blend never travels the long way around between keys that sit on
/// opposite hemispheres. The result is renormalized. This is NLERP, not slerp:
/// angular speed is not constant across the segment.
#[inline]
pub fn nlerp_quat(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let wa = 1.0 - t;
    let wb = if dot4(a, b) >= 0.0 { t } else { -t };
    normalize4([
        a[0] * wa + b[0] * wb,
        a[1] * wa + b[1] * wb,
        a[2] * wa + b[2] * wb,
        a[3] * wa + b[3] * wb,
    ])
}
