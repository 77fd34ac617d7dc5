//! Pose, blend and metadata samplers.
//!
//! All sampling is pull-based and synchronous: callers hand in a query time
//! and an output snapshot to fill. Shared segment time math lives here.

pub mod blend;
pub mod meta;
pub mod pose;

pub use blend::sample_pose_blended;
pub use meta::sample_metadata;
pub use pose::sample_pose;

use crate::curve::Curve;
use crate::spatial::lerp;

/// Eased interpolation factor for the segment between two keys, honoring
/// loop wraparound (a successor earlier than its key means the segment
/// crosses `length == 0`). A zero-length segment takes the later value.
pub(crate) fn segment_factor(
    time_a: f32,
    time_b: f32,
    length: f32,
    target: f32,
    curve: Curve,
) -> f32 {
    let mut time_b = time_b;
    let mut target = target;
    if time_b < time_a {
        time_b += length;
        if target < time_a {
            target += length;
        }
    }
    if time_b == time_a {
        return 1.0;
    }
    let f = (target - time_a) / (time_b - time_a);
    curve.apply(f.clamp(0.0, 1.0))
}

/// Map a query time through a mainline segment's curve. The segment's
/// natural end is the successor's time when it lies after the key,
/// otherwise (successor wrapped to the start) the animation length.
pub(crate) fn adjusted_time(
    time_a: f32,
    time_b: f32,
    curve: Curve,
    length: f32,
    target: f32,
) -> f32 {
    let next = if time_b > time_a { time_b } else { length };
    let f = segment_factor(time_a, time_b, length, target, curve);
    lerp(time_a, next, f)
}
