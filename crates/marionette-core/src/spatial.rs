//! Spatial snapshots and their interpolation:
//! - component-wise lerp for position/scale/alpha
//! - spin-aware angle interpolation (single-animation playback)
//! - closer-angle interpolation (cross-animation blending only)
//! - parent -> child transform composition
//!
//! The two angle strategies are deliberately separate: spin encodes an
//! authored rotation direction, which has no meaning when blending two
//! unrelated animations.

use serde::{Deserialize, Serialize};

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn default_scale() -> f32 {
    1.0
}

fn default_alpha() -> f32 {
    1.0
}

/// Position, rotation (degrees), scale and opacity of one node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spatial {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Degrees, counter-clockwise.
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "default_scale")]
    pub scale_x: f32,
    #[serde(default = "default_scale")]
    pub scale_y: f32,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

impl Default for Spatial {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
        }
    }
}

impl Spatial {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Blend two snapshots by `f`, rotating in the direction declared by
    /// `spin`. Spin 0 holds this snapshot's angle (no rotation
    /// interpolation); spin +1/-1 always travels clockwise/counter-clockwise
    /// even when that crosses the 0/360 seam.
    pub fn interpolate(&self, other: &Spatial, f: f32, spin: i32) -> Spatial {
        Spatial {
            x: lerp(self.x, other.x, f),
            y: lerp(self.y, other.y, f),
            angle: spin_angle(self.angle, other.angle, f, spin),
            scale_x: lerp(self.scale_x, other.scale_x, f),
            scale_y: lerp(self.scale_y, other.scale_y, f),
            alpha: lerp(self.alpha, other.alpha, f),
        }
    }

    /// Compose this local snapshot with a resolved parent, in place: scale
    /// and rotate the local offset into the parent's frame, then translate.
    /// A mirrored parent (negative scale product) flips the child's
    /// rotation direction.
    pub fn apply_parent(&mut self, parent: &Spatial) {
        let px = self.x * parent.scale_x;
        let py = self.y * parent.scale_y;
        let (sin, cos) = parent.angle.to_radians().sin_cos();
        self.x = px * cos - py * sin + parent.x;
        self.y = px * sin + py * cos + parent.y;
        self.scale_x *= parent.scale_x;
        self.scale_y *= parent.scale_y;
        self.alpha *= parent.alpha;
        self.angle = parent.angle + (parent.scale_x * parent.scale_y).signum() * self.angle;
        self.angle %= 360.0;
    }
}

/// Angle lerp honoring an authored spin direction.
pub fn spin_angle(a: f32, b: f32, f: f32, spin: i32) -> f32 {
    if spin == 0 {
        return a;
    }
    let mut b = b;
    if spin > 0 && b - a < 0.0 {
        b += 360.0;
    } else if spin < 0 && b - a > 0.0 {
        b -= 360.0;
    }
    lerp(a, b, f)
}

/// Shortest-path angle lerp: pick whichever +-360 representation of `b`
/// lies closer to `a`. Used only when blending two different animations.
pub fn closer_angle(a: f32, b: f32, f: f32) -> f32 {
    let mut b = b;
    if (b - a).abs() > 180.0 {
        if b > a {
            b -= 360.0;
        } else {
            b += 360.0;
        }
    }
    lerp(a, b, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn defaults_do_not_zero_scale_or_alpha() {
        let s = Spatial::default();
        approx(s.scale_x, 1.0, 1e-6);
        approx(s.scale_y, 1.0, 1e-6);
        approx(s.alpha, 1.0, 1e-6);

        // Absent fields deserialize to the same defaults.
        let s2: Spatial = serde_json::from_str(r#"{"x": 4.0}"#).unwrap();
        approx(s2.x, 4.0, 1e-6);
        approx(s2.scale_x, 1.0, 1e-6);
        approx(s2.alpha, 1.0, 1e-6);
    }

    #[test]
    fn spin_positive_crosses_the_wrap_forward() {
        // 350 -> 10 with spin +1 passes through 360, never back through 180
        let mid = spin_angle(350.0, 10.0, 0.5, 1);
        approx(mid, 360.0, 1e-4);
        assert!(spin_angle(350.0, 10.0, 0.25, 1) > 350.0);
    }

    #[test]
    fn spin_negative_mirrors() {
        // 10 -> 350 with spin -1 goes down through 0
        let mid = spin_angle(10.0, 350.0, 0.5, -1);
        approx(mid, 0.0, 1e-4);
    }

    #[test]
    fn spin_zero_holds_start_angle() {
        approx(spin_angle(90.0, 270.0, 0.7, 0), 90.0, 1e-6);
    }

    #[test]
    fn closer_angle_takes_shortest_path() {
        // 350 vs 10: shortest path crosses the seam, midpoint 360 (== 0)
        approx(closer_angle(350.0, 10.0, 0.5), 360.0, 1e-4);
        // 10 vs 90: plain lerp
        approx(closer_angle(10.0, 90.0, 0.5), 50.0, 1e-4);
    }

    #[test]
    fn parent_composition_rotates_scales_translates() {
        let parent = Spatial {
            x: 10.0,
            y: 0.0,
            angle: 90.0,
            scale_x: 2.0,
            scale_y: 2.0,
            alpha: 0.5,
        };
        let mut child = Spatial::new(5.0, 0.0);
        child.alpha = 0.5;
        child.apply_parent(&parent);
        // (5,0) scaled to (10,0), rotated 90deg to (0,10), translated
        approx(child.x, 10.0, 1e-4);
        approx(child.y, 10.0, 1e-4);
        approx(child.angle, 90.0, 1e-4);
        approx(child.scale_x, 2.0, 1e-6);
        approx(child.alpha, 0.25, 1e-6);
    }

    #[test]
    fn mirrored_parent_flips_child_rotation() {
        let parent = Spatial {
            scale_x: -1.0,
            ..Spatial::default()
        };
        let mut child = Spatial::default();
        child.angle = 30.0;
        child.apply_parent(&parent);
        approx(child.angle, -30.0, 1e-4);
    }

    #[test]
    fn interpolate_blends_components() {
        let a = Spatial::new(0.0, 0.0);
        let mut b = Spatial::new(10.0, 20.0);
        b.scale_x = 3.0;
        b.alpha = 0.0;
        let m = a.interpolate(&b, 0.5, 1);
        approx(m.x, 5.0, 1e-6);
        approx(m.y, 10.0, 1e-6);
        approx(m.scale_x, 2.0, 1e-6);
        approx(m.alpha, 0.5, 1e-6);
    }
}
