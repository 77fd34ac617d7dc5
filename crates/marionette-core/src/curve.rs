//! Speed-curve evaluation:
//! - polynomial kinds (De Casteljau repeated lerp over [0, c1, .., 1])
//! - cubic-bezier timing (Newton solve with bisection fallback)
//!
//! Curves map the raw time ratio between two keys to an eased ratio. They
//! are pure and never fail; malformed control scalars just produce a
//! degenerate curve.

use serde::{Deserialize, Serialize};

const BEZIER_EPSILON: f32 = 1.0 / 200.0;
const NEWTON_ITERATIONS: usize = 8;

/// Easing applied to the normalized time between a key and its successor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// Hold the starting key until the segment ends.
    Instant,
    #[default]
    Linear,
    Quadratic {
        c1: f32,
    },
    Cubic {
        c1: f32,
        c2: f32,
    },
    Quartic {
        c1: f32,
        c2: f32,
        c3: f32,
    },
    Quintic {
        c1: f32,
        c2: f32,
        c3: f32,
        c4: f32,
    },
    /// Cubic bezier timing anchored at (0,0)/(1,1) with interior control
    /// points (x1,y1) and (x2,y2), CSS `cubic-bezier` semantics.
    Bezier {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

impl Curve {
    /// Apply this curve to a raw ratio `f`.
    pub fn apply(self, f: f32) -> f32 {
        match self {
            Curve::Instant => 0.0,
            Curve::Linear => f,
            Curve::Quadratic { c1 } => quadratic(0.0, c1, 1.0, f),
            Curve::Cubic { c1, c2 } => cubic(0.0, c1, c2, 1.0, f),
            Curve::Quartic { c1, c2, c3 } => quartic(0.0, c1, c2, c3, 1.0, f),
            Curve::Quintic { c1, c2, c3, c4 } => quintic(0.0, c1, c2, c3, c4, 1.0, f),
            Curve::Bezier { x1, y1, x2, y2 } => bezier_ease(f, x1, y1, x2, y2),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn quadratic(c0: f32, c1: f32, c2: f32, t: f32) -> f32 {
    lerp(lerp(c0, c1, t), lerp(c1, c2, t), t)
}

#[inline]
fn cubic(c0: f32, c1: f32, c2: f32, c3: f32, t: f32) -> f32 {
    lerp(quadratic(c0, c1, c2, t), quadratic(c1, c2, c3, t), t)
}

#[inline]
fn quartic(c0: f32, c1: f32, c2: f32, c3: f32, c4: f32, t: f32) -> f32 {
    lerp(cubic(c0, c1, c2, c3, t), cubic(c1, c2, c3, c4, t), t)
}

#[inline]
fn quintic(c0: f32, c1: f32, c2: f32, c3: f32, c4: f32, c5: f32, t: f32) -> f32 {
    lerp(quartic(c0, c1, c2, c3, c4, t), quartic(c1, c2, c3, c4, c5, t), t)
}

/// One-axis cubic bezier anchored at 0 and 1, evaluated with Horner
/// coefficients. Shared by the x-solve and the final y evaluation.
#[inline]
fn sample_axis(p1: f32, p2: f32, t: f32) -> f32 {
    // c*t + b*t^2 + a*t^3 with anchors fixed at 0 and 1
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

#[inline]
fn sample_axis_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Solve bezier x(t) = x for the parametric t: Newton first, bisection when
/// Newton diverges or the derivative vanishes.
fn solve_axis(x: f32, x1: f32, x2: f32) -> f32 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = sample_axis(x1, x2, t) - x;
        if err.abs() < BEZIER_EPSILON {
            return t;
        }
        let d = sample_axis_derivative(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Bisection fallback; x(t) is monotonic for control points in [0,1].
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    t = x;
    while lo < hi {
        let v = sample_axis(x1, x2, t);
        if (v - x).abs() < BEZIER_EPSILON {
            return t;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        let mid = 0.5 * (lo + hi);
        if mid == t {
            break;
        }
        t = mid;
    }
    t
}

/// Eased ratio for cubic-bezier timing with control points (x1,y1,x2,y2).
fn bezier_ease(f: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let f = f.clamp(0.0, 1.0);
    // Fast path: bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return f;
    }
    if f == 0.0 || f == 1.0 {
        return f;
    }
    sample_axis(y1, y2, solve_axis(f, x1, x2))
}
