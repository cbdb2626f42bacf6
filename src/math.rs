use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// One of the four 90° sectors of the unit circle, counted counter-clockwise from +x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Quadrant number in 1..=4
    pub fn index(self) -> u8 {
        match self {
            Quadrant::First => 1,
            Quadrant::Second => 2,
            Quadrant::Third => 3,
            Quadrant::Fourth => 4,
        }
    }

    /// Sign of the horizontal offset from the circle center
    pub fn x_sign(self) -> f64 {
        match self {
            Quadrant::First | Quadrant::Fourth => 1.0,
            Quadrant::Second | Quadrant::Third => -1.0,
        }
    }

    /// Sign of the vertical offset from the circle center (screen y grows downward)
    pub fn y_sign(self) -> f64 {
        match self {
            Quadrant::First | Quadrant::Second => -1.0,
            Quadrant::Third | Quadrant::Fourth => 1.0,
        }
    }

    /// Rebuilds the absolute angle in [0, 2π] from a reduced first-quadrant angle
    pub fn reconstruct(self, normalized: f64) -> f64 {
        match self {
            Quadrant::First => normalized,
            Quadrant::Second => PI - normalized,
            Quadrant::Third => PI + normalized,
            Quadrant::Fourth => TAU - normalized,
        }
    }
}

/// Wraps any real angle into [0, 2π)
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Resolves the quadrant of `theta` and its offset within that quadrant.
///
/// The returned angle always lies in [0, π/2] and measures the distance to the
/// nearest horizontal axis, so the tip can be placed with first-quadrant
/// trigonometry and then mirrored by the quadrant's signs.
pub fn resolve_quadrant(theta: f64) -> (Quadrant, f64) {
    let theta = normalize_angle(theta);

    if theta <= FRAC_PI_2 {
        (Quadrant::First, theta)
    } else if theta <= PI {
        (Quadrant::Second, PI - theta)
    } else if theta <= 3.0 * FRAC_PI_2 {
        (Quadrant::Third, theta - PI)
    } else {
        (Quadrant::Fourth, TAU - theta)
    }
}

/// Screen-space offset of the vector tip from the circle center
pub fn tip_offset(radius: f64, quadrant: Quadrant, normalized: f64) -> [f64; 2] {
    let (sin, cos) = normalized.sin_cos();
    [
        quadrant.x_sign() * radius * cos,
        quadrant.y_sign() * radius * sin,
    ]
}
