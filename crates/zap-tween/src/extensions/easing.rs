// extensions/easing.rs
//
// Ease curves mapping normalized progress to shaped progress.
// Pure math: no scene access, no state.

use std::f32::consts::PI;
use serde::{Deserialize, Serialize};

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;

/// Easing curve selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Smoothstep: zero velocity at both ends.
    Smooth,
    /// Smootherstep: zero velocity and acceleration at both ends.
    Smoother,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Pulls back below 0 before moving forward.
    BackIn,
    /// Overshoots 1 then settles.
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    ElasticIn,
    ElasticOut,
}

impl Easing {
    /// Map progress `t` through the curve.
    ///
    /// `t` is clamped to [0, 1] here and nowhere else. The result is 0 at
    /// `t = 0` and 1 at `t = 1`; Back and Elastic leave [0, 1] in between.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Smooth => t * t * (3.0 - 2.0 * t),
            Easing::Smoother => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),

            Easing::QuadIn => power_in(t, 2),
            Easing::QuadOut => power_out(t, 2),
            Easing::QuadInOut => power_in_out(t, 2),
            Easing::CubicIn => power_in(t, 3),
            Easing::CubicOut => power_out(t, 3),
            Easing::CubicInOut => power_in_out(t, 3),
            Easing::QuartIn => power_in(t, 4),
            Easing::QuartOut => power_out(t, 4),
            Easing::QuartInOut => power_in_out(t, 4),

            Easing::SineIn => 1.0 - (t * PI * 0.5).cos(),
            Easing::SineOut => (t * PI * 0.5).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * PI).cos()),

            Easing::ExpoIn => expo_in(t),
            Easing::ExpoOut => 1.0 - expo_in(1.0 - t),
            Easing::ExpoInOut => in_out(t, expo_in),

            Easing::BackIn => back_in(t),
            Easing::BackOut => 1.0 - back_in(1.0 - t),
            Easing::BackInOut => {
                let u = 2.0 * t;
                if t < 0.5 {
                    u * u * ((BACK_C2 + 1.0) * u - BACK_C2) * 0.5
                } else {
                    let u = u - 2.0;
                    (u * u * ((BACK_C2 + 1.0) * u + BACK_C2) + 2.0) * 0.5
                }
            }

            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),

            Easing::ElasticIn => 1.0 - elastic_out(1.0 - t),
            Easing::ElasticOut => elastic_out(t),
        }
    }
}

fn power_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

fn power_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

fn power_in_out(t: f32, n: i32) -> f32 {
    in_out(t, |u| u.powi(n))
}

/// Mirror an ease-in curve into an in-out curve.
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        0.5 * ease_in(2.0 * t)
    } else {
        1.0 - 0.5 * ease_in(2.0 - 2.0 * t)
    }
}

fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * t - 10.0)
    }
}

fn back_in(t: f32) -> f32 {
    (BACK_C1 + 1.0) * t * t * t - BACK_C1 * t * t
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    let (offset, base) = if t < 1.0 / D1 {
        (0.0, 0.0)
    } else if t < 2.0 / D1 {
        (1.5 / D1, 0.75)
    } else if t < 2.5 / D1 {
        (2.25 / D1, 0.9375)
    } else {
        (2.625 / D1, 0.984375)
    };
    let u = t - offset;
    N1 * u * u + base
}

fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

/// Shape progress `t` with `easing`. Same as [`Easing::apply`].
#[inline]
pub fn smooth(easing: Easing, t: f32) -> f32 {
    easing.apply(t)
}

/// Unclamped linear interpolation; `t` outside [0, 1] extrapolates.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}
