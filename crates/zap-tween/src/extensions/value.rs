// extensions/value.rs
//
// Values a transition can interpolate, and how a goal combines with the
// value captured when the transition begins.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// A value that can be blended and linearly interpolated.
///
/// `Mul<Self>` is component-wise for vectors, which is what
/// [`BlendStyle::Multiply`] relies on.
pub trait Tweenable:
    Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Mul<f32, Output = Self>
    + 'static
{
    /// Unclamped linear interpolation.
    #[inline]
    fn lerp_to(self, goal: Self, t: f32) -> Self {
        self + (goal - self) * t
    }
}

impl<T> Tweenable for T where
    T: Copy
        + Debug
        + Default
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Mul<f32, Output = T>
        + 'static
{
}

/// How a transition's goal relates to its begin value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendStyle {
    /// Animate to the goal as given.
    #[default]
    Replace,
    /// Animate to `begin * goal`, component-wise.
    Multiply,
    /// Animate to `begin + goal`.
    Increment,
}

impl BlendStyle {
    /// The value a transition actually ends on.
    #[inline]
    pub fn resolve<T: Tweenable>(self, begin: T, goal: T) -> T {
        match self {
            BlendStyle::Replace => goal,
            BlendStyle::Multiply => begin * goal,
            BlendStyle::Increment => begin + goal,
        }
    }
}
