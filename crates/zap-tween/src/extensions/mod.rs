// extensions/mod.rs
//
// Scene-independent building blocks: ease curves and value blending.

pub mod easing;
pub mod value;

pub use easing::{Easing, ease, lerp, smooth};
pub use value::{BlendStyle, Tweenable};
