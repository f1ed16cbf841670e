pub mod api;
pub mod core;
pub mod components;
pub mod extensions;
pub mod transition;
pub mod methods;
pub mod script;

// Re-export key types at crate root for convenience
pub use api::config::SchedulerConfig;
pub use api::error::{Result, TweenError};
pub use api::types::{GroupId, NodeId, TransitionHandle};
pub use components::node::Node;
pub use crate::core::scene::Scene;
pub use extensions::{BlendStyle, Easing, Tweenable, ease, lerp, smooth};
pub use transition::{
    Alpha, Chain, Conflict, ConflictKey, DelayState, GroupPhase, LocalPosition, LocalScale,
    LocalScaleX, NodeProperty, Pool, PoolStats, Poolable, PropertyKind, StatePools, Timing,
    TransitionScheduler, TransitionSettings, TransitionState, TransitionStatus, ValueState,
};
pub use methods::{
    DelayMethod, EventMethod, JoinMethod, NodeAlpha, PropertyMethod, TransformLocalPosition,
    TransformLocalScale, TransformLocalScaleX, TransitionMethod,
};
pub use script::{GoalValue, MethodKind, ScriptStep, TransitionScript};
