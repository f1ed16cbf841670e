//! Transition states, their pools, and the scheduler that drives them.

pub mod group;
pub mod pool;
pub mod property;
pub mod scheduler;
pub mod state;

pub use group::{GroupPhase, Timing, TransitionSettings, TransitionStatus};
pub use pool::{Pool, PoolStats, Poolable, StatePools};
pub use property::{Alpha, LocalPosition, LocalScale, LocalScaleX, NodeProperty, ValueState};
pub use scheduler::{Chain, TransitionScheduler};
pub use state::{Conflict, ConflictKey, DelayState, PropertyKind, TransitionState};
