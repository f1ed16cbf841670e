// transition/state.rs
//
// The capability set every transition kind provides to the scheduler.

use serde::{Deserialize, Serialize};
use crate::api::types::NodeId;
use crate::core::scene::Scene;
use super::pool::{Poolable, StatePools};

/// Which node property a transition writes. Used to detect two transitions
/// fighting over the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    LocalPosition,
    LocalScale,
    LocalScaleX,
    Alpha,
}

/// A (node, property) pair. Two running transitions with the same key
/// write the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConflictKey {
    pub target: NodeId,
    pub property: PropertyKind,
}

/// What a transition does to already-running transitions with the same
/// [`ConflictKey`] when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conflict {
    /// Leave them running; the later write in a tick wins.
    #[default]
    Ignore,
    /// Drop them where they are.
    Stop,
    /// Snap them to their end value, then drop them.
    Complete,
}

/// A single animatable transition, type-erased at the scheduler boundary.
///
/// The scheduler calls `begin` once, on the first tick the transition is
/// processed, then `update` every tick with progress in [0, 1]. When the
/// transition finishes or is dropped the scheduler hands it back to its
/// pool through `despawn`.
pub trait TransitionState: 'static {
    /// The node this transition writes to, if any.
    fn target(&self) -> Option<NodeId>;

    /// Whether the transition's target still exists.
    /// Targetless transitions (delays) are always alive.
    fn is_alive(&self, scene: &Scene) -> bool {
        self.target().map_or(true, |id| scene.contains(id))
    }

    /// Key used for conflict resolution. `None` never conflicts.
    fn conflict_key(&self) -> Option<ConflictKey> {
        None
    }

    /// True if the target is alive and its current value differs from the goal.
    fn can_apply(&self, scene: &Scene) -> bool;

    /// Copy the target's current value into the goal.
    fn capture_current_as_goal(&mut self, scene: &Scene);

    /// Snapshot the target's current value as the interpolation start.
    fn begin(&mut self, scene: &Scene);

    /// Write the interpolated value for `progress` to the target.
    fn update(&mut self, scene: &mut Scene, progress: f32);

    /// Hand the state back to its kind's pool.
    fn despawn(self: Box<Self>, pools: &mut StatePools);
}

/// A transition that only occupies time: holds its group open for its
/// duration without touching the scene.
#[derive(Debug, Clone, Default)]
pub struct DelayState;

impl Poolable for DelayState {
    fn reset(&mut self, _target: Option<NodeId>) {}
}

impl TransitionState for DelayState {
    fn target(&self) -> Option<NodeId> {
        None
    }

    fn can_apply(&self, _scene: &Scene) -> bool {
        true
    }

    fn capture_current_as_goal(&mut self, _scene: &Scene) {}

    fn begin(&mut self, _scene: &Scene) {}

    fn update(&mut self, _scene: &mut Scene, _progress: f32) {}

    fn despawn(self: Box<Self>, pools: &mut StatePools) {
        pools.release(self);
    }
}
