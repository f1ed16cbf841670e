use crate::api::types::{NodeId, TransitionHandle};
use crate::core::scene::Scene;
use crate::extensions::easing::Easing;
use crate::extensions::value::BlendStyle;
use crate::transition::group::{Timing, TransitionSettings};
use crate::transition::property::{Alpha, LocalPosition, LocalScale, LocalScaleX, NodeProperty, ValueState};
use crate::transition::scheduler::{Chain, TransitionScheduler};
use crate::transition::state::{Conflict, TransitionState};
use super::TransitionMethod;

/// Animate property `P` of a node towards a goal.
#[derive(Debug, Clone)]
pub struct PropertyMethod<P: NodeProperty> {
    /// Copied into a pooled state on registration.
    template: ValueState<P>,
    settings: TransitionSettings,
}

pub type TransformLocalScale = PropertyMethod<LocalScale>;
pub type TransformLocalScaleX = PropertyMethod<LocalScaleX>;
pub type TransformLocalPosition = PropertyMethod<LocalPosition>;
pub type NodeAlpha = PropertyMethod<Alpha>;

impl<P: NodeProperty> PropertyMethod<P> {
    pub fn new(target: NodeId, goal: P::Value, duration: f32) -> Self {
        Self {
            template: ValueState::new(target, goal),
            settings: TransitionSettings::new(duration),
        }
    }

    // -- Builder methods --

    pub fn with_ease(mut self, ease: Easing) -> Self {
        self.template.ease = ease;
        self
    }

    pub fn with_style(mut self, style: BlendStyle) -> Self {
        self.template.style = style;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.settings.timing = timing;
        self
    }

    pub fn with_conflict(mut self, conflict: Conflict) -> Self {
        self.settings.conflict = conflict;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.settings.on_complete = Some(event_id);
        self
    }

    /// Use the target's present value as the goal.
    pub fn fill(mut self, scene: &Scene) -> Self {
        self.template.capture_current_as_goal(scene);
        self
    }

    pub fn goal(&self) -> P::Value {
        self.template.goal
    }

    /// True if registering would change nothing: the target is gone or
    /// already holds the goal.
    pub fn is_noop(&self, scene: &Scene) -> bool {
        !self.template.can_apply(scene)
    }

    /// Register into the default chain unless [`is_noop`](Self::is_noop).
    pub fn register_if_changed(&self, scheduler: &mut TransitionScheduler, scene: &Scene) -> Option<TransitionHandle> {
        if self.is_noop(scene) {
            return None;
        }
        self.register(scheduler)
    }
}

impl<P: NodeProperty> TransitionMethod for PropertyMethod<P> {
    fn register_in(&self, scheduler: &mut TransitionScheduler, chain: Chain) -> Option<TransitionHandle> {
        let mut state = scheduler.acquire::<ValueState<P>>(self.template.target);
        (*state).clone_from(&self.template);
        Some(scheduler.register_in(chain, state, self.settings))
    }
}
