//! Transition scripts: a sequence of method steps loaded from JSON and
//! played into a scheduler, with targets resolved by node tag.
//!
//! ```json
//! { "steps": [
//!     { "method": "local_scale", "target": "panel", "goal": [2, 2, 2], "duration": 0.5, "ease": "back_out" },
//!     { "method": "alpha", "target": "panel", "goal": 0.0, "duration": 0.2 },
//!     { "method": "join" },
//!     { "method": "event", "event": 3 }
//! ] }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::error::{Result, TweenError};
use crate::api::types::TransitionHandle;
use crate::core::scene::Scene;
use crate::extensions::easing::Easing;
use crate::extensions::value::BlendStyle;
use crate::methods::{DelayMethod, EventMethod, JoinMethod, PropertyMethod, TransitionMethod};
use crate::transition::group::{Timing, TransitionSettings};
use crate::transition::property::{Alpha, LocalPosition, LocalScale, LocalScaleX, NodeProperty};
use crate::transition::scheduler::{Chain, TransitionScheduler};
use crate::transition::state::Conflict;

/// Which method a step invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    LocalScale,
    LocalScaleX,
    LocalPosition,
    Alpha,
    Delay,
    Event,
    Join,
}

impl MethodKind {
    pub fn name(self) -> &'static str {
        match self {
            MethodKind::LocalScale => "local_scale",
            MethodKind::LocalScaleX => "local_scale_x",
            MethodKind::LocalPosition => "local_position",
            MethodKind::Alpha => "alpha",
            MethodKind::Delay => "delay",
            MethodKind::Event => "event",
            MethodKind::Join => "join",
        }
    }
}

/// A goal as written in JSON: a number or a 3-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalValue {
    Scalar(f32),
    Vector(Vec3),
}

impl GoalValue {
    fn scalar(self) -> Option<f32> {
        match self {
            GoalValue::Scalar(v) => Some(v),
            GoalValue::Vector(_) => None,
        }
    }

    /// Scalars splat to all three axes.
    fn vector(self) -> Option<Vec3> {
        match self {
            GoalValue::Scalar(v) => Some(Vec3::splat(v)),
            GoalValue::Vector(v) => Some(v),
        }
    }
}

/// One step of a script. Fields a method does not use are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    pub method: MethodKind,
    /// Tag of the target node.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub goal: Option<GoalValue>,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub ease: Easing,
    #[serde(default)]
    pub style: BlendStyle,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub conflict: Conflict,
    /// Take the goal from the target's value at play time.
    #[serde(default)]
    pub fill: bool,
    #[serde(default)]
    pub on_complete: Option<u32>,
    /// Event id for `event` steps.
    #[serde(default)]
    pub event: Option<u32>,
}

impl ScriptStep {
    fn settings(&self) -> TransitionSettings {
        TransitionSettings {
            duration: self.duration,
            timing: self.timing,
            conflict: self.conflict,
            on_complete: self.on_complete,
        }
    }

    fn build(&self, step: usize, scene: &Scene) -> Result<Box<dyn TransitionMethod>> {
        match self.method {
            MethodKind::LocalScale => self.property::<LocalScale>(step, scene, GoalValue::vector, "vector"),
            MethodKind::LocalScaleX => self.property::<LocalScaleX>(step, scene, GoalValue::scalar, "number"),
            MethodKind::LocalPosition => self.property::<LocalPosition>(step, scene, GoalValue::vector, "vector"),
            MethodKind::Alpha => self.property::<Alpha>(step, scene, GoalValue::scalar, "number"),
            MethodKind::Delay => Ok(Box::new(DelayMethod {
                settings: self.settings(),
            })),
            MethodKind::Event => {
                let event_id = self.event.ok_or(TweenError::MissingEvent { step })?;
                Ok(Box::new(EventMethod::new(event_id)))
            }
            MethodKind::Join => Ok(Box::new(JoinMethod)),
        }
    }

    fn property<P: NodeProperty>(
        &self,
        step: usize,
        scene: &Scene,
        extract: fn(GoalValue) -> Option<P::Value>,
        expected: &'static str,
    ) -> Result<Box<dyn TransitionMethod>> {
        let method = self.method.name();
        let tag = self
            .target
            .as_deref()
            .ok_or(TweenError::MissingTarget { step, method })?;
        let node = scene
            .find_by_tag(tag)
            .ok_or_else(|| TweenError::UnknownTarget { step, tag: tag.to_string() })?;

        let goal = match self.goal {
            Some(goal) => extract(goal).ok_or(TweenError::GoalMismatch { step, method, expected })?,
            None if self.fill => <P::Value as Default>::default(),
            None => return Err(TweenError::MissingGoal { step, method }),
        };

        let settings = self.settings();
        let mut builder = PropertyMethod::<P>::new(node.id, goal, settings.duration)
            .with_ease(self.ease)
            .with_style(self.style)
            .with_timing(settings.timing)
            .with_conflict(settings.conflict);
        if let Some(event_id) = settings.on_complete {
            builder = builder.with_on_complete(event_id);
        }
        if self.fill {
            builder = builder.fill(scene);
        }
        Ok(Box::new(builder))
    }
}

/// An ordered list of method steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionScript {
    pub steps: Vec<ScriptStep>,
}

impl TransitionScript {
    /// Parse a script from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every step against `scene`, then register them into `chain`
    /// in order. Nothing is registered if any step is invalid.
    pub fn play(
        &self,
        scheduler: &mut TransitionScheduler,
        chain: Chain,
        scene: &Scene,
    ) -> Result<Vec<TransitionHandle>> {
        let methods = self
            .steps
            .iter()
            .enumerate()
            .map(|(step, s)| s.build(step, scene))
            .collect::<Result<Vec<_>>>()?;

        Ok(methods
            .iter()
            .filter_map(|method| method.register_in(scheduler, chain))
            .collect())
    }
}
