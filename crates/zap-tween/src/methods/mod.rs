// methods/mod.rs
//
// Method adapters: thin builders that take a state from its pool, fill it
// in, and register it with a scheduler.
//
// Usage:
//   TransformLocalScale::new(id, Vec3::splat(2.0), 0.5)
//       .with_ease(Easing::BackOut)
//       .register(&mut transitions);
//   JoinMethod.register(&mut transitions);
//   EventMethod::new(DONE).register(&mut transitions);

pub mod control;
pub mod property;

pub use control::{DelayMethod, EventMethod, JoinMethod};
pub use property::{NodeAlpha, PropertyMethod, TransformLocalPosition, TransformLocalScale, TransformLocalScaleX};

use crate::api::types::TransitionHandle;
use crate::transition::scheduler::{Chain, TransitionScheduler};

/// One discrete orchestration step.
pub trait TransitionMethod {
    /// Register into `chain`. Returns `None` for steps that register no
    /// transition (joins).
    fn register_in(&self, scheduler: &mut TransitionScheduler, chain: Chain) -> Option<TransitionHandle>;

    /// Register into the scheduler's default chain.
    fn register(&self, scheduler: &mut TransitionScheduler) -> Option<TransitionHandle> {
        let chain = scheduler.chain();
        self.register_in(scheduler, chain)
    }
}
