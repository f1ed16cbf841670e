// methods/control.rs
//
// Steps that shape a sequence rather than animate a property.

use crate::api::types::TransitionHandle;
use crate::transition::group::TransitionSettings;
use crate::transition::scheduler::{Chain, TransitionScheduler};
use crate::transition::state::DelayState;
use super::TransitionMethod;

/// Hold the current group open for `duration` seconds.
#[derive(Debug, Clone, Copy)]
pub struct DelayMethod {
    pub settings: TransitionSettings,
}

impl DelayMethod {
    pub fn new(duration: f32) -> Self {
        Self {
            settings: TransitionSettings::new(duration),
        }
    }
}

impl TransitionMethod for DelayMethod {
    fn register_in(&self, scheduler: &mut TransitionScheduler, chain: Chain) -> Option<TransitionHandle> {
        let state = scheduler.acquire::<DelayState>(None);
        Some(scheduler.register_in(chain, state, self.settings))
    }
}

/// Emit `event_id` through `drain_completed` when the current group starts.
#[derive(Debug, Clone, Copy)]
pub struct EventMethod {
    pub event_id: u32,
}

impl EventMethod {
    pub fn new(event_id: u32) -> Self {
        Self { event_id }
    }
}

impl TransitionMethod for EventMethod {
    fn register_in(&self, scheduler: &mut TransitionScheduler, chain: Chain) -> Option<TransitionHandle> {
        DelayMethod {
            settings: TransitionSettings::new(0.0).with_on_complete(self.event_id),
        }
        .register_in(scheduler, chain)
    }
}

/// Close the current group; everything after waits for it to finish.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinMethod;

impl TransitionMethod for JoinMethod {
    fn register_in(&self, scheduler: &mut TransitionScheduler, chain: Chain) -> Option<TransitionHandle> {
        scheduler.join_in(chain);
        None
    }
}
