// transition/group.rs
//
// Entries and the groups (batches) they are registered into.

use serde::{Deserialize, Serialize};
use crate::api::types::{GroupId, TransitionHandle};
use super::state::{Conflict, TransitionState};

/// Which clock a transition follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    /// `dt` multiplied by the scheduler's time scale.
    #[default]
    Scaled,
    /// Raw `dt`, ignoring the time scale.
    Unscaled,
}

/// Per-registration parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSettings {
    /// Seconds from begin to end. Zero, negative and NaN complete on the first tick.
    pub duration: f32,
    pub timing: Timing,
    pub conflict: Conflict,
    /// Event id emitted when the transition completes.
    pub on_complete: Option<u32>,
}

impl TransitionSettings {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            timing: Timing::Scaled,
            conflict: Conflict::Ignore,
            on_complete: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_conflict(mut self, conflict: Conflict) -> Self {
        self.conflict = conflict;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Clamp durations that would otherwise stall or poison progress.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.duration.is_nan() {
            log::warn!("transition duration is NaN, completing immediately");
            self.duration = 0.0;
        } else if self.duration < 0.0 {
            log::debug!("negative transition duration {}, completing immediately", self.duration);
            self.duration = 0.0;
        }
        self
    }
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Lifecycle of one registered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Registered; `begin` not called yet.
    Pending,
    /// Begun and updating every tick.
    Running,
    /// Completed or dropped; released at the end of the tick.
    Finished,
}

/// Lifecycle of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPhase {
    /// The tail of a chain, still accepting registrations. Reported even
    /// while the predecessor is unfinished; members tick only once it is.
    Open,
    /// Closed by a join and waiting on its predecessor.
    Gated,
    /// Closed, predecessor finished, members still ticking.
    Running,
    /// Every member finished; the group is (or is about to be) discarded.
    Done,
}

pub(crate) struct Entry {
    pub handle: TransitionHandle,
    pub state: Box<dyn TransitionState>,
    pub settings: TransitionSettings,
    pub elapsed: f32,
    pub status: TransitionStatus,
}

impl Entry {
    pub fn new(handle: TransitionHandle, state: Box<dyn TransitionState>, settings: TransitionSettings) -> Self {
        Self {
            handle,
            state,
            settings: settings.sanitized(),
            elapsed: 0.0,
            status: TransitionStatus::Pending,
        }
    }

    /// Normalized progress. Exactly 1.0 once `elapsed` reaches the duration.
    pub fn progress(&self) -> f32 {
        let duration = self.settings.duration;
        if duration <= 0.0 || self.elapsed >= duration {
            1.0
        } else {
            self.elapsed / duration
        }
    }
}

pub(crate) struct Group {
    pub id: GroupId,
    /// Id of the chain this group belongs to.
    pub chain: u32,
    /// Group that must finish before this one runs.
    pub after: Option<GroupId>,
    /// Still the tail of its chain.
    pub open: bool,
    /// Set the first tick the group is allowed to run.
    pub started: bool,
    pub entries: Vec<Entry>,
}

impl Group {
    pub fn new(id: GroupId, chain: u32, after: Option<GroupId>) -> Self {
        Self {
            id,
            chain,
            after,
            open: true,
            started: false,
            entries: Vec::new(),
        }
    }
}
