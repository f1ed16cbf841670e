// transition/scheduler.rs
//
// Transition scheduler: owns active transitions, their groups, and the
// state pools. Advanced once per frame by the host.
//
// Usage:
//   let mut transitions = TransitionScheduler::new();
//   let state = transitions.acquire::<ValueState<LocalScale>>(Some(id));
//   transitions.register(state, 0.5);
//   transitions.join();  // later registrations wait for the batch above
//   transitions.tick(dt, &mut scene);

use std::collections::HashMap;

use crate::api::config::SchedulerConfig;
use crate::api::types::{GroupId, NodeId, TransitionHandle};
use crate::core::scene::Scene;
use super::group::{Entry, Group, GroupPhase, Timing, TransitionSettings, TransitionStatus};
use super::pool::{PoolStats, Poolable, StatePools};
use super::state::{Conflict, ConflictKey, TransitionState};

/// Identifies one sequence of groups.
///
/// The scheduler tracks each chain's tail, so a copy of a `Chain` never goes
/// stale: registrations always land in the chain's current open group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chain {
    id: u32,
}

/// Registry and driver of all active transitions.
pub struct TransitionScheduler {
    config: SchedulerConfig,
    /// In creation order, which is also tick order. A group's `after`
    /// always names an earlier group.
    groups: Vec<Group>,
    pools: StatePools,
    /// Chain used by `register`, `register_with` and `join`.
    chain: Chain,
    next_chain: u32,
    next_group: u32,
    next_handle: u32,
    /// Completion event ids to be polled.
    completed_events: Vec<u32>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        let mut scheduler = Self {
            pools: StatePools::new(config.max_idle_per_pool),
            config,
            groups: Vec::new(),
            chain: Chain { id: 0 },
            next_chain: 0,
            next_group: 0,
            next_handle: 0,
            completed_events: Vec::new(),
        };
        scheduler.chain = scheduler.new_chain();
        scheduler
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn time_scale(&self) -> f32 {
        self.config.time_scale
    }

    /// Scale applied to `Timing::Scaled` transitions. 0 pauses them.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.config.time_scale = time_scale;
    }

    // -- Pools --

    /// Take a state of kind `S` from its pool, reset to `target`.
    pub fn acquire<S: Poolable>(&mut self, target: Option<NodeId>) -> Box<S> {
        self.pools.acquire(target)
    }

    pub fn pool_stats<S: Poolable>(&self) -> PoolStats {
        self.pools.stats::<S>()
    }

    // -- Chains and registration --

    /// The default chain.
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Replace the default chain, e.g. with one returned by `new_chain`.
    pub fn set_chain(&mut self, chain: Chain) {
        self.chain = chain;
    }

    /// Start an independent sequence. Its first group is ungated.
    pub fn new_chain(&mut self) -> Chain {
        let chain = Chain { id: self.next_chain };
        self.next_chain = self.next_chain.wrapping_add(1);
        self.push_group(chain, None);
        chain
    }

    /// Close a chain's open group so it can be discarded once it finishes.
    /// Registering into the chain afterwards opens a group gated on it.
    pub fn close_chain(&mut self, chain: Chain) {
        if let Some(index) = self.last_group_of(chain) {
            self.groups[index].open = false;
        }
    }

    /// The group registrations into `chain` currently land in.
    pub fn open_group(&mut self, chain: Chain) -> GroupId {
        let index = self.open_tail(chain);
        self.groups[index].id
    }

    /// Register into the default chain with default settings.
    pub fn register(&mut self, state: Box<dyn TransitionState>, duration: f32) -> TransitionHandle {
        self.register_with(state, TransitionSettings::new(duration))
    }

    /// Register into the default chain.
    pub fn register_with(&mut self, state: Box<dyn TransitionState>, settings: TransitionSettings) -> TransitionHandle {
        self.register_in(self.chain, state, settings)
    }

    /// Register into `chain`'s open group.
    pub fn register_in(
        &mut self,
        chain: Chain,
        state: Box<dyn TransitionState>,
        settings: TransitionSettings,
    ) -> TransitionHandle {
        let handle = TransitionHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);

        let index = self.open_tail(chain);
        self.groups[index].entries.push(Entry::new(handle, state, settings));
        handle
    }

    /// Close the default chain's open group; later registrations wait for it.
    pub fn join(&mut self) -> GroupId {
        self.join_in(self.chain)
    }

    /// Close `chain`'s open group and open a new one gated on it.
    pub fn join_in(&mut self, chain: Chain) -> GroupId {
        let index = self.open_tail(chain);
        let closed = &mut self.groups[index];
        closed.open = false;
        let after = closed.id;
        self.push_group(chain, Some(after))
    }

    // -- Ticking --

    /// Advance runnable groups by `dt` seconds and apply their transitions.
    /// Returns the number of transitions that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let unscaled = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let scale = self.config.time_scale;
        let scaled = if scale.is_finite() && scale > 0.0 { unscaled * scale } else { 0.0 };

        self.discard_finished_groups();

        // Fixed up front: a group emptied during this tick releases its
        // successor on the next one.
        let runnable: Vec<usize> = self
            .resolve_gates()
            .into_iter()
            .enumerate()
            .filter(|&(_, (satisfied, _))| satisfied)
            .map(|(index, _)| index)
            .collect();

        let mut completed = 0;
        for index in runnable {
            let group = &mut self.groups[index];
            if !group.started && !group.entries.is_empty() {
                group.started = true;
                log::trace!("group {:?} started with {} transition(s)", group.id, group.entries.len());
            }
            let mut slot = 0;
            while slot < self.groups[index].entries.len() {
                completed += self.advance(index, slot, scaled, unscaled, scene);
                slot += 1;
            }
        }

        self.release_finished();
        completed
    }

    fn advance(&mut self, index: usize, slot: usize, scaled: f32, unscaled: f32, scene: &mut Scene) -> usize {
        let entry = &mut self.groups[index].entries[slot];
        if entry.status == TransitionStatus::Finished {
            return 0;
        }
        if !entry.state.is_alive(scene) {
            log::debug!("transition {:?}: target gone, dropping", entry.handle);
            entry.status = TransitionStatus::Finished;
            return 0;
        }

        let mut completed = 0;
        if entry.status == TransitionStatus::Pending {
            let handle = entry.handle;
            let conflict = entry.settings.conflict;
            if let Some(key) = entry.state.conflict_key().filter(|_| conflict != Conflict::Ignore) {
                completed += self.resolve_conflicts(handle, key, conflict, scene);
            }
            let entry = &mut self.groups[index].entries[slot];
            entry.state.begin(scene);
            entry.status = TransitionStatus::Running;
        }

        let entry = &mut self.groups[index].entries[slot];
        entry.elapsed += match entry.settings.timing {
            Timing::Scaled => scaled,
            Timing::Unscaled => unscaled,
        };
        let progress = entry.progress();
        entry.state.update(scene, progress);

        if progress >= 1.0 {
            entry.status = TransitionStatus::Finished;
            if let Some(event_id) = entry.settings.on_complete {
                self.completed_events.push(event_id);
            }
            completed += 1;
        }
        completed
    }

    /// Stop or complete running transitions sharing `key` with the one
    /// about to begin. Returns how many were completed.
    fn resolve_conflicts(
        &mut self,
        beginning: TransitionHandle,
        key: ConflictKey,
        conflict: Conflict,
        scene: &mut Scene,
    ) -> usize {
        let mut completed = 0;
        for group in &mut self.groups {
            for entry in &mut group.entries {
                if entry.handle == beginning
                    || entry.status != TransitionStatus::Running
                    || entry.state.conflict_key() != Some(key)
                {
                    continue;
                }
                match conflict {
                    Conflict::Ignore => {}
                    Conflict::Stop => {
                        log::debug!("transition {:?} stopped by {:?}", entry.handle, beginning);
                        entry.status = TransitionStatus::Finished;
                    }
                    Conflict::Complete => {
                        log::debug!("transition {:?} completed by {:?}", entry.handle, beginning);
                        entry.state.update(scene, 1.0);
                        entry.status = TransitionStatus::Finished;
                        if let Some(event_id) = entry.settings.on_complete {
                            self.completed_events.push(event_id);
                        }
                        completed += 1;
                    }
                }
            }
        }
        completed
    }

    fn release_finished(&mut self) {
        let pools = &mut self.pools;
        for group in &mut self.groups {
            if group.entries.iter().all(|e| e.status != TransitionStatus::Finished) {
                continue;
            }
            for entry in std::mem::take(&mut group.entries) {
                if entry.status == TransitionStatus::Finished {
                    entry.state.despawn(pools);
                } else {
                    group.entries.push(entry);
                }
            }
        }
    }

    // -- Groups --

    fn push_group(&mut self, chain: Chain, after: Option<GroupId>) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group = self.next_group.wrapping_add(1);
        self.groups.push(Group::new(id, chain.id, after));
        id
    }

    fn group_index(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    fn last_group_of(&self, chain: Chain) -> Option<usize> {
        self.groups.iter().rposition(|g| g.chain == chain.id)
    }

    /// Index of `chain`'s open group. A chain whose tail was closed or
    /// discarded gets a fresh group, gated on the closed tail if it remains.
    fn open_tail(&mut self, chain: Chain) -> usize {
        match self.last_group_of(chain) {
            Some(index) if self.groups[index].open => index,
            last => {
                let after = last.map(|index| self.groups[index].id);
                if after.is_none() {
                    log::debug!("chain {:?} has no groups left, opening a fresh one", chain);
                }
                self.push_group(chain, after);
                self.groups.len() - 1
            }
        }
    }

    /// Resolve every gate in one forward pass. Returns, per group,
    /// `(gate satisfied, finished)`.
    ///
    /// A group is finished once closed, empty and ungated. Discarded groups
    /// count as finished, so an empty joined group never delays its successor.
    fn resolve_gates(&self) -> Vec<(bool, bool)> {
        let mut finished: HashMap<GroupId, bool> = HashMap::with_capacity(self.groups.len());
        self.groups
            .iter()
            .map(|group| {
                let satisfied = group
                    .after
                    .map_or(true, |after| finished.get(&after).copied().unwrap_or(true));
                let done = satisfied && !group.open && group.entries.is_empty();
                finished.insert(group.id, done);
                (satisfied, done)
            })
            .collect()
    }

    fn discard_finished_groups(&mut self) {
        let gates = self.resolve_gates();
        if !gates.iter().any(|&(_, done)| done) {
            return;
        }
        for (group, _) in self.groups.iter().zip(&gates).filter(|(_, gate)| gate.1) {
            log::trace!("group {:?} done", group.id);
        }
        let mut gates = gates.into_iter();
        self.groups
            .retain(|_| !gates.next().map_or(false, |(_, done)| done));
    }

    /// Phase of a group. An open group reports `Open` even while its
    /// predecessor is unfinished; it still accepts registrations, but its
    /// members do not tick until the predecessor finishes.
    pub fn group_phase(&self, id: GroupId) -> GroupPhase {
        let Some(index) = self.group_index(id) else {
            return GroupPhase::Done;
        };
        let group = &self.groups[index];
        let (satisfied, _) = self.resolve_gates()[index];
        if group.open {
            GroupPhase::Open
        } else if !satisfied {
            GroupPhase::Gated
        } else if group.entries.is_empty() {
            GroupPhase::Done
        } else {
            GroupPhase::Running
        }
    }

    /// Number of groups held, including open and finished-but-not-yet-discarded ones.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    // -- Control --

    /// Remove a transition immediately, without a final update.
    pub fn cancel(&mut self, handle: TransitionHandle) -> bool {
        for group in &mut self.groups {
            if let Some(pos) = group.entries.iter().position(|e| e.handle == handle) {
                let entry = group.entries.remove(pos);
                entry.state.despawn(&mut self.pools);
                return true;
            }
        }
        false
    }

    /// Remove every transition writing to `target`. Returns how many were removed.
    pub fn cancel_target(&mut self, target: NodeId) -> usize {
        let pools = &mut self.pools;
        let mut removed = 0;
        for group in &mut self.groups {
            for entry in std::mem::take(&mut group.entries) {
                if entry.state.target() == Some(target) {
                    entry.state.despawn(pools);
                    removed += 1;
                } else {
                    group.entries.push(entry);
                }
            }
        }
        removed
    }

    /// Drop every transition and group. The default chain restarts with a
    /// fresh ungated group.
    /// States go back to their pools.
    pub fn clear(&mut self) {
        let pools = &mut self.pools;
        for group in self.groups.drain(..) {
            for entry in group.entries {
                entry.state.despawn(pools);
            }
        }
        self.completed_events.clear();
        self.push_group(self.chain, None);
    }

    // -- Queries --

    fn find(&self, handle: TransitionHandle) -> Option<&Entry> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.handle == handle)
    }

    /// Status of a transition; `None` once it has been released.
    pub fn status(&self, handle: TransitionHandle) -> Option<TransitionStatus> {
        self.find(handle).map(|e| e.status)
    }

    /// Progress of a transition in [0, 1]; `None` once it has been released.
    pub fn progress(&self, handle: TransitionHandle) -> Option<f32> {
        self.find(handle).map(Entry::progress)
    }

    /// Drain completion event ids collected since the last drain.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of registered transitions across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.entries.is_empty())
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::components::node::Node;
    use crate::transition::property::{LocalScale, LocalScaleX, ValueState};
    use crate::transition::state::DelayState;

    fn scene_with(ids: &[u32]) -> Scene {
        let mut scene = Scene::new();
        for &id in ids {
            scene.spawn(Node::new(NodeId(id)));
        }
        scene
    }

    fn scale_to(s: &mut TransitionScheduler, id: u32, goal: f32) -> Box<ValueState<LocalScale>> {
        let mut state = s.acquire::<ValueState<LocalScale>>(Some(NodeId(id)));
        state.goal = Vec3::splat(goal);
        state
    }

    fn scale_of(scene: &Scene, id: u32) -> Vec3 {
        scene.get(NodeId(id)).unwrap().scale
    }

    #[test]
    fn scale_halfway() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        let state = scale_to(&mut s, 1, 2.0);
        let handle = s.register(state, 2.0);

        s.tick(0.5, &mut scene);
        s.tick(0.5, &mut scene);
        assert!((scale_of(&scene, 1) - Vec3::splat(1.5)).length() < 1e-5);
        assert_eq!(s.status(handle), Some(TransitionStatus::Running));

        assert_eq!(s.tick(1.0, &mut scene), 1);
        assert!((scale_of(&scene, 1) - Vec3::splat(2.0)).length() < 1e-5);
        assert!(s.is_empty());
        assert_eq!(s.status(handle), None);
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        let state = scale_to(&mut s, 1, 4.0);
        s.register(state, 0.0);

        assert_eq!(s.tick(0.0, &mut scene), 1);
        assert_eq!(scale_of(&scene, 1), Vec3::splat(4.0));
        assert!(s.is_empty());
        assert_eq!(s.pool_stats::<ValueState<LocalScale>>().idle, 1);
    }

    #[test]
    fn join_gates_the_next_group() {
        let mut scene = scene_with(&[1, 2, 3]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 2.0);
        let b = scale_to(&mut s, 2, 2.0);
        s.register(a, 1.0);
        s.register(b, 1.0);
        let first = s.open_group(s.chain());
        let second = s.join();
        let c = scale_to(&mut s, 3, 2.0);
        let late = s.register(c, 1.0);

        assert_eq!(s.group_phase(second), GroupPhase::Open);
        assert_eq!(s.tick(0.6, &mut scene), 0);
        assert_eq!(s.tick(0.6, &mut scene), 2);
        assert_eq!(scale_of(&scene, 1), Vec3::splat(2.0));
        assert_eq!(scale_of(&scene, 3), Vec3::ONE);
        assert_eq!(s.status(late), Some(TransitionStatus::Pending));
        assert_eq!(s.group_phase(first), GroupPhase::Done);

        s.tick(0.5, &mut scene);
        assert_eq!(s.status(late), Some(TransitionStatus::Running));
        assert!((scale_of(&scene, 3) - Vec3::splat(1.5)).length() < 1e-5);
    }

    #[test]
    fn closed_group_waits_on_its_predecessor() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 2.0);
        s.register(a, 1.0);
        s.join();
        let b = scale_to(&mut s, 2, 2.0);
        s.register(b, 1.0);
        let middle = s.open_group(s.chain());
        s.join();

        assert_eq!(s.group_phase(middle), GroupPhase::Gated);
        s.tick(1.0, &mut scene);
        s.tick(0.1, &mut scene);
        assert_eq!(s.group_phase(middle), GroupPhase::Running);
    }

    #[test]
    fn empty_join_does_not_delay() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        s.join();
        s.join();
        let state = scale_to(&mut s, 1, 3.0);
        s.register(state, 1.0);

        s.tick(0.5, &mut scene);
        assert_eq!(scale_of(&scene, 1), Vec3::splat(2.0));
        assert_eq!(s.group_count(), 1);
    }

    #[test]
    fn dead_target_is_dropped_without_touching_siblings() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 3.0);
        let b = scale_to(&mut s, 2, 3.0);
        let doomed = s.register(a, 1.0);
        s.register(b, 1.0);

        s.tick(0.5, &mut scene);
        scene.despawn(NodeId(1));
        assert_eq!(s.tick(0.25, &mut scene), 0);

        assert_eq!(s.status(doomed), None);
        assert_eq!(s.len(), 1);
        assert!((scale_of(&scene, 2) - Vec3::splat(2.5)).length() < 1e-5);
    }

    #[test]
    fn completed_state_is_reused() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let state = scale_to(&mut s, 1, 2.0);
        let addr = &*state as *const ValueState<LocalScale>;
        s.register(state, 0.1);
        s.tick(0.1, &mut scene);

        let again = scale_to(&mut s, 2, 2.0);
        assert_eq!(&*again as *const ValueState<LocalScale>, addr);
        assert_eq!(again.target, Some(NodeId(2)));
        let stats = s.pool_stats::<ValueState<LocalScale>>();
        assert_eq!((stats.created, stats.reused), (1, 1));
    }

    #[test]
    fn conflict_stop_and_complete() {
        for (conflict, expected) in [(Conflict::Stop, 1.5), (Conflict::Complete, 3.0)] {
            let mut scene = scene_with(&[1]);
            let mut s = TransitionScheduler::new();
            let chain = s.new_chain();
            let old = scale_to(&mut s, 1, 3.0);
            let old = s.register_in(chain, old, TransitionSettings::new(1.0).with_on_complete(7));
            s.tick(0.25, &mut scene);

            let other = s.new_chain();
            let mut newer = s.acquire::<ValueState<LocalScale>>(Some(NodeId(1)));
            newer.goal = Vec3::splat(10.0);
            let settings = TransitionSettings::new(f32::INFINITY).with_conflict(conflict);
            s.register_in(other, newer, settings);
            s.tick(0.0, &mut scene);

            assert_eq!(s.status(old), None);
            assert_eq!(scale_of(&scene, 1), Vec3::splat(expected));
            let events: Vec<u32> = s.drain_completed().collect();
            assert_eq!(events.is_empty(), conflict == Conflict::Stop);
        }
    }

    #[test]
    fn ignore_lets_both_run() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 3.0);
        s.register(a, 1.0);
        s.tick(0.5, &mut scene);
        let b = scale_to(&mut s, 1, 3.0);
        s.register(b, 1.0);
        s.tick(0.1, &mut scene);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn unscaled_timing_ignores_time_scale() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::with_config(SchedulerConfig::default().with_time_scale(0.5));
        let scaled = scale_to(&mut s, 1, 2.0);
        s.register(scaled, 1.0);
        let mut unscaled = s.acquire::<ValueState<LocalScaleX>>(Some(NodeId(2)));
        unscaled.goal = 2.0;
        s.register_with(unscaled, TransitionSettings::new(1.0).with_timing(Timing::Unscaled));

        s.tick(0.5, &mut scene);
        assert!((scale_of(&scene, 1).x - 1.25).abs() < 1e-5);
        assert!((scale_of(&scene, 2).x - 1.5).abs() < 1e-5);

        s.set_time_scale(0.0);
        s.tick(0.5, &mut scene);
        assert!((scale_of(&scene, 1).x - 1.25).abs() < 1e-5);
    }

    #[test]
    fn chains_run_independently() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let blocker = s.acquire::<DelayState>(None);
        s.register(blocker, 10.0);
        s.join();

        let chain = s.new_chain();
        let state = scale_to(&mut s, 2, 2.0);
        s.register_in(chain, state, TransitionSettings::new(1.0));
        s.tick(1.0, &mut scene);
        assert_eq!(scale_of(&scene, 2), Vec3::splat(2.0));
    }

    #[test]
    fn bad_dt_does_not_advance() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        let state = scale_to(&mut s, 1, 2.0);
        let handle = s.register(state, 1.0);
        s.tick(f32::NAN, &mut scene);
        s.tick(-1.0, &mut scene);
        assert_eq!(s.progress(handle), Some(0.0));
        assert_eq!(scale_of(&scene, 1), Vec3::ONE);
    }

    #[test]
    fn cancel_and_clear_return_states() {
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 2.0);
        let b = scale_to(&mut s, 1, 2.0);
        let c = scale_to(&mut s, 2, 2.0);
        let a = s.register(a, 1.0);
        s.register(b, 1.0);
        s.register(c, 1.0);

        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.cancel_target(NodeId(1)), 1);
        assert_eq!(s.len(), 1);

        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.group_count(), 1);
        let stats = s.pool_stats::<ValueState<LocalScale>>();
        assert_eq!((stats.idle, stats.outstanding), (3, 0));
    }

    #[test]
    fn copied_chain_registers_into_the_current_tail() {
        let mut scene = scene_with(&[1, 2, 3]);
        let mut s = TransitionScheduler::new();
        let chain = s.chain();
        let first = s.open_group(chain);
        let a = scale_to(&mut s, 1, 2.0);
        s.register_in(chain, a, TransitionSettings::new(1.0));
        s.join_in(chain);
        let b = scale_to(&mut s, 2, 2.0);
        s.register_in(chain, b, TransitionSettings::new(1.0));

        // Same chain, reached through the scheduler's own copy.
        let c = scale_to(&mut s, 3, 2.0);
        s.register(c, 5.0);
        assert_eq!(s.group_phase(first), GroupPhase::Running);

        s.tick(1.0, &mut scene);
        assert_eq!(s.group_phase(first), GroupPhase::Done);
        s.tick(1.0, &mut scene);
        assert_eq!(scale_of(&scene, 2), Vec3::splat(2.0));
        assert!((scale_of(&scene, 3) - Vec3::splat(1.2)).length() < 1e-5);
    }

    #[test]
    fn closed_chain_reopens_behind_its_tail() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let chain = s.new_chain();
        let a = scale_to(&mut s, 1, 2.0);
        s.register_in(chain, a, TransitionSettings::new(1.0));
        s.close_chain(chain);
        let b = scale_to(&mut s, 2, 2.0);
        s.register_in(chain, b, TransitionSettings::new(1.0));

        s.tick(1.0, &mut scene);
        assert_eq!(scale_of(&scene, 1), Vec3::splat(2.0));
        assert_eq!(scale_of(&scene, 2), Vec3::ONE);
        s.tick(0.5, &mut scene);
        assert!((scale_of(&scene, 2) - Vec3::splat(1.5)).length() < 1e-5);
    }

    #[test]
    fn many_empty_joins_collapse_in_one_tick() {
        let mut scene = scene_with(&[1]);
        let mut s = TransitionScheduler::new();
        for _ in 0..5000 {
            s.join();
        }
        let state = scale_to(&mut s, 1, 3.0);
        s.register(state, 1.0);

        s.tick(0.5, &mut scene);
        assert_eq!(scale_of(&scene, 1), Vec3::splat(2.0));
        assert_eq!(s.group_count(), 1);
    }

    #[test]
    fn empty_group_still_waits_on_its_predecessor() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 2.0);
        s.register(a, 1.0);
        s.join();
        s.join();
        let b = scale_to(&mut s, 2, 2.0);
        let late = s.register(b, 1.0);

        s.tick(0.5, &mut scene);
        s.tick(0.5, &mut scene);
        assert_eq!(s.status(late), Some(TransitionStatus::Pending));
        assert_eq!(scale_of(&scene, 2), Vec3::ONE);

        s.tick(0.5, &mut scene);
        assert!((scale_of(&scene, 2) - Vec3::splat(1.5)).length() < 1e-5);
    }

    #[test]
    fn open_tail_reports_open_while_waiting() {
        let mut scene = scene_with(&[1, 2]);
        let mut s = TransitionScheduler::new();
        let a = scale_to(&mut s, 1, 2.0);
        s.register(a, 1.0);
        let tail = s.join();
        let b = scale_to(&mut s, 2, 2.0);
        let late = s.register(b, 1.0);

        s.tick(0.5, &mut scene);
        assert_eq!(s.group_phase(tail), GroupPhase::Open);
        assert_eq!(s.status(late), Some(TransitionStatus::Pending));
    }
}
