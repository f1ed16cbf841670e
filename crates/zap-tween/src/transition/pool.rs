// transition/pool.rs
//
// Per-kind reuse of transition states. Each concrete state type gets its
// own free list, keyed by TypeId and owned by the scheduler.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use crate::api::types::NodeId;

/// A state type that can live in a [`Pool`].
pub trait Poolable: Default + 'static {
    /// Prepare the instance for a new owner. Called on acquire (with the new
    /// target) and on release (with `None`).
    fn reset(&mut self, target: Option<NodeId>);
}

/// Counters describing one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Instances currently waiting for reuse.
    pub idle: usize,
    /// Instances allocated because the free list was empty.
    pub created: usize,
    /// Acquisitions served from the free list.
    pub reused: usize,
    /// Instances handed out and not yet released.
    pub outstanding: usize,
}

/// Free list for one state type.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Vec<Box<T>>,
    max_idle: usize,
    stats: PoolStats,
}

impl<T: Poolable> Pool<T> {
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Vec::new(),
            max_idle,
            stats: PoolStats::default(),
        }
    }

    /// Pop the most recently released instance, or allocate a new one.
    pub fn acquire(&mut self, target: Option<NodeId>) -> Box<T> {
        let mut state = match self.idle.pop() {
            Some(state) => {
                self.stats.reused += 1;
                state
            }
            None => {
                self.stats.created += 1;
                Box::default()
            }
        };
        state.reset(target);
        self.stats.outstanding += 1;
        state
    }

    /// Return an instance for reuse. Instances beyond `max_idle` are dropped.
    ///
    /// Releasing an instance this pool never handed out trips a debug
    /// assertion; release builds log it and keep the instance.
    pub fn release(&mut self, mut state: Box<T>) {
        debug_assert!(
            self.stats.outstanding > 0,
            "pool<{}>: released a state it never handed out",
            std::any::type_name::<T>()
        );
        if self.stats.outstanding == 0 {
            log::warn!(
                "pool<{}>: released a state it never handed out",
                std::any::type_name::<T>()
            );
        } else {
            self.stats.outstanding -= 1;
        }
        if self.idle.len() < self.max_idle {
            state.reset(None);
            self.idle.push(state);
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle.len(),
            ..self.stats
        }
    }
}

/// One [`Pool`] per concrete state type.
pub struct StatePools {
    pools: HashMap<TypeId, Box<dyn Any>>,
    max_idle: usize,
}

impl StatePools {
    pub fn new(max_idle: usize) -> Self {
        Self {
            pools: HashMap::new(),
            max_idle,
        }
    }

    fn pool_mut<T: Poolable>(&mut self) -> Option<&mut Pool<T>> {
        let max_idle = self.max_idle;
        self.pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Pool::<T>::new(max_idle)))
            .downcast_mut::<Pool<T>>()
    }

    pub fn acquire<T: Poolable>(&mut self, target: Option<NodeId>) -> Box<T> {
        match self.pool_mut::<T>() {
            Some(pool) => pool.acquire(target),
            None => {
                let mut state = Box::<T>::default();
                state.reset(target);
                state
            }
        }
    }

    pub fn release<T: Poolable>(&mut self, state: Box<T>) {
        if let Some(pool) = self.pool_mut::<T>() {
            pool.release(state);
        }
    }

    /// Stats for the pool of `T`. All zero if `T` was never pooled.
    pub fn stats<T: Poolable>(&self) -> PoolStats {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_ref::<Pool<T>>())
            .map(Pool::stats)
            .unwrap_or_default()
    }
}

impl Default for StatePools {
    fn default() -> Self {
        Self::new(64)
    }
}
