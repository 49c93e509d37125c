//! Switch-latest task tracking
//!
//! At most one task runs per key. Spawning a new task for a key cancels the
//! previous one before it can deliver anything.

use std::{collections::HashMap, future::Future, hash::Hash};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct Slot {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Latest-wins task set keyed by `K`
#[derive(Debug)]
pub struct LatestTasks<K> {
    root: CancellationToken,
    slots: HashMap<K, Slot>,
}

impl<K: Eq + Hash + Copy> LatestTasks<K> {
    pub fn new(root: CancellationToken) -> Self {
        Self {
            root,
            slots: HashMap::new(),
        }
    }

    /// Runs `make(token)` for `key`, cancelling whatever ran there before.
    ///
    /// The future is raced against its token, so a superseded task is dropped
    /// at its next await point. Tasks should still check the token before
    /// delivering results.
    pub fn spawn_latest<F, Fut>(&mut self, key: K, make: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel(key);
        let token = self.root.child_token();
        let fut = make(token.clone());
        let guard = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {}
                _ = fut => {}
            }
        });
        self.slots.insert(key, Slot { token, handle });
    }

    /// Cancels the task of `key`. Returns whether one was still running.
    pub fn cancel(&mut self, key: K) -> bool {
        match self.slots.remove(&key) {
            Some(slot) => {
                let running = !slot.handle.is_finished();
                slot.token.cancel();
                running
            }
            None => false,
        }
    }

    pub fn is_running(&self, key: K) -> bool {
        self.slots
            .get(&key)
            .is_some_and(|slot| !slot.handle.is_finished())
    }

    /// Number of tasks that have not finished yet
    pub fn running(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| !slot.handle.is_finished())
            .count()
    }

    /// Cancels every task, including ones spawned from clones of the root token.
    pub fn shutdown(&mut self) {
        self.root.cancel();
        self.slots.clear();
    }
}

impl<K> Drop for LatestTasks<K> {
    fn drop(&mut self) {
        for slot in self.slots.values() {
            slot.token.cancel();
        }
    }
}
