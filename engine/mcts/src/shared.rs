//! Thread-safe searcher for running rollouts from several threads.
//!
//! A single mutex guards the whole searcher, so each rollout runs as one
//! critical section: selection, expansion and backpropagation of one worker
//! never interleave with another's, and a node is expanded at most once.
//! Rollouts are serialized; the wrapper provides shared access from many
//! threads, not parallel speed-up.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use engine_core::Node;
use tracing::debug;

use crate::search::{Mcts, SearchError};
use crate::tree::SearchTree;

/// Cloneable handle to a searcher shared between threads.
#[derive(Debug)]
pub struct SharedMcts<N: Node> {
    inner: Arc<Mutex<Mcts<N>>>,
}

impl<N: Node> Clone for SharedMcts<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Node + Send> SharedMcts<N> {
    /// Share an existing searcher.
    pub fn new(search: Mcts<N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(search)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Mcts<N>>, SearchError> {
        self.inner.lock().map_err(|_| SearchError::Poisoned)
    }

    /// One rollout from `node`, holding the lock for its whole duration.
    pub fn do_rollout(&self, node: &N) -> Result<(), SearchError> {
        self.lock()?.do_rollout(node)
    }

    /// Best successor of `node`, see [`Mcts::choose`].
    pub fn choose(&self, node: &N) -> Result<N, SearchError> {
        self.lock()?.choose(node)
    }

    /// Run a closure against the current tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&SearchTree<N>) -> R) -> Result<R, SearchError> {
        let guard = self.lock()?;
        Ok(f(guard.tree()))
    }

    /// Discard every statistic and expansion gathered so far.
    pub fn reset(&self) -> Result<(), SearchError> {
        self.lock()?.reset();
        Ok(())
    }

    /// Split `rollouts` across `workers` scoped threads, then choose a move.
    ///
    /// The first error raised by any worker is returned; the other workers
    /// finish their share first.
    pub fn run_parallel(&self, node: &N, workers: usize, rollouts: u32) -> Result<N, SearchError>
    where
        N: Sync,
    {
        let workers = workers.max(1) as u32;
        let base = rollouts / workers;
        let extra = rollouts % workers;

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let share = base + u32::from(worker < extra);
                    scope.spawn(move || -> Result<(), SearchError> {
                        for _ in 0..share {
                            self.do_rollout(node)?;
                        }
                        debug!(worker, share, "Rollout worker finished");
                        Ok(())
                    })
                })
                .collect();

            let mut first_error = None;
            for handle in handles {
                let outcome = handle.join().unwrap_or(Err(SearchError::Poisoned));
                if let Err(e) = outcome {
                    first_error.get_or_insert(e);
                }
            }
            first_error.map_or(Ok(()), Err)
        })?;

        self.choose(node)
    }
}
