// src/crawl/tracker.rs
// =============================================================================
// The completion tracker: a counting join barrier for crawl tasks.
//
// Crawl tasks spawn more crawl tasks, and nobody waits on their JoinHandles,
// so "all tasks are done" has to be counted by hand:
// - `enter()` bumps the pending count and hands back a `TaskGuard`
// - dropping the guard lowers the count again
// - `wait()` returns once the count is back to zero
//
// The ordering rule that makes this correct: a parent calls `enter()` for a
// child synchronously, BEFORE the child is spawned and before the parent's
// own guard can drop. So the count can only reach zero when no task is
// running and none is about to start.
//
// Rust concepts:
// - RAII: the guard's Drop impl runs on every exit path, including panics
// - Atomics: lock-free counter shared between threads
// - tokio::sync::Notify: wakes the waiter without polling
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: AtomicUsize,
    drained: Notify,
}

impl CompletionTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Registers one more unit of work; call this before spawning it
    pub fn enter(self: &Arc<Self>) -> TaskGuard {
        self.pending.fetch_add(1, Ordering::AcqRel);
        TaskGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    // Blocks (asynchronously) until every guard has been dropped
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the count, otherwise a
            // notify_waiters() between the check and the await is lost.
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }

            notified.await;
        }
    }

    fn leave(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.drained.notify_waiters();
        }
    }
}

// Proof that a unit of work is in flight. Drop it when the work is done.
#[derive(Debug)]
pub struct TaskGuard {
    tracker: Arc<CompletionTracker>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.tracker.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_when_nothing_pending() {
        let tracker = CompletionTracker::new();
        tracker.wait().await;
        assert_eq!(tracker.pending(), 0);
    }

    #[tokio::test]
    async fn test_wait_blocks_until_guard_dropped() {
        let tracker = CompletionTracker::new();
        let guard = tracker.enter();
        assert_eq!(tracker.pending(), 1);

        let still_waiting =
            tokio::time::timeout(Duration::from_millis(50), tracker.wait()).await;
        assert!(still_waiting.is_err());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), tracker.wait())
            .await
            .expect("wait should finish once the guard is gone");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_nested_spawns_are_counted() {
        let tracker = CompletionTracker::new();
        let root = tracker.enter();

        let t = Arc::clone(&tracker);
        tokio::spawn(async move {
            let _root = root;
            for _ in 0..10 {
                // Child registered before the parent's guard can drop
                let child = t.enter();
                let t2 = Arc::clone(&t);
                tokio::spawn(async move {
                    let _child = child;
                    let grandchild = t2.enter();
                    tokio::spawn(async move {
                        let _grandchild = grandchild;
                        tokio::time::sleep(Duration::from_millis(20)).await;
                    });
                });
            }
        });

        tokio::time::timeout(Duration::from_secs(2), tracker.wait())
            .await
            .expect("tracker should drain");
        assert_eq!(tracker.pending(), 0);
    }
}
