//! Queue of newly fixed positions awaiting propagation.

use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard},
};

use paragrid_core::Position;

/// FIFO of positions whose cell just became fixed.
///
/// The queue is shared by every propagation worker of one solve attempt. It
/// carries, under a single mutex, the pending positions, the count of workers
/// currently propagating (*in flight*) and the abort flag, so the parallel
/// termination condition (queue empty **and** nobody in flight) is
/// evaluated atomically. Workers block on a condvar instead of spinning.
///
/// # Examples
///
/// ```
/// use paragrid_core::Position;
/// use paragrid_solver::FoundPositions;
///
/// let queue = FoundPositions::new();
/// queue.push(Position::new(0, 0));
/// assert_eq!(queue.try_pop(), Some(Position::new(0, 0)));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FoundPositions {
    state: Mutex<State>,
    available: Condvar,
}

#[derive(Debug, Default)]
struct State {
    queue: VecDeque<Position>,
    in_flight: usize,
    aborted: bool,
}

impl FoundPositions {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a newly fixed position. Ignored once the run was aborted.
    pub fn push(&self, position: Position) {
        let mut state = self.lock();
        if state.aborted {
            return;
        }
        state.queue.push_back(position);
        self.available.notify_one();
    }

    /// Pops the next position without blocking, for single-threaded drains.
    pub fn try_pop(&self) -> Option<Position> {
        self.lock().queue.pop_front()
    }

    /// Returns `true` if no position is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    /// Returns the number of pending positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Discards all pending positions.
    pub fn clear(&self) {
        self.lock().queue.clear();
    }

    /// Worker-side pop. Blocks while the queue is empty but a sibling worker
    /// is still propagating (it may enqueue new work); returns `None` only
    /// when the queue is empty with zero workers in flight, or after an
    /// abort.
    ///
    /// A returned position counts the caller as in flight until it calls
    /// [`complete`](Self::complete).
    pub(crate) fn take(&self) -> Option<Position> {
        let mut state = self.lock();
        loop {
            if state.aborted {
                return None;
            }
            if let Some(position) = state.queue.pop_front() {
                state.in_flight += 1;
                return Some(position);
            }
            if state.in_flight == 0 {
                // Termination reached; wake the remaining waiters so they
                // observe it too.
                self.available.notify_all();
                return None;
            }
            state = self
                .available
                .wait(state)
                .expect("found-position queue lock poisoned");
        }
    }

    /// Marks the calling worker idle again after a [`take`](Self::take).
    pub(crate) fn complete(&self) {
        let mut state = self.lock();
        state.in_flight -= 1;
        if state.in_flight == 0 && state.queue.is_empty() {
            self.available.notify_all();
        }
    }

    /// Aborts the current parallel run: pending positions are discarded,
    /// further pushes are ignored and every blocked worker wakes up to exit.
    pub(crate) fn abort(&self) {
        let mut state = self.lock();
        state.aborted = true;
        state.queue.clear();
        self.available.notify_all();
    }

    /// Returns `true` once [`abort`](Self::abort) was called for the current
    /// run.
    pub(crate) fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    /// Re-arms the queue after an aborted run so the caller can reuse it for
    /// the next hypothesis.
    pub(crate) fn reset_abort(&self) {
        let mut state = self.lock();
        state.aborted = false;
        state.queue.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .expect("found-position queue lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = FoundPositions::new();
        queue.push(Position::new(0, 0));
        queue.push(Position::new(1, 1));
        queue.push(Position::new(2, 2));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(Position::new(0, 0)));
        assert_eq!(queue.try_pop(), Some(Position::new(1, 1)));
        assert_eq!(queue.try_pop(), Some(Position::new(2, 2)));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_take_terminates_when_idle_and_empty() {
        let queue = FoundPositions::new();
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn test_take_tracks_in_flight() {
        let queue = FoundPositions::new();
        queue.push(Position::new(0, 0));

        assert_eq!(queue.take(), Some(Position::new(0, 0)));
        queue.push(Position::new(0, 1));
        queue.complete();

        assert_eq!(queue.take(), Some(Position::new(0, 1)));
        queue.complete();
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn test_abort_discards_pending_and_rejects_pushes() {
        let queue = FoundPositions::new();
        queue.push(Position::new(0, 0));
        queue.abort();

        assert!(queue.is_empty());
        assert_eq!(queue.take(), None);

        queue.push(Position::new(1, 1));
        assert!(queue.is_empty());

        queue.reset_abort();
        queue.push(Position::new(1, 1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_workers_block_until_sibling_finishes() {
        use std::{sync::Arc, thread, time::Duration};

        let queue = Arc::new(FoundPositions::new());
        queue.push(Position::new(0, 0));

        // This thread is "in flight" and will enqueue more work.
        assert_eq!(queue.take(), Some(Position::new(0, 0)));

        let sibling = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                // Blocks: queue is empty but one worker is in flight.
                let position = queue.take();
                if position.is_some() {
                    queue.complete();
                }
                position
            })
        };

        thread::sleep(Duration::from_millis(20));
        queue.push(Position::new(3, 3));
        queue.complete();

        assert_eq!(sibling.join().unwrap(), Some(Position::new(3, 3)));
    }
}
