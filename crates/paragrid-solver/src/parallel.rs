//! Worker-pool fan-out of propagation and the hidden-single scan.
//!
//! Both entry points share one discipline: workers record the first
//! [`Contradiction`] they hit, flip the queue's abort flag so every sibling
//! finishes its current unit of work and exits, and the orchestrating thread
//! re-raises that contradiction exactly once after the scope has joined.

use std::sync::Mutex;

use paragrid_core::{Cell, Grid};
use rayon::ThreadPool;

use crate::{
    error::Contradiction, hidden::find_unique_possibility, propagate::propagate,
    queue::FoundPositions,
};

/// Drains the found-position queue with one worker per pool thread.
///
/// Each worker pops a position (counting itself in flight), propagates it,
/// possibly enqueuing newly fixed peers, and goes idle again. A worker only
/// exits once the queue is empty *and* no sibling is in flight, so work
/// enqueued by a mid-propagation sibling is never lost.
///
/// # Errors
///
/// Returns the first [`Contradiction`] any worker hit; the queue is left
/// empty and re-armed for the caller's next use.
pub(crate) fn remove_queued_possibilities(
    pool: &ThreadPool,
    grid: &Grid,
    queue: &FoundPositions,
) -> Result<(), Contradiction> {
    let failure = Mutex::new(None);
    let workers = pool.current_num_threads().max(1);

    pool.scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|_| {
                while let Some(position) = queue.take() {
                    let result = propagate(grid, position, queue);
                    queue.complete();
                    if let Err(contradiction) = result {
                        record_failure(&failure, contradiction, queue);
                    }
                }
            });
        }
    });

    raise_recorded_failure(&failure, queue)
}

/// Runs the hidden-single scan across the pool over contiguous cell ranges.
///
/// The partitioning itself guarantees disjoint writers: every worker assigns
/// values only to cells of its own range, through the per-cell finder. Reads
/// of peer domains tolerate concurrent writers because domains are single
/// atomic words. Newly fixed cells are enqueued for the next propagation
/// round.
///
/// # Errors
///
/// Returns the first [`Contradiction`] any worker hit, with the same abort
/// discipline as [`remove_queued_possibilities`].
pub(crate) fn set_unique_possibilities(
    pool: &ThreadPool,
    grid: &Grid,
    queue: &FoundPositions,
) -> Result<(), Contradiction> {
    let failure = Mutex::new(None);
    let workers = pool.current_num_threads().max(1);
    let range_len = grid.cells().len().div_ceil(workers);

    pool.scope(|scope| {
        let failure = &failure;
        for range in grid.cells().chunks(range_len) {
            scope.spawn(move |_| scan_range(grid, range, queue, failure));
        }
    });

    raise_recorded_failure(&failure, queue)
}

fn scan_range(
    grid: &Grid,
    range: &[Cell],
    queue: &FoundPositions,
    failure: &Mutex<Option<Contradiction>>,
) {
    for cell in range {
        if queue.is_aborted() {
            return;
        }
        if cell.is_fixed() {
            continue;
        }
        let Some(value) = find_unique_possibility(grid, cell.position()) else {
            continue;
        };
        match cell.set_value(value) {
            Ok(()) => queue.push(cell.position()),
            Err(error) => record_failure(failure, error.into(), queue),
        }
    }
}

/// Stores the first contradiction of the run and aborts the queue so every
/// worker drains out.
fn record_failure(
    failure: &Mutex<Option<Contradiction>>,
    contradiction: Contradiction,
    queue: &FoundPositions,
) {
    failure
        .lock()
        .expect("failure slot lock poisoned")
        .get_or_insert(contradiction);
    queue.abort();
}

fn raise_recorded_failure(
    failure: &Mutex<Option<Contradiction>>,
    queue: &FoundPositions,
) -> Result<(), Contradiction> {
    let recorded = failure.lock().expect("failure slot lock poisoned").take();
    match recorded {
        Some(contradiction) => {
            queue.reset_abort();
            Err(contradiction)
        }
        None => Ok(()),
    }
}
