//! Deferred tasks and wall-clock time

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::Duration;

/// Handle for a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Host timer queue (`setTimeout` in a browser)
pub trait Scheduler {
    /// Run `task` after `delay`; `None` if the host refused to schedule it
    fn set_timeout(&self, delay: Duration, task: Task) -> Option<TimerId>;

    /// Cancel a pending task; unknown or already-run ids are ignored
    fn clear_timeout(&self, id: TimerId);
}

/// Milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Host wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Settable clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by.as_millis() as u64);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct SchedulerState {
    elapsed: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Timer queue driven by explicit [`ManualScheduler::advance`] calls
///
/// Headless hosts and tests use this to step virtual time.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<SchedulerState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Advance virtual time, running due tasks in due order
    ///
    /// Returns the number of tasks that ran. Tasks scheduled by running tasks
    /// are picked up if they fall due within the same advance.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().elapsed + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due_idx = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id.0))
                    .map(|(idx, _)| idx);
                match due_idx {
                    Some(idx) => {
                        let pending = state.pending.remove(idx);
                        state.elapsed = pending.due;
                        Some(pending.task)
                    }
                    None => {
                        state.elapsed = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        ran
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("elapsed", &state.elapsed)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Task) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.elapsed + delay;
        state.pending.push(PendingTask { id, due, task });
        Some(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.borrow_mut().pending.retain(|p| p.id != id);
    }
}
