//! Single-threaded timer queue with a virtual clock
//!
//! Components never sleep or spawn for their own timing. They schedule plain
//! task values into a [`TaskQueue`], and the owner of the queue drains due
//! tasks with [`TaskQueue::poll`] and dispatches each one to completion before
//! the next. The main loop feeds wall-clock milliseconds in; tests feed any
//! sequence of instants they like.

use std::collections::{BTreeMap, HashMap};

/// Identifies a scheduled timeout or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// "Run this later" primitives offered to components
pub trait TimerService<T> {
    /// Current time on the service's clock, in milliseconds
    fn now_ms(&self) -> u64;

    /// Schedule `task` once, `delay_ms` from now
    fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId;

    /// Schedule `task` every `period_ms`, first firing one period from now
    fn set_interval(&mut self, period_ms: u64, task: T) -> TimerId;

    /// Cancel a timer. Returns false if it already fired or never existed.
    fn clear(&mut self, id: TimerId) -> bool;
}

#[derive(Debug)]
struct Entry<T> {
    period_ms: Option<u64>,
    task: T,
}

/// Virtual-clock implementation of [`TimerService`]
#[derive(Debug)]
pub struct TaskQueue<T> {
    now_ms: u64,
    next_id: u64,
    // Keyed by (deadline, id) so equal deadlines fire in scheduling order
    entries: BTreeMap<(u64, u64), Entry<T>>,
    deadlines: HashMap<u64, u64>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    /// Deadline of the earliest scheduled timer, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    fn insert(&mut self, due_ms: u64, period_ms: Option<u64>, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert((due_ms, id), Entry { period_ms, task });
        self.deadlines.insert(id, due_ms);
        TimerId(id)
    }
}

impl<T: Clone> TaskQueue<T> {
    /// Pop the next task due at or before `until_ms`.
    ///
    /// The clock moves to the task's deadline while it is handed out, so a
    /// handler scheduling follow-up work measures from when it was due. Once
    /// nothing is due the clock settles at `until_ms` and `None` is returned.
    /// Interval timers are re-armed one period after their deadline.
    pub fn poll(&mut self, until_ms: u64) -> Option<T> {
        let key = match self.entries.keys().next() {
            Some(&(due, id)) if due <= until_ms => (due, id),
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                return None;
            }
        };

        let entry = self.entries.remove(&key)?;
        let (due, id) = key;
        self.now_ms = self.now_ms.max(due);

        match entry.period_ms {
            Some(period) => {
                let next_due = due + period.max(1);
                self.entries.insert(
                    (next_due, id),
                    Entry {
                        period_ms: Some(period),
                        task: entry.task.clone(),
                    },
                );
                self.deadlines.insert(id, next_due);
            }
            None => {
                self.deadlines.remove(&id);
            }
        }

        Some(entry.task)
    }

    /// Drain every task due at or before `until_ms`, in firing order.
    ///
    /// Only suitable when handlers don't schedule new work; the app loop uses
    /// [`TaskQueue::poll`] so follow-ups due within the same window also fire.
    pub fn drain_until(&mut self, until_ms: u64) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(task) = self.poll(until_ms) {
            due.push(task);
        }
        due
    }
}

impl<T> TimerService<T> for TaskQueue<T> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        let due = self.now_ms + delay_ms;
        self.insert(due, None, task)
    }

    fn set_interval(&mut self, period_ms: u64, task: T) -> TimerId {
        let period = period_ms.max(1);
        let due = self.now_ms + period;
        self.insert(due, Some(period), task)
    }

    fn clear(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(due) => self.entries.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }
}
