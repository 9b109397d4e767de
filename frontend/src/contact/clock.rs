//! Deterministic timer queue. Callers pass the current time in, so tests
//! can advance a virtual clock instead of waiting.

/// Milliseconds on whatever monotonic-enough clock the caller uses.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    due: Millis,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }
}

impl<T: PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Millis, delay: Millis, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due: now.saturating_add(delay), task });
        id
    }

    /// Like `schedule`, but first drops any pending equal task so a burst
    /// collapses into one run `delay` after the last call.
    pub fn debounce(&mut self, now: Millis, delay: Millis, task: T) -> TaskId {
        self.entries.retain(|entry| entry.task != task);
        self.schedule(now, delay, task)
    }

    #[cfg(test)]
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.entries.retain(|entry| !predicate(&entry.task));
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns every task due at `now`, earliest first; ties keep
    /// scheduling order.
    pub fn take_due(&mut self, now: Millis) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| entry.due <= now);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| entry.task).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
