/// Which loop a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Motion,
    Routine,
}

/// Opaque handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// One-shot timers, the only suspension point of the core.
///
/// Every tick ends by scheduling its successor; cancelling a handle that
/// already fired is a no-op.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: u64,
    handle: TimerHandle,
    task: Task,
}

/// In-process timer queue on a virtual millisecond clock.
///
/// Tests advance it by hand; the host driver advances it from a monotonic
/// clock. Timers due at the same instant fire in scheduling order.
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: Vec::with_capacity(4),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward. Never goes backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;
    }

    /// Remove and return the earliest timer that is due, if any.
    pub fn pop_due(&mut self) -> Option<Task> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= self.now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).task)
    }

    /// When the next timer fires.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|e| e.due_ms).min()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.pending.iter().any(|e| e.task == task)
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            due_ms: self.now_ms + delay_ms as u64,
            handle,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|e| e.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(60_000, Task::Routine);
        q.schedule(30, Task::Motion);
        assert_eq!(q.pop_due(), None);
        assert_eq!(q.next_due(), Some(30));

        q.advance(30);
        assert_eq!(q.pop_due(), Some(Task::Motion));
        assert_eq!(q.pop_due(), None);

        q.advance_to(60_000);
        assert_eq!(q.pop_due(), Some(Task::Routine));
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, Task::Routine);
        q.schedule(0, Task::Motion);
        assert_eq!(q.pop_due(), Some(Task::Routine));
        assert_eq!(q.pop_due(), Some(Task::Motion));
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, Task::Motion);
        q.schedule(10, Task::Routine);
        q.cancel(a);
        q.cancel(a);
        q.advance(10);
        assert_eq!(q.pop_due(), Some(Task::Routine));
        assert_eq!(q.pop_due(), None);
    }

    #[test]
    fn clock_never_rewinds() {
        let mut q = TimerQueue::new();
        q.advance_to(100);
        q.advance_to(50);
        assert_eq!(q.now_ms(), 100);
    }
}
