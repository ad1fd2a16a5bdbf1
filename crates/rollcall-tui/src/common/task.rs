use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Verify,
    Login,
    Signup,
    Remove,
    Roster,
}

/// Task lifecycle state (stored in `AppState`, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    /// Clears the task if `id` is the active one. Results from any other id
    /// are stale and must be dropped by the caller.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

/// One control's in-flight action plus the actions queued behind it.
///
/// An action holds the slot until its request completes and, when it
/// triggered a roster refresh, until a render at least that recent lands.
#[derive(Debug)]
pub struct ControlSlot<T> {
    pub task: TaskState,
    awaiting_refresh: Option<TaskId>,
    queued: VecDeque<T>,
}

impl<T> Default for ControlSlot<T> {
    fn default() -> Self {
        Self {
            task: TaskState::default(),
            awaiting_refresh: None,
            queued: VecDeque::new(),
        }
    }
}

impl<T> ControlSlot<T> {
    pub fn is_busy(&self) -> bool {
        self.task.is_running() || self.awaiting_refresh.is_some()
    }

    pub fn enqueue(&mut self, action: T) {
        self.queued.push_back(action);
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Holds the slot until roster render `id` (or a newer one) is applied.
    pub fn await_refresh(&mut self, id: TaskId) {
        self.awaiting_refresh = Some(id);
    }

    /// Called when roster render `applied` lands.
    pub fn on_refresh_applied(&mut self, applied: TaskId) {
        if self.awaiting_refresh.is_some_and(|id| id <= applied) {
            self.awaiting_refresh = None;
        }
    }

    /// Next queued action, once the slot is idle.
    pub fn next_ready(&mut self) -> Option<T> {
        if self.is_busy() {
            None
        } else {
            self.queued.pop_front()
        }
    }
}
