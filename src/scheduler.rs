/// Work a timer runs when it comes due.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Task {
    SliderAutoplay,
    StripInitialOffset,
    FormReset { original_label: String },
    CounterFrame { counter: usize },
}

impl Task {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::SliderAutoplay => "slider-autoplay",
            Self::StripInitialOffset => "strip-initial-offset",
            Self::FormReset { .. } => "form-reset",
            Self::CounterFrame { .. } => "counter-frame",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) task: Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub interval_ms: Option<i64>,
    pub label: &'static str,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
    pub(crate) running_timer_id: Option<i64>,
    pub(crate) running_timer_canceled: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
            running_timer_id: None,
            running_timer_canceled: false,
        }
    }
}

impl SchedulerState {
    fn allocate_timer_id(&mut self) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    pub(crate) fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    /// Queues `task` after `delay_ms`; an `interval_ms` makes it repeat.
    pub(crate) fn schedule(&mut self, task: Task, delay_ms: i64, interval_ms: Option<i64>) -> i64 {
        let delay_ms = delay_ms.max(0);
        let id = self.allocate_timer_id();
        let order = self.allocate_task_order();
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms),
            order,
            interval_ms: interval_ms.map(|value| value.max(0)),
            task,
        });
        id
    }

    /// Removes a queued timer, or marks the running one so it is not requeued.
    pub(crate) fn clear(&mut self, id: i64) -> (usize, bool) {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        let removed = before.saturating_sub(self.task_queue.len());
        let running_canceled = self.running_timer_id == Some(id);
        if running_canceled {
            self.running_timer_canceled = true;
        }
        (removed, running_canceled)
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
                label: task.task.label(),
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_task_orders_by_due_time_then_insertion() {
        let mut scheduler = SchedulerState::default();
        let late = scheduler.schedule(Task::SliderAutoplay, 50, None);
        let first = scheduler.schedule(Task::StripInitialOffset, 10, None);
        let tie = scheduler.schedule(Task::CounterFrame { counter: 0 }, 10, None);

        let idx = scheduler.next_task_index(None).expect("queue is not empty");
        assert_eq!(scheduler.task_queue[idx].id, first);

        let ids = scheduler
            .pending()
            .into_iter()
            .map(|timer| timer.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![first, tie, late]);
        assert_eq!(scheduler.next_task_index(Some(5)), None);
    }

    #[test]
    fn clearing_the_running_timer_marks_it_canceled() {
        let mut scheduler = SchedulerState::default();
        let id = scheduler.schedule(Task::SliderAutoplay, 5, Some(5));
        scheduler.task_queue.clear();
        scheduler.running_timer_id = Some(id);
        assert_eq!(scheduler.clear(id), (0, true));
        assert!(scheduler.running_timer_canceled);
    }
}
