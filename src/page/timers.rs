use super::*;
use crate::scheduler::ScheduledTask;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    /// Drops every queued timer. Behaviors forget their handles, so autoplay
    /// restarts on the next mouse leave.
    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        if self.scheduler.running_timer_id.is_some() {
            self.scheduler.running_timer_canceled = true;
        }
        if let Some(binding) = self.behaviors.slider.as_mut() {
            binding.autoplay.pause();
        }
        if let Some(strip) = self.behaviors.strip.as_mut() {
            strip.initial_offset_timer = None;
        }
        if let Some(binding) = self.behaviors.form.as_mut() {
            binding.reset_timer = None;
        }
        self.behaviors.counters.running.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        let target = from.saturating_add(delta_ms);
        let ran = self.run_until(target)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        let ran = self.run_until(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={} ran_due={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    /// Runs queued work until the queue is empty. An interval that never
    /// stops trips the step limit instead of looping forever.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(ran)
    }

    /// Steps the clock through every due time up to `target_ms`, so
    /// animation frames scheduled along the way also run.
    fn run_until(&mut self, target_ms: i64) -> Result<usize> {
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.scheduler.now_ms = target_ms;
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = self
            .scheduler
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},label={},due_at={},interval_ms={:?}",
                    task.id,
                    task.task.label(),
                    task.due_at,
                    task.interval_ms
                )
            })
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "flush exceeded max task steps (possible endless interval): limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            self.scheduler.timer_step_limit,
            self.scheduler.now_ms,
            self.scheduler.task_queue.len(),
        ))
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} label={} due_at={} now_ms={}",
            task.id,
            task.task.label(),
            task.due_at,
            self.scheduler.now_ms
        ));

        self.scheduler.running_timer_id = Some(task.id);
        self.scheduler.running_timer_canceled = false;
        let outcome = match &task.task {
            Task::SliderAutoplay => self.slider_step(Slider::advance),
            Task::StripInitialOffset => self.apply_strip_initial_offset(),
            Task::FormReset { original_label } => self.reset_contact_form(original_label),
            Task::CounterFrame { counter } => self.step_counter(*counter),
        };
        let canceled = self.scheduler.running_timer_canceled;
        self.scheduler.running_timer_id = None;
        self.scheduler.running_timer_canceled = false;
        outcome?;

        if let Some(interval_ms) = task.interval_ms {
            if !canceled {
                let due_at = task.due_at.saturating_add(interval_ms);
                let order = self.scheduler.allocate_task_order();
                self.trace_timer_line(format!(
                    "[timer] requeue id={} due_at={due_at} interval_ms={interval_ms}",
                    task.id
                ));
                self.scheduler.task_queue.push(ScheduledTask {
                    due_at,
                    order,
                    ..task
                });
            }
        }
        Ok(())
    }

    pub(super) fn schedule_timeout(&mut self, task: Task, delay_ms: i64) -> i64 {
        let label = task.label();
        let id = self.scheduler.schedule(task, delay_ms, None);
        self.trace_timer_line(format!(
            "[timer] schedule timeout id={id} label={label} delay_ms={delay_ms} due_at={}",
            self.scheduler.now_ms.saturating_add(delay_ms.max(0))
        ));
        id
    }

    pub(super) fn schedule_interval(&mut self, task: Task, interval_ms: i64) -> i64 {
        let label = task.label();
        let id = self.scheduler.schedule(task, interval_ms, Some(interval_ms));
        self.trace_timer_line(format!(
            "[timer] schedule interval id={id} label={label} interval_ms={interval_ms} due_at={}",
            self.scheduler.now_ms.saturating_add(interval_ms.max(0))
        ));
        id
    }

    pub(super) fn cancel_timer(&mut self, timer_id: i64) {
        let (removed, running_canceled) = self.scheduler.clear(timer_id);
        self.trace_timer_line(format!(
            "[timer] clear id={timer_id} removed={removed} running_canceled={running_canceled}"
        ));
    }
}
