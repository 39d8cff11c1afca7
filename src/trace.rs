use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceCategory {
    Event,
    Timer,
    Behavior,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) behaviors: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            behaviors: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

impl TraceState {
    pub(crate) fn wants(&self, category: TraceCategory) -> bool {
        self.enabled
            && match category {
                TraceCategory::Event => self.events,
                TraceCategory::Timer => self.timers,
                TraceCategory::Behavior => self.behaviors,
            }
    }

    pub(crate) fn record(&mut self, category: TraceCategory, line: String) {
        if !self.wants(category) {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        while self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn shrink_to_limit(&mut self) {
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_categories_are_dropped() {
        let mut trace = TraceState {
            enabled: true,
            timers: false,
            to_stderr: false,
            ..TraceState::default()
        };
        trace.record(TraceCategory::Timer, "[timer] run".into());
        trace.record(TraceCategory::Event, "[event] click".into());
        assert_eq!(trace.logs, VecDeque::from(vec!["[event] click".to_string()]));
    }

    #[test]
    fn log_limit_keeps_latest_entries() {
        let mut trace = TraceState {
            enabled: true,
            log_limit: 2,
            to_stderr: false,
            ..TraceState::default()
        };
        for n in 0..4 {
            trace.record(TraceCategory::Behavior, format!("[behavior] {n}"));
        }
        assert_eq!(
            trace.logs.iter().cloned().collect::<Vec<_>>(),
            vec!["[behavior] 2".to_string(), "[behavior] 3".to_string()]
        );
    }
}
