//! Statistic counters that count up to their declared target once the stats
//! block first comes into view.

/// Parses a declared target the way `parseInt` reads it: optional leading
/// whitespace and sign, then the longest run of decimal digits.
pub fn parse_count_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    /// Still counting; show this value and request another frame.
    Running(i64),
    Finished(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    step: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: i64, frame_ms: i64) -> Self {
        let frames = duration_ms as f64 / frame_ms.max(1) as f64;
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> CounterFrame {
        if self.finished {
            return CounterFrame::Finished(self.target);
        }
        self.current += self.step;
        if self.current < self.target as f64 {
            CounterFrame::Running(self.current.floor() as i64)
        } else {
            self.finished = true;
            CounterFrame::Finished(self.target)
        }
    }
}

/// Latch that lets the counters start at most once per page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterTrigger {
    fired: bool,
}

impl CounterTrigger {
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` only for the first visible check.
    pub fn fire_if(&mut self, visible: bool) -> bool {
        if self.fired || !visible {
            return false;
        }
        self.fired = true;
        true
    }
}

/// The block counts as visible once any part of it is inside the viewport.
pub fn block_visible(rect_top: f64, rect_bottom: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height && rect_bottom >= 0.0
}
