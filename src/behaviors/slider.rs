//! Testimonial carousel: a cyclic index over a fixed number of cards, the
//! swipe classifier, and the single-interval autoplay guard.

/// Current card of a carousel with a fixed card count.
///
/// `current` is always a valid index; stepping wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    current: usize,
    total: usize,
}

impl Slider {
    /// Returns `None` for an empty carousel.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then_some(Self { current: 0, total })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.total;
        self.current
    }

    pub fn retreat(&mut self) -> usize {
        self.current = (self.current + self.total - 1) % self.total;
        self.current
    }

    /// Jumps to `index`. Out-of-range indexes leave the slider untouched and
    /// return `false`.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.total {
            return false;
        }
        self.current = index;
        true
    }

    /// Inline `transform` for the track so the current card is in view.
    pub fn track_transform(&self) -> String {
        format!("translateX(-{}%)", self.current * 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Next,
    Prev,
}

/// A finger moving left (start to the right of end) beyond `threshold` pages
/// forward; moving right pages back.
pub fn classify_swipe(start_x: f64, end_x: f64, threshold: f64) -> Option<SwipeDirection> {
    let diff = start_x - end_x;
    if diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 {
        Some(SwipeDirection::Next)
    } else {
        Some(SwipeDirection::Prev)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, screen_x: f64) {
        self.start_x = Some(screen_x);
    }

    /// Ends the gesture. A touch end without a recorded start is ignored.
    pub fn finish(&mut self, screen_x: f64, threshold: f64) -> Option<SwipeDirection> {
        let start_x = self.start_x.take()?;
        classify_swipe(start_x, screen_x, threshold)
    }
}

/// Holds the id of the one live autoplay interval, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Autoplay {
    timer: Option<i64>,
}

impl Autoplay {
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<i64> {
        self.timer
    }

    /// Records a freshly scheduled interval. Refused while one is live so
    /// callers never stack two.
    pub fn start(&mut self, timer_id: i64) -> bool {
        if self.timer.is_some() {
            return false;
        }
        self.timer = Some(timer_id);
        true
    }

    /// Stops autoplay; the caller clears the returned interval.
    pub fn pause(&mut self) -> Option<i64> {
        self.timer.take()
    }
}
