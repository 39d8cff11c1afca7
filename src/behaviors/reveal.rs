//! One-shot viewport observers used for fade-in cards and deferred images.

/// Root geometry for an observer: the viewport shrunk at the bottom by
/// `bottom_margin`, and the fraction of an element that must be inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl IntersectionOptions {
    pub const ANY_PIXEL: Self = Self {
        threshold: 0.0,
        bottom_margin: 0.0,
    };
}

/// Horizontal extent of an element inside a scroll container, and the
/// container's visible window, both in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalClip {
    pub left: f64,
    pub right: f64,
    pub clip_left: f64,
    pub clip_right: f64,
}

impl HorizontalClip {
    fn visible_fraction(&self) -> Option<f64> {
        if self.right < self.clip_left || self.left > self.clip_right {
            return None;
        }
        let width = self.right - self.left;
        if width <= 0.0 {
            return Some(1.0);
        }
        Some((self.right.min(self.clip_right) - self.left.max(self.clip_left)) / width)
    }
}

fn vertical_fraction(
    top: f64,
    bottom: f64,
    viewport_height: f64,
    options: IntersectionOptions,
) -> Option<f64> {
    let root_bottom = viewport_height - options.bottom_margin;
    if bottom < 0.0 || top > root_bottom {
        return None;
    }
    let height = bottom - top;
    if height <= 0.0 {
        return Some(1.0);
    }
    Some((bottom.min(root_bottom) - top.max(0.0)) / height)
}

/// Whether an element spanning `top..bottom` (viewport coordinates)
/// intersects the observer root enough to count.
pub fn intersects(top: f64, bottom: f64, viewport_height: f64, options: IntersectionOptions) -> bool {
    intersects_clipped(top, bottom, None, viewport_height, options)
}

/// Like [`intersects`], but an element inside a horizontal scroll
/// container must also overlap the container's visible window. The
/// threshold applies to the visible share of the element's area.
pub fn intersects_clipped(
    top: f64,
    bottom: f64,
    clip: Option<HorizontalClip>,
    viewport_height: f64,
    options: IntersectionOptions,
) -> bool {
    let Some(vertical) = vertical_fraction(top, bottom, viewport_height, options) else {
        return false;
    };
    let horizontal = match clip {
        Some(clip) => match clip.visible_fraction() {
            Some(fraction) => fraction,
            None => return false,
        },
        None => 1.0,
    };
    options.threshold <= 0.0 || vertical * horizontal >= options.threshold
}

/// Elements still waiting to be revealed. Once an element is reported it
/// is dropped and can never be observed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealObserver<T> {
    observed: Vec<T>,
    revealed: Vec<T>,
}

impl<T> Default for RevealObserver<T> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            revealed: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq> RevealObserver<T> {
    pub fn observe(&mut self, item: T) {
        if !self.observed.contains(&item) && !self.revealed.contains(&item) {
            self.observed.push(item);
        }
    }

    pub fn observed(&self) -> &[T] {
        &self.observed
    }

    pub fn is_revealed(&self, item: T) -> bool {
        self.revealed.contains(&item)
    }

    /// Unobserves every element `is_visible` accepts and returns them in
    /// observation order.
    pub fn take_visible(&mut self, mut is_visible: impl FnMut(T) -> bool) -> Vec<T> {
        let mut fired = Vec::new();
        self.observed.retain(|item| {
            if is_visible(*item) {
                fired.push(*item);
                false
            } else {
                true
            }
        });
        self.revealed.extend(fired.iter().copied());
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: IntersectionOptions = IntersectionOptions {
        threshold: 0.1,
        bottom_margin: 50.0,
    };

    #[test]
    fn threshold_counts_only_the_part_above_the_margin() {
        // Root bottom sits at 750 for an 800px viewport.
        assert!(!intersects(745.0, 845.0, 800.0, CARDS));
        assert!(intersects(740.0, 840.0, 800.0, CARDS));
        assert!(!intersects(-95.0, 5.0, 800.0, CARDS));
        assert!(intersects(-90.0, 10.0, 800.0, CARDS));
    }

    #[test]
    fn any_pixel_observer_accepts_edge_contact() {
        assert!(intersects(800.0, 900.0, 800.0, IntersectionOptions::ANY_PIXEL));
        assert!(!intersects(801.0, 900.0, 800.0, IntersectionOptions::ANY_PIXEL));
        assert!(intersects(-50.0, 0.0, 800.0, IntersectionOptions::ANY_PIXEL));
    }

    #[test]
    fn clipped_elements_need_horizontal_overlap() {
        let clip = |left: f64| HorizontalClip {
            left,
            right: left + 300.0,
            clip_left: 0.0,
            clip_right: 375.0,
        };
        assert!(!intersects_clipped(100.0, 500.0, Some(clip(400.0)), 800.0, CARDS));
        assert!(intersects_clipped(100.0, 500.0, Some(clip(375.0)), 800.0, IntersectionOptions::ANY_PIXEL));
        // 30 of 300px inside the window is exactly the 10% threshold.
        assert!(intersects_clipped(100.0, 500.0, Some(clip(345.0)), 800.0, CARDS));
        assert!(!intersects_clipped(100.0, 500.0, Some(clip(346.0)), 800.0, CARDS));
        assert!(intersects_clipped(100.0, 500.0, None, 800.0, CARDS));
    }

    #[test]
    fn revealed_items_are_never_observed_again() {
        let mut observer = RevealObserver::default();
        observer.observe(1);
        observer.observe(2);
        observer.observe(1);
        assert_eq!(observer.observed(), &[1, 2]);

        assert_eq!(observer.take_visible(|item| item == 2), vec![2]);
        observer.observe(2);
        assert_eq!(observer.observed(), &[1]);
        assert!(observer.is_revealed(2));
        assert_eq!(observer.take_visible(|_| true), vec![1]);
        assert!(observer.observed().is_empty());
    }
}
