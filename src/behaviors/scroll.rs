//! Window-scroll reactions: header styling, scroll-spy, anchor targets.

pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Vertical extent of a page section, as laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    /// `(top - offset, top - offset + height]`.
    pub fn contains(&self, scroll_y: f64, offset: f64) -> bool {
        let start = self.top - offset;
        scroll_y > start && scroll_y <= start + self.height
    }
}

/// Index of the section the reader is in. Overlapping spans resolve to the
/// first one in document order.
pub fn active_section(spans: &[SectionSpan], scroll_y: f64, offset: f64) -> Option<usize> {
    spans.iter().position(|span| span.contains(scroll_y, offset))
}

/// Window offset that puts `target_top` just below a fixed header.
pub fn anchor_scroll_target(target_top: f64, header_height: f64) -> f64 {
    (target_top - header_height).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_threshold_is_exclusive() {
        assert!(!header_scrolled(100.0, 100.0));
        assert!(header_scrolled(100.5, 100.0));
    }

    #[test]
    fn section_span_bounds() {
        let span = SectionSpan {
            top: 800.0,
            height: 600.0,
        };
        assert!(!span.contains(650.0, 150.0));
        assert!(span.contains(651.0, 150.0));
        assert!(span.contains(1250.0, 150.0));
        assert!(!span.contains(1251.0, 150.0));
    }

    #[test]
    fn first_overlapping_section_wins() {
        let spans = [
            SectionSpan {
                top: 0.0,
                height: 1000.0,
            },
            SectionSpan {
                top: 500.0,
                height: 1000.0,
            },
        ];
        assert_eq!(active_section(&spans, 600.0, 150.0), Some(0));
        assert_eq!(active_section(&spans, 900.0, 150.0), Some(1));
        assert_eq!(active_section(&spans, 5000.0, 150.0), None);
    }

    #[test]
    fn anchor_target_never_goes_above_the_page() {
        assert_eq!(anchor_scroll_target(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_scroll_target(40.0, 80.0), 0.0);
    }
}
