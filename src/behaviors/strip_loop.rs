//! Endless card strip. The markup repeats the cards three times; whenever the
//! scroll offset drifts close to either edge it is put back at the start of
//! the middle copy, which looks identical.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMargins {
    pub trailing: f64,
    pub leading: f64,
}

pub fn initial_offset(scroll_width: f64) -> f64 {
    scroll_width / 3.0
}

/// Offset to jump to, or `None` while the strip is comfortably inside.
pub fn snap_target(geometry: StripGeometry, margins: StripMargins) -> Option<f64> {
    let near_end =
        geometry.scroll_left + geometry.client_width >= geometry.scroll_width - margins.trailing;
    let near_start = geometry.scroll_left <= margins.leading;
    (near_end || near_start).then(|| initial_offset(geometry.scroll_width))
}

/// Whether the loop is active. Tracks a live viewport-width media query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripLoop {
    active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopTransition {
    Activated,
    Deactivated,
    Unchanged,
}

impl StripLoop {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, viewport_width: f64, max_width: f64) -> LoopTransition {
        let narrow = viewport_width <= max_width;
        match (self.active, narrow) {
            (false, true) => {
                self.active = true;
                LoopTransition::Activated
            }
            (true, false) => {
                self.active = false;
                LoopTransition::Deactivated
            }
            _ => LoopTransition::Unchanged,
        }
    }
}
