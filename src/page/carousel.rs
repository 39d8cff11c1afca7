use super::*;
use crate::behaviors::slider::SwipeDirection;
use crate::behaviors::strip_loop::{
    LoopTransition, StripGeometry, StripMargins, initial_offset, snap_target,
};

impl Page {
    pub(super) fn wire_slider(&mut self) -> Result<()> {
        let Some(track) = self.dom.query_selector(".testimonials__track")? else {
            return Ok(());
        };
        let cards = self.dom.query_selector_all(".testimonial-card")?;
        let Some(slider) = Slider::new(cards.len()) else {
            return Ok(());
        };

        let mut dots = Vec::with_capacity(slider.total());
        if let Some(container) = self.dom.query_selector(".testimonials__dots")? {
            for index in 0..slider.total() {
                let class = if index == 0 { "dot active" } else { "dot" };
                let dot = self.dom.create_element(
                    container,
                    "span".into(),
                    HashMap::from([("class".to_string(), class.to_string())]),
                );
                self.listeners.add(dot, "click", Handler::SliderDot(index));
                dots.push(dot);
            }
        }

        if let Some(next) = self.dom.query_selector(".testimonials__btn--next")? {
            self.listeners.add(next, "click", Handler::SliderNext);
        }
        if let Some(prev) = self.dom.query_selector(".testimonials__btn--prev")? {
            self.listeners.add(prev, "click", Handler::SliderPrev);
        }

        self.behaviors.slider = Some(SliderBinding {
            slider,
            track,
            dots,
            autoplay: Autoplay::default(),
            swipe: SwipeTracker::default(),
        });
        self.start_autoplay();

        self.listeners.add(track, "mouseenter", Handler::PauseAutoplay);
        self.listeners.add(track, "mouseleave", Handler::ResumeAutoplay);
        self.listeners.add(track, "touchstart", Handler::TouchStart);
        self.listeners.add(track, "touchend", Handler::TouchEnd);
        Ok(())
    }

    pub(super) fn slider_step(&mut self, step: fn(&mut Slider) -> usize) -> Result<()> {
        let Some(binding) = self.behaviors.slider.as_mut() else {
            return Ok(());
        };
        step(&mut binding.slider);
        self.render_slide()
    }

    pub(super) fn slider_jump(&mut self, index: usize) -> Result<()> {
        let Some(binding) = self.behaviors.slider.as_mut() else {
            return Ok(());
        };
        if !binding.slider.jump_to(index) {
            let total = binding.slider.total();
            self.trace_behavior_line(format!(
                "[behavior] slider jump rejected index={index} total={total}"
            ));
            return Ok(());
        }
        self.render_slide()
    }

    /// Moves the track and leaves exactly one dot active.
    fn render_slide(&mut self) -> Result<()> {
        let Some(binding) = self.behaviors.slider.as_ref() else {
            return Ok(());
        };
        let track = binding.track;
        let current = binding.slider.current();
        let total = binding.slider.total();
        let transform = binding.slider.track_transform();
        let dots = binding.dots.clone();

        self.dom.style_set(track, "transform", &transform)?;
        for (index, dot) in dots.into_iter().enumerate() {
            self.dom.class_set(dot, "active", index == current)?;
        }
        self.trace_behavior_line(format!("[behavior] slider index={current} total={total}"));
        Ok(())
    }

    /// Schedules the autoplay interval unless one is already live.
    fn start_autoplay(&mut self) {
        let interval_ms = self.config.autoplay_interval_ms;
        let Some(binding) = self.behaviors.slider.as_ref() else {
            return;
        };
        if binding.autoplay.is_running() {
            self.trace_behavior_line("[behavior] autoplay already running".into());
            return;
        }
        let timer_id = self.schedule_interval(Task::SliderAutoplay, interval_ms);
        if let Some(binding) = self.behaviors.slider.as_mut() {
            binding.autoplay.start(timer_id);
        }
    }

    pub(super) fn pause_autoplay(&mut self) -> Result<()> {
        let Some(timer_id) = self
            .behaviors
            .slider
            .as_mut()
            .and_then(|binding| binding.autoplay.pause())
        else {
            return Ok(());
        };
        self.cancel_timer(timer_id);
        self.trace_behavior_line(format!("[behavior] autoplay paused timer={timer_id}"));
        Ok(())
    }

    pub(super) fn resume_autoplay(&mut self) -> Result<()> {
        self.start_autoplay();
        Ok(())
    }

    pub(super) fn slider_touch_start(&mut self, event: &EventState) -> Result<()> {
        let EventDetail::Touch { screen_x } = event.detail else {
            return Ok(());
        };
        if let Some(binding) = self.behaviors.slider.as_mut() {
            binding.swipe.begin(screen_x);
        }
        Ok(())
    }

    pub(super) fn slider_touch_end(&mut self, event: &EventState) -> Result<()> {
        let EventDetail::Touch { screen_x } = event.detail else {
            return Ok(());
        };
        let threshold = self.config.swipe_threshold;
        let Some(binding) = self.behaviors.slider.as_mut() else {
            return Ok(());
        };
        match binding.swipe.finish(screen_x, threshold) {
            Some(SwipeDirection::Next) => self.slider_step(Slider::advance),
            Some(SwipeDirection::Prev) => self.slider_step(Slider::retreat),
            None => Ok(()),
        }
    }

    pub(super) fn wire_card_strip(&mut self) -> Result<()> {
        let Some(track) = self.dom.query_selector(".commits-slider__track")? else {
            return Ok(());
        };
        self.behaviors.strip = Some(StripBinding {
            track,
            looping: StripLoop::default(),
            initial_offset_timer: None,
        });
        self.listeners.add(track, "scroll", Handler::StripScroll);
        self.listeners.add_window("resize", Handler::StripMediaQuery);
        self.evaluate_strip_media_query()
    }

    /// Re-evaluates the narrow-viewport media query. Entering it schedules
    /// the initial offset; leaving it stops snapping.
    pub(super) fn evaluate_strip_media_query(&mut self) -> Result<()> {
        let width = self.window.viewport.width;
        let max_width = self.config.strip_max_width;
        let delay_ms = self.config.strip_settle_delay_ms;
        let Some(strip) = self.behaviors.strip.as_mut() else {
            return Ok(());
        };
        match strip.looping.update(width, max_width) {
            LoopTransition::Activated => {
                self.trace_behavior_line(format!("[behavior] strip loop on width={width}"));
                let timer_id = self.schedule_timeout(Task::StripInitialOffset, delay_ms);
                if let Some(strip) = self.behaviors.strip.as_mut() {
                    strip.initial_offset_timer = Some(timer_id);
                }
            }
            LoopTransition::Deactivated => {
                let pending = strip.initial_offset_timer.take();
                self.trace_behavior_line(format!("[behavior] strip loop off width={width}"));
                if let Some(timer_id) = pending {
                    self.cancel_timer(timer_id);
                }
            }
            LoopTransition::Unchanged => {}
        }
        Ok(())
    }

    pub(super) fn apply_strip_initial_offset(&mut self) -> Result<()> {
        let Some(strip) = self.behaviors.strip.as_mut() else {
            return Ok(());
        };
        strip.initial_offset_timer = None;
        if !strip.looping.is_active() {
            return Ok(());
        }
        let track = strip.track;
        let scroll_width = self
            .dom
            .layout(track)
            .map(|layout| layout.scroll_width)
            .unwrap_or(0.0);
        let applied = self.dom.set_scroll_left(track, initial_offset(scroll_width))?;
        self.trace_behavior_line(format!("[behavior] strip initial offset={applied}"));
        Ok(())
    }

    /// Near either end the strip jumps back to the middle copy. The jump
    /// writes the offset directly and raises no scroll event of its own.
    pub(super) fn snap_card_strip(&mut self) -> Result<()> {
        let Some(strip) = self.behaviors.strip.as_ref() else {
            return Ok(());
        };
        if !strip.looping.is_active() {
            return Ok(());
        }
        let track = strip.track;
        let Some(layout) = self.dom.layout(track) else {
            return Ok(());
        };
        let geometry = StripGeometry {
            scroll_left: self.dom.scroll_left(track),
            scroll_width: layout.scroll_width,
            client_width: layout.client_width,
        };
        let margins = StripMargins {
            trailing: self.config.strip_trailing_margin,
            leading: self.config.strip_leading_margin,
        };
        if let Some(target) = snap_target(geometry, margins) {
            let applied = self.dom.set_scroll_left(track, target)?;
            self.trace_behavior_line(format!(
                "[behavior] strip snap from={} to={applied}",
                geometry.scroll_left
            ));
        }
        Ok(())
    }
}
