use super::*;

/// Behavior code a listener runs. Each variant is bound by one of the
/// `wire_*` methods at ready time.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Handler {
    OpenMenu,
    CloseMenu,
    CloseMenuOnEscape,
    SmoothScroll,
    HeaderScroll,
    HighlightNavLink,
    CheckCounters,
    SliderNext,
    SliderPrev,
    SliderDot(usize),
    PauseAutoplay,
    ResumeAutoplay,
    TouchStart,
    TouchEnd,
    StripScroll,
    StripMediaQuery,
    SubmitContactForm,
    ClearFieldError,
    CheckRevealTargets,
    CheckLazyImages,
    VideoNotice,
    ShowStateName,
    MoveTooltip,
    HideTooltip,
    MarkLoaded,
}

impl Handler {
    fn label(&self) -> &'static str {
        match self {
            Self::OpenMenu => "open-menu",
            Self::CloseMenu => "close-menu",
            Self::CloseMenuOnEscape => "close-menu-on-escape",
            Self::SmoothScroll => "smooth-scroll",
            Self::HeaderScroll => "header-scroll",
            Self::HighlightNavLink => "highlight-nav-link",
            Self::CheckCounters => "check-counters",
            Self::SliderNext => "slider-next",
            Self::SliderPrev => "slider-prev",
            Self::SliderDot(_) => "slider-dot",
            Self::PauseAutoplay => "pause-autoplay",
            Self::ResumeAutoplay => "resume-autoplay",
            Self::TouchStart => "touch-start",
            Self::TouchEnd => "touch-end",
            Self::StripScroll => "strip-scroll",
            Self::StripMediaQuery => "strip-media-query",
            Self::SubmitContactForm => "submit-contact-form",
            Self::ClearFieldError => "clear-field-error",
            Self::CheckRevealTargets => "check-reveal-targets",
            Self::CheckLazyImages => "check-lazy-images",
            Self::VideoNotice => "video-notice",
            Self::ShowStateName => "show-state-name",
            Self::MoveTooltip => "move-tooltip",
            Self::HideTooltip => "hide-tooltip",
            Self::MarkLoaded => "mark-loaded",
        }
    }
}

/// Payload carried by an event, beyond its type and target.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum EventDetail {
    None,
    Pointer { client_x: f64, client_y: f64 },
    Touch { screen_x: f64 },
    Key(String),
}

#[derive(Debug)]
pub(super) struct EventState {
    pub(super) event_type: String,
    /// `None` for events aimed at the window.
    pub(super) target: Option<NodeId>,
    pub(super) current_target: Option<NodeId>,
    pub(super) default_prevented: bool,
    pub(super) detail: EventDetail,
}

impl EventState {
    fn new(event_type: &str, target: Option<NodeId>, detail: EventDetail) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            detail,
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Handler>>>,
    window: HashMap<String, Vec<Handler>>,
}

impl ListenerStore {
    pub(super) fn add(&mut self, node_id: NodeId, event: &str, handler: Handler) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    pub(super) fn add_window(&mut self, event: &str, handler: Handler) {
        self.window
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    fn get(&self, node_id: NodeId, event: &str) -> Vec<Handler> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    fn get_window(&self, event: &str) -> Vec<Handler> {
        self.window.get(event).cloned().unwrap_or_default()
    }
}

fn bubbles(event_type: &str) -> bool {
    !matches!(event_type, "mouseenter" | "mouseleave" | "scroll")
}

impl Page {
    pub(super) fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        detail: EventDetail,
    ) -> Result<EventState> {
        stacker::maybe_grow(64 * 1024, 32 * 1024 * 1024, || {
            self.dispatch_event_inner(target, event_type, detail)
        })
    }

    fn dispatch_event_inner(
        &mut self,
        target: NodeId,
        event_type: &str,
        detail: EventDetail,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, Some(target), detail);

        let mut path = vec![target];
        if bubbles(event_type) {
            let mut cursor = self.dom.parent(target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = self.dom.parent(node);
            }
        }

        for node in path {
            event.current_target = Some(node);
            self.invoke_listeners(node, &mut event)?;
        }

        self.trace_event_done(&event);
        Ok(event)
    }

    pub(super) fn dispatch_window_event(
        &mut self,
        event_type: &str,
        detail: EventDetail,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, None, detail);
        for handler in self.listeners.get_window(event_type) {
            self.trace_event_line(format!(
                "[event] {} target=window current=window handler={} default_prevented={}",
                event.event_type,
                handler.label(),
                event.default_prevented
            ));
            stacker::maybe_grow(64 * 1024, 32 * 1024 * 1024, || {
                self.run_handler(&handler, &mut event)
            })?;
        }
        self.trace_event_done(&event);
        Ok(event)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        for handler in self.listeners.get(node_id, &event.event_type) {
            if self.trace.wants(TraceCategory::Event) {
                let target_label = self.event_label(event.target);
                let current_label = self.event_label(event.current_target);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} handler={} default_prevented={}",
                    event.event_type,
                    target_label,
                    current_label,
                    handler.label(),
                    event.default_prevented
                ));
            }
            self.run_handler(&handler, event)?;
        }
        Ok(())
    }

    fn run_handler(&mut self, handler: &Handler, event: &mut EventState) -> Result<()> {
        match handler {
            Handler::OpenMenu => self.open_menu(),
            Handler::CloseMenu => self.close_menu(),
            Handler::CloseMenuOnEscape => self.close_menu_on_escape(event),
            Handler::SmoothScroll => self.smooth_scroll_to_anchor(event),
            Handler::HeaderScroll => self.update_header(),
            Handler::HighlightNavLink => self.highlight_nav_link(),
            Handler::CheckCounters => self.check_counters(),
            Handler::SliderNext => self.slider_step(Slider::advance),
            Handler::SliderPrev => self.slider_step(Slider::retreat),
            Handler::SliderDot(index) => self.slider_jump(*index),
            Handler::PauseAutoplay => self.pause_autoplay(),
            Handler::ResumeAutoplay => self.resume_autoplay(),
            Handler::TouchStart => self.slider_touch_start(event),
            Handler::TouchEnd => self.slider_touch_end(event),
            Handler::StripScroll => self.snap_card_strip(),
            Handler::StripMediaQuery => self.evaluate_strip_media_query(),
            Handler::SubmitContactForm => self.submit_contact_form(event),
            Handler::ClearFieldError => self.clear_field_error(event),
            Handler::CheckRevealTargets => self.check_reveal_targets(),
            Handler::CheckLazyImages => self.check_lazy_images(),
            Handler::VideoNotice => {
                self.alert(self.config.video_notice.clone());
                Ok(())
            }
            Handler::ShowStateName => self.show_state_name(event),
            Handler::MoveTooltip => self.move_tooltip(event),
            Handler::HideTooltip => self.hide_tooltip(),
            Handler::MarkLoaded => self.mark_loaded(),
        }
    }

    fn event_label(&self, node: Option<NodeId>) -> String {
        node.map(|node| self.trace_node_label(node))
            .unwrap_or_else(|| "window".into())
    }

    fn trace_event_done(&mut self, event: &EventState) {
        if !self.trace.wants(TraceCategory::Event) {
            return;
        }
        let target_label = self.event_label(event.target);
        self.trace_event_line(format!(
            "[event] done {} target={} default_prevented={}",
            event.event_type, target_label, event.default_prevented
        ));
    }
}
