use std::collections::HashMap;

use crate::behaviors::counter::{CounterAnimation, CounterTrigger};
use crate::behaviors::form::{EmailPattern, FormData, FormValidator};
use crate::behaviors::nav::NavMenu;
use crate::behaviors::reveal::{HorizontalClip, RevealObserver};
use crate::behaviors::slider::{Autoplay, Slider, SwipeTracker};
use crate::behaviors::strip_loop::StripLoop;
use crate::config::{PageConfig, Viewport};
use crate::dom::{Dom, LayoutBox, NodeId, truncate_chars};
use crate::html::parse_html;
use crate::scheduler::{PendingTimer, SchedulerState, Task};
use crate::trace::{TraceCategory, TraceState};
use crate::{Error, Result};

mod actions;
mod carousel;
mod contact_form;
mod events;
mod inspect;
mod media;
mod navigation;
mod timers;
mod viewport_effects;

use events::{EventDetail, EventState, Handler, ListenerStore};

/// A validated contact-form submission handed to the page's submit collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub submitted_at_ms: i64,
    pub data: FormData,
}

#[derive(Debug, Default)]
struct PlatformMockState {
    alert_messages: Vec<String>,
    submissions: Vec<FormSubmission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Parsed,
    Ready,
    Loaded,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    viewport: Viewport,
    scroll_y: f64,
    /// Innermost element under the pointer.
    hovered: Option<NodeId>,
}

#[derive(Debug, Clone, Copy)]
struct SectionLink {
    section: NodeId,
    link: NodeId,
}

#[derive(Debug, Default)]
struct CounterState {
    stats: Option<NodeId>,
    numbers: Vec<NodeId>,
    trigger: CounterTrigger,
    running: HashMap<usize, CounterAnimation>,
}

#[derive(Debug)]
struct SliderBinding {
    slider: Slider,
    track: NodeId,
    dots: Vec<NodeId>,
    autoplay: Autoplay,
    swipe: SwipeTracker,
}

#[derive(Debug)]
struct StripBinding {
    track: NodeId,
    looping: StripLoop,
    initial_offset_timer: Option<i64>,
}

#[derive(Debug)]
struct FormBinding {
    form: NodeId,
    validator: FormValidator,
    /// Label the submit button had before the confirmation replaced it.
    saved_label: Option<String>,
    reset_timer: Option<i64>,
}

#[derive(Debug, Default)]
struct BehaviorState {
    nav: NavMenu,
    nav_menu: Option<NodeId>,
    header: Option<NodeId>,
    sections: Vec<SectionLink>,
    counters: CounterState,
    slider: Option<SliderBinding>,
    strip: Option<StripBinding>,
    form: Option<FormBinding>,
    reveal: RevealObserver<NodeId>,
    lazy_images: RevealObserver<NodeId>,
    tooltip: Option<NodeId>,
}

/// The landing page: its DOM, its wired behaviors, a virtual clock, and the
/// window it is shown in.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    config: PageConfig,
    email: EmailPattern,
    listeners: ListenerStore,
    scheduler: SchedulerState,
    trace: TraceState,
    platform: PlatformMockState,
    window: WindowState,
    behaviors: BehaviorState,
    lifecycle: Lifecycle,
}

impl Page {
    /// Parses `html` with the default configuration and wires every behavior.
    pub fn from_html(html: &str) -> Result<Self> {
        let mut page = Self::parse(html)?;
        page.ready()?;
        Ok(page)
    }

    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_config(html, PageConfig::default())
    }

    /// Parses the markup without wiring anything, so the host can attach
    /// layout boxes before [`Page::ready`] runs.
    pub fn parse_with_config(html: &str, config: PageConfig) -> Result<Self> {
        config.validate()?;
        let email = EmailPattern::new(&config.email_pattern)?;
        let dom = parse_html(html)?;
        let mut page = Self {
            dom,
            window: WindowState {
                viewport: config.viewport,
                scroll_y: 0.0,
                hovered: None,
            },
            config,
            email,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            trace: TraceState::default(),
            platform: PlatformMockState::default(),
            behaviors: BehaviorState::default(),
            lifecycle: Lifecycle::Parsed,
        };
        // Registered with the page script itself, ahead of DOMContentLoaded.
        page.listeners.add_window("load", Handler::MarkLoaded);
        Ok(page)
    }

    /// Fires DOMContentLoaded: every behavior finds its elements and wires
    /// itself. Behaviors whose markup is absent stay inactive.
    pub fn ready(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Parsed {
            return Err(Error::Runtime("ready() already ran for this page".into()));
        }
        self.lifecycle = Lifecycle::Ready;
        self.trace_event_line("[event] DOMContentLoaded target=document".into());

        self.wire_navigation()?;
        self.wire_header_and_sections()?;
        self.wire_anchor_links()?;
        self.wire_counters()?;
        self.wire_slider()?;
        self.wire_card_strip()?;
        self.wire_contact_form()?;
        self.wire_reveal_on_scroll()?;
        self.wire_video_button()?;
        self.wire_lazy_images()?;
        self.wire_escape_key();
        self.wire_map_tooltip()?;
        Ok(())
    }

    /// Fires the window `load` event, running [`Page::ready`] first if the
    /// host has not.
    pub fn load(&mut self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Loaded => {
                return Err(Error::Runtime("load() already ran for this page".into()));
            }
            Lifecycle::Parsed => self.ready()?,
            Lifecycle::Ready => {}
        }
        self.lifecycle = Lifecycle::Loaded;
        self.dispatch_window_event("load", EventDetail::None)?;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle != Lifecycle::Parsed
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Attaches document-relative geometry to the first element matching
    /// `selector`.
    pub fn set_layout(&mut self, selector: &str, layout: LayoutBox) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.set_layout(target, layout);
        Ok(())
    }

    /// Attaches the same geometry to every element matching `selector`.
    pub fn set_layout_all(&mut self, selector: &str, layout: LayoutBox) -> Result<usize> {
        let targets = self.dom.query_selector_all(selector)?;
        for target in &targets {
            self.dom.set_layout(*target, layout);
        }
        Ok(targets.len())
    }

    pub fn viewport(&self) -> Viewport {
        self.window.viewport
    }

    /// Changes the window size and dispatches `resize`.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(Error::Runtime(format!(
                "resize requires finite non-negative dimensions (width={width}, height={height})"
            )));
        }
        self.window.viewport = Viewport::new(width, height);
        self.dispatch_window_event("resize", EventDetail::None)?;
        Ok(())
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace.logs).into()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_behaviors(&mut self, enabled: bool) {
        self.trace.behaviors = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.log_limit = max_entries;
        self.trace.shrink_to_limit();
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform.alert_messages)
    }

    pub fn take_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform.submissions)
    }

    fn alert(&mut self, message: String) {
        self.trace_behavior_line(format!("[behavior] alert message={message:?}"));
        self.platform.alert_messages.push(message);
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    /// Top and bottom of an element's box in viewport coordinates. `None`
    /// for elements that are not rendered.
    fn viewport_span(&self, node_id: NodeId) -> Option<(f64, f64)> {
        let layout = self.dom.layout(node_id)?;
        let top = layout.top - self.window.scroll_y;
        Some((top, top + layout.height))
    }

    /// Nearest ancestor that scrolls horizontally, per its layout box.
    fn scroll_container(&self, node_id: NodeId) -> Option<NodeId> {
        let mut cursor = self.dom.parent(node_id);
        while let Some(node) = cursor {
            if self
                .dom
                .layout(node)
                .is_some_and(|layout| layout.scroll_width > layout.client_width)
            {
                return Some(node);
            }
            cursor = self.dom.parent(node);
        }
        None
    }

    /// Horizontal placement of an element inside its scroll container.
    /// Full-width boxes (zero width) and elements outside a scroll
    /// container are not clipped horizontally.
    fn horizontal_clip(&self, node_id: NodeId) -> Option<HorizontalClip> {
        let layout = self.dom.layout(node_id).filter(|layout| layout.width > 0.0)?;
        let container = self.scroll_container(node_id)?;
        let frame = self.dom.layout(container)?;
        let left = layout.left - self.dom.scroll_left(container);
        Some(HorizontalClip {
            left,
            right: left + layout.width,
            clip_left: frame.left,
            clip_right: frame.left + frame.client_width,
        })
    }

    fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        if node == self.dom.root {
            return "document".into();
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }

    fn trace_event_line(&mut self, line: String) {
        self.trace.record(TraceCategory::Event, line);
    }

    fn trace_timer_line(&mut self, line: String) {
        self.trace.record(TraceCategory::Timer, line);
    }

    fn trace_behavior_line(&mut self, line: String) {
        self.trace.record(TraceCategory::Behavior, line);
    }
}
