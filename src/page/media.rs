use super::*;
use crate::behaviors::tooltip::{px, tooltip_position};

impl Page {
    pub(super) fn wire_video_button(&mut self) -> Result<()> {
        if let Some(button) = self.dom.query_selector(".video-play-btn")? {
            self.listeners.add(button, "click", Handler::VideoNotice);
        }
        Ok(())
    }

    pub(super) fn wire_map_tooltip(&mut self) -> Result<()> {
        let states = self.dom.query_selector_all(".us-map__state")?;
        let Some(tooltip) = self.dom.by_id("map-tooltip") else {
            return Ok(());
        };
        if states.is_empty() {
            return Ok(());
        }
        self.behaviors.tooltip = Some(tooltip);
        for state in states {
            self.listeners.add(state, "mouseenter", Handler::ShowStateName);
            self.listeners.add(state, "mousemove", Handler::MoveTooltip);
            self.listeners.add(state, "mouseleave", Handler::HideTooltip);
        }
        Ok(())
    }

    pub(super) fn show_state_name(&mut self, event: &EventState) -> Result<()> {
        let (Some(tooltip), Some(state)) = (self.behaviors.tooltip, event.current_target) else {
            return Ok(());
        };
        let Some(name) = self
            .dom
            .attr(state, "data-name")
            .filter(|name| !name.is_empty())
        else {
            return Ok(());
        };
        self.dom.set_text_content(tooltip, &name)?;
        self.dom.class_add(tooltip, "visible")
    }

    /// Places the tooltip next to the pointer, relative to the map container.
    pub(super) fn move_tooltip(&mut self, event: &EventState) -> Result<()> {
        let (Some(tooltip), Some(state)) = (self.behaviors.tooltip, event.current_target) else {
            return Ok(());
        };
        let EventDetail::Pointer { client_x, client_y } = event.detail else {
            return Ok(());
        };
        let Some(container) = self.dom.closest(state, ".commits-map__container")? else {
            return Ok(());
        };
        // Unrendered containers report an all-zero rect.
        let (left, top) = self
            .dom
            .layout(container)
            .map(|layout| (layout.left, layout.top - self.window.scroll_y))
            .unwrap_or((0.0, 0.0));
        let (x, y) = tooltip_position(
            client_x,
            client_y,
            left,
            top,
            self.config.tooltip_offset_x,
            self.config.tooltip_offset_y,
        );
        self.dom.style_set(tooltip, "left", &px(x))?;
        self.dom.style_set(tooltip, "top", &px(y))
    }

    pub(super) fn hide_tooltip(&mut self) -> Result<()> {
        let Some(tooltip) = self.behaviors.tooltip else {
            return Ok(());
        };
        self.dom.class_remove(tooltip, "visible")
    }

    pub(super) fn mark_loaded(&mut self) -> Result<()> {
        if let Some(body) = self.dom.body() {
            self.dom.class_add(body, "loaded")?;
        }
        Ok(())
    }
}
