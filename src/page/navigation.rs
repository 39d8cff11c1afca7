use super::*;
use crate::behaviors::scroll::{SectionSpan, active_section, anchor_scroll_target, header_scrolled};

impl Page {
    pub(super) fn wire_navigation(&mut self) -> Result<()> {
        self.behaviors.nav_menu = self.dom.by_id("nav-menu");
        if let Some(toggle) = self.dom.by_id("nav-toggle") {
            self.listeners.add(toggle, "click", Handler::OpenMenu);
        }
        if let Some(close) = self.dom.by_id("nav-close") {
            self.listeners.add(close, "click", Handler::CloseMenu);
        }
        for link in self.dom.query_selector_all(".nav__link")? {
            self.listeners.add(link, "click", Handler::CloseMenu);
        }
        Ok(())
    }

    pub(super) fn wire_header_and_sections(&mut self) -> Result<()> {
        self.behaviors.header = self.dom.by_id("header");
        if self.behaviors.header.is_some() {
            self.listeners.add_window("scroll", Handler::HeaderScroll);
        }

        let links = self.dom.query_selector_all(".nav__link")?;
        for section in self.dom.query_selector_all("section[id]")? {
            let Some(id) = self.dom.attr(section, "id") else {
                continue;
            };
            let href = format!("#{id}");
            let link = links
                .iter()
                .copied()
                .find(|link| self.dom.attr(*link, "href").as_deref() == Some(href.as_str()));
            if let Some(link) = link {
                self.behaviors.sections.push(SectionLink { section, link });
            }
        }
        if !self.behaviors.sections.is_empty() {
            self.listeners.add_window("scroll", Handler::HighlightNavLink);
        }
        Ok(())
    }

    pub(super) fn wire_anchor_links(&mut self) -> Result<()> {
        for anchor in self.dom.query_selector_all("a[href^=\"#\"]")? {
            self.listeners.add(anchor, "click", Handler::SmoothScroll);
        }
        Ok(())
    }

    pub(super) fn wire_escape_key(&mut self) {
        let document = self.dom.root;
        self.listeners
            .add(document, "keydown", Handler::CloseMenuOnEscape);
    }

    pub(super) fn open_menu(&mut self) -> Result<()> {
        let Some(menu) = self.behaviors.nav_menu else {
            return Ok(());
        };
        self.behaviors.nav.open();
        self.dom.class_add(menu, "show-menu")?;
        if let Some(body) = self.dom.body() {
            self.dom.style_set(body, "overflow", "hidden")?;
        }
        self.trace_behavior_line("[behavior] nav open".into());
        Ok(())
    }

    pub(super) fn close_menu(&mut self) -> Result<()> {
        let Some(menu) = self.behaviors.nav_menu else {
            return Ok(());
        };
        self.behaviors.nav.close();
        self.dom.class_remove(menu, "show-menu")?;
        if let Some(body) = self.dom.body() {
            self.dom.style_set(body, "overflow", "")?;
        }
        self.trace_behavior_line("[behavior] nav close".into());
        Ok(())
    }

    pub(super) fn close_menu_on_escape(&mut self, event: &EventState) -> Result<()> {
        let EventDetail::Key(key) = &event.detail else {
            return Ok(());
        };
        if self.behaviors.nav.should_close_on_key(key) {
            self.close_menu()?;
        }
        Ok(())
    }

    /// Anchor clicks never navigate. When the fragment names an element the
    /// window scrolls so it sits just below the fixed header.
    pub(super) fn smooth_scroll_to_anchor(&mut self, event: &mut EventState) -> Result<()> {
        event.default_prevented = true;
        let Some(anchor) = event.current_target else {
            return Ok(());
        };
        let href = self.dom.attr(anchor, "href").unwrap_or_default();
        let Some(target) = href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .and_then(|id| self.dom.by_id(id))
        else {
            return Ok(());
        };

        let target_top = self.dom.layout(target).map(|layout| layout.top).unwrap_or(0.0);
        let header_height = self
            .behaviors
            .header
            .and_then(|header| self.dom.layout(header))
            .map(|layout| layout.height)
            .unwrap_or(0.0);
        let top = anchor_scroll_target(target_top, header_height);
        self.trace_behavior_line(format!("[behavior] anchor {href} scroll_to={top}"));
        self.set_window_scroll(top)
    }

    pub(super) fn update_header(&mut self) -> Result<()> {
        let Some(header) = self.behaviors.header else {
            return Ok(());
        };
        let scrolled = header_scrolled(self.window.scroll_y, self.config.header_scroll_threshold);
        self.dom.class_set(header, "scrolled", scrolled)
    }

    /// At most one link is active: the first section, in document order,
    /// whose offset span contains the scroll position.
    pub(super) fn highlight_nav_link(&mut self) -> Result<()> {
        let mut rendered = Vec::new();
        let mut spans = Vec::new();
        for (idx, entry) in self.behaviors.sections.iter().enumerate() {
            if let Some(layout) = self.dom.layout(entry.section) {
                rendered.push(idx);
                spans.push(SectionSpan {
                    top: layout.top,
                    height: layout.height,
                });
            }
        }
        let active = active_section(&spans, self.window.scroll_y, self.config.section_offset)
            .map(|pos| rendered[pos]);

        let sections = self.behaviors.sections.clone();
        for (idx, entry) in sections.iter().enumerate() {
            let on = active == Some(idx);
            if on && !self.dom.class_contains(entry.link, "active") {
                let label = self.trace_node_label(entry.section);
                self.trace_behavior_line(format!("[behavior] nav-link active section={label}"));
            }
            self.dom.class_set(entry.link, "active", on)?;
        }
        Ok(())
    }
}
