use super::*;

fn is_submit_control(dom: &Dom, node: NodeId) -> bool {
    let kind = dom
        .attr(node, "type")
        .map(|kind| kind.to_ascii_lowercase());
    if dom.is_tag(node, "button") {
        return kind.is_none_or(|kind| kind == "submit");
    }
    dom.is_tag(node, "input") && kind.as_deref() == Some("submit")
}

impl Page {
    /// Clicks the first match. Disabled controls swallow the click; an
    /// unprevented click on a submit control submits its form.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        let outcome = self.dispatch_event(target, "click", EventDetail::None)?;
        if outcome.default_prevented || !is_submit_control(&self.dom, target) {
            return Ok(());
        }
        if let Some(form) = self.dom.closest(target, "form")? {
            self.dispatch_event(form, "submit", EventDetail::None)?;
        }
        Ok(())
    }

    /// Clicks the `index`-th element matching `selector`, in document order.
    pub fn click_nth(&mut self, selector: &str, index: usize) -> Result<()> {
        let matches = self.dom.query_selector_all(selector)?;
        let Some(target) = matches.get(index).copied() else {
            return Err(Error::SelectorNotFound(format!("{selector} [{index}]")));
        };
        if self.dom.disabled(target) {
            return Ok(());
        }
        self.dispatch_event(target, "click", EventDetail::None)?;
        Ok(())
    }

    /// Replaces the value of an input or textarea and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input", EventDetail::None)?;
        Ok(())
    }

    /// Picks an option of a select by value and fires `input` and `change`.
    pub fn set_select_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !self.dom.is_tag(target, "select") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: self.dom.tag_name(target).unwrap_or("non-element").to_string(),
            });
        }
        if !self.dom.select_option_values(target).iter().any(|option| option == value) {
            return Err(Error::Runtime(format!(
                "select {selector} has no option with value {value:?}"
            )));
        }
        self.dom.set_value(target, value)?;
        self.dispatch_event(target, "input", EventDetail::None)?;
        self.dispatch_event(target, "change", EventDetail::None)?;
        Ok(())
    }

    /// Submits the matched form, or the form owning the matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if let Some(form) = self.dom.closest(target, "form")? {
            self.dispatch_event(form, "submit", EventDetail::None)?;
        }
        Ok(())
    }

    /// Fires `keydown` at the body; it bubbles to the document.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let target = self.dom.body().unwrap_or(self.dom.root);
        self.dispatch_event(target, "keydown", EventDetail::Key(key.to_string()))?;
        Ok(())
    }

    /// Moves the pointer onto the first match. `mouseleave` fires on every
    /// element the pointer left, innermost first, then `mouseenter` on
    /// every element it entered, outermost first.
    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.move_pointer_to(Some(target))
    }

    /// Moves the pointer off the first match onto its parent. Nothing fires
    /// when the pointer is not over the element.
    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.hover_chain(self.window.hovered).contains(&target) {
            return Ok(());
        }
        self.move_pointer_to(self.dom.parent(target))
    }

    /// Moves the pointer over the matched element to viewport coordinates.
    pub fn mouse_move(&mut self, selector: &str, client_x: f64, client_y: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.window.hovered != Some(target) {
            self.move_pointer_to(Some(target))?;
        }
        self.dispatch_event(
            target,
            "mousemove",
            EventDetail::Pointer { client_x, client_y },
        )?;
        Ok(())
    }

    /// `node` and its ancestors, innermost first.
    fn hover_chain(&self, node: Option<NodeId>) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = node;
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.dom.parent(current);
        }
        chain
    }

    fn move_pointer_to(&mut self, next: Option<NodeId>) -> Result<()> {
        let left = self.hover_chain(self.window.hovered);
        let entered = self.hover_chain(next);
        self.window.hovered = next;
        for node in left.iter().filter(|node| !entered.contains(node)) {
            self.dispatch_event(*node, "mouseleave", EventDetail::None)?;
        }
        for node in entered.iter().rev().filter(|node| !left.contains(node)) {
            self.dispatch_event(*node, "mouseenter", EventDetail::None)?;
        }
        Ok(())
    }

    pub fn touch_start(&mut self, selector: &str, screen_x: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "touchstart", EventDetail::Touch { screen_x })?;
        Ok(())
    }

    pub fn touch_end(&mut self, selector: &str, screen_x: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "touchend", EventDetail::Touch { screen_x })?;
        Ok(())
    }

    /// A complete horizontal swipe: touch start then touch end.
    pub fn swipe(&mut self, selector: &str, start_x: f64, end_x: f64) -> Result<()> {
        self.touch_start(selector, start_x)?;
        self.touch_end(selector, end_x)
    }

    /// Scrolls the window and dispatches `scroll`. Offsets below zero clamp
    /// to the top of the page.
    pub fn scroll_window_to(&mut self, y: f64) -> Result<()> {
        if !y.is_finite() {
            return Err(Error::Runtime(format!(
                "scroll_window_to requires a finite offset (y={y})"
            )));
        }
        self.set_window_scroll(y)
    }

    /// Scrolls a horizontally scrolling element and dispatches `scroll` on
    /// it. The offset is clamped to the element's scrollable range.
    pub fn scroll_element_to(&mut self, selector: &str, x: f64) -> Result<()> {
        if !x.is_finite() {
            return Err(Error::Runtime(format!(
                "scroll_element_to requires a finite offset (x={x})"
            )));
        }
        let target = self.select_one(selector)?;
        self.dom.set_scroll_left(target, x)?;
        self.dispatch_event(target, "scroll", EventDetail::None)?;
        Ok(())
    }

    pub(super) fn set_window_scroll(&mut self, y: f64) -> Result<()> {
        self.window.scroll_y = y.max(0.0);
        self.dispatch_window_event("scroll", EventDetail::None)?;
        Ok(())
    }
}
