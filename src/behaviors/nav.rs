//! Mobile navigation menu open/closed state.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the menu; returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn should_close_on_key(&self, key: &str) -> bool {
        self.open && key == "Escape"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_and_escape() {
        let mut menu = NavMenu::default();
        assert!(!menu.should_close_on_key("Escape"));
        assert!(menu.open());
        assert!(!menu.open());
        assert!(!menu.should_close_on_key("Enter"));
        assert!(menu.should_close_on_key("Escape"));
        menu.close();
        assert!(!menu.is_open());
        assert!(!menu.should_close_on_key("Escape"));
    }
}
