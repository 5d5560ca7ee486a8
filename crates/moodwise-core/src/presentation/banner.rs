/// Anything that can display an error message.
pub trait ErrorTarget {
    fn set_text(&mut self, text: &str);
    fn set_visible(&mut self, visible: bool);
}

/// Show `message` in the target and make it visible
pub fn show_error<T: ErrorTarget + ?Sized>(message: &str, target: &mut T) {
    target.set_text(message);
    target.set_visible(true);
}

/// Clear the target's text and hide it
pub fn hide_error<T: ErrorTarget + ?Sized>(target: &mut T) {
    target.set_text("");
    target.set_visible(false);
}

/// Plain error display: a text slot plus a visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner {
    text: String,
    visible: bool,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The text to draw, if the banner is showing
    pub fn render(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }
}

impl ErrorTarget for ErrorBanner {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_error() {
        let mut banner = ErrorBanner::new();
        assert_eq!(banner.render(), None);

        show_error("Title is required", &mut banner);
        assert!(banner.is_visible());
        assert_eq!(banner.render(), Some("Title is required"));
    }

    #[test]
    fn test_hide_error() {
        let mut banner = ErrorBanner::new();
        show_error("Oops", &mut banner);
        hide_error(&mut banner);
        assert!(!banner.is_visible());
        assert_eq!(banner.text(), "");
        assert_eq!(banner.render(), None);
    }

    #[test]
    fn test_show_error_through_trait_object() {
        let mut banner = ErrorBanner::new();
        let target: &mut dyn ErrorTarget = &mut banner;
        show_error("dyn", target);
        assert_eq!(banner.render(), Some("dyn"));
    }
}
