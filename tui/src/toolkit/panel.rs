//! Panel - A single named screen region

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Text;

/// A named rectangular region of the terminal
pub struct Panel {
    /// Unique name, used for lookups and binding scopes
    pub name: String,
    /// Screen position and size, frame included
    pub bounds: Rect,
    /// Title drawn on the top border (framed panels only)
    pub title: Option<String>,
    /// Whether a border is drawn around the content
    pub frame: bool,
    /// Base style (background/foreground) of the whole panel
    pub style: Style,
    /// Whether long lines wrap instead of being clipped
    pub wrap: bool,
    /// Current content
    content: Text<'static>,
}

impl Panel {
    /// Create an empty, framed panel
    pub fn new(name: &str, bounds: Rect) -> Self {
        Self {
            name: name.to_string(),
            bounds,
            title: None,
            frame: true,
            style: Style::default(),
            wrap: false,
            content: Text::default(),
        }
    }

    /// Drop all content
    pub fn clear(&mut self) {
        self.content = Text::default();
    }

    /// Replace the content
    pub fn set_content(&mut self, content: Text<'static>) {
        self.content = content;
    }

    /// Current content
    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    /// Content without styling, lines joined by `\n`
    pub fn plain_text(&self) -> String {
        super::plain_text(&self.content)
    }

    /// Area available for content (bounds minus the frame)
    pub fn inner(&self) -> Rect {
        if self.frame {
            Rect::new(
                self.bounds.x.saturating_add(1),
                self.bounds.y.saturating_add(1),
                self.bounds.width.saturating_sub(2),
                self.bounds.height.saturating_sub(2),
            )
        } else {
            self.bounds
        }
    }

    /// Visible content size as (width, height)
    pub fn viewport(&self) -> (u16, u16) {
        let inner = self.inner();
        (inner.width, inner.height)
    }

    /// Check if a screen cell is within this panel's bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && x < self.bounds.x + self.bounds.width
            && y >= self.bounds.y
            && y < self.bounds.y + self.bounds.height
    }

    /// Convert a screen cell to viewport coordinates
    ///
    /// Returns `None` for cells on the frame or outside the panel.
    pub fn to_local(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        let inner = self.inner();
        let inside = x >= inner.x
            && x < inner.x + inner.width
            && y >= inner.y
            && y < inner.y + inner.height;
        inside.then(|| (x - inner.x, y - inner.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_viewport() {
        let panel = Panel::new("battlefield", Rect::new(29, 3, 51, 18));
        assert_eq!(panel.viewport(), (49, 16));
        assert_eq!(panel.inner(), Rect::new(30, 4, 49, 16));
    }

    #[test]
    fn test_frameless_viewport() {
        let mut panel = Panel::new("help", Rect::new(0, 22, 80, 2));
        panel.frame = false;
        assert_eq!(panel.viewport(), (80, 2));
    }

    #[test]
    fn test_to_local_excludes_frame() {
        let panel = Panel::new("battlefield", Rect::new(29, 3, 10, 5));
        assert_eq!(panel.to_local(30, 4), Some((0, 0)));
        assert_eq!(panel.to_local(37, 6), Some((7, 2)));
        // Border cells
        assert_eq!(panel.to_local(29, 4), None);
        assert_eq!(panel.to_local(38, 4), None);
        assert_eq!(panel.to_local(30, 7), None);
        // Outside
        assert_eq!(panel.to_local(0, 0), None);
        assert!(panel.contains(29, 3));
        assert!(!panel.contains(39, 3));
    }

    #[test]
    fn test_tiny_framed_panel_has_empty_viewport() {
        let panel = Panel::new("status", Rect::new(0, 0, 1, 1));
        assert_eq!(panel.viewport(), (0, 0));
        assert_eq!(panel.to_local(0, 0), None);
    }
}
