//! Sync indicator: a spinner and label drawn in the top-right
//! corner of a given area while requests are outstanding.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Drawn over the catalog's top border.  Invisible when `pending` is zero.
pub struct SyncIndicator {
    /// Requests dispatched but not yet applied.
    pub pending: usize,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl SyncIndicator {
    fn label(&self) -> String {
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        if self.pending > 1 {
            format!(" {frame} syncing ×{} ", self.pending)
        } else {
            format!(" {frame} syncing ")
        }
    }
}

impl Widget for SyncIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.pending == 0 || area.width < 16 || area.height == 0 {
            return;
        }

        let label = self.label();
        let label_width = label.chars().count() as u16;
        // Top-right, inside the border corner.
        let x = area.x + area.width.saturating_sub(label_width + 2);

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, area.y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_when_idle() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SyncIndicator { pending: 0, tick: 3 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn shows_count_when_several_requests_overlap() {
        assert_eq!(SyncIndicator { pending: 1, tick: 0 }.label(), " ⠋ syncing ");
        assert_eq!(SyncIndicator { pending: 3, tick: 1 }.label(), " ⠙ syncing ×3 ");
    }
}
