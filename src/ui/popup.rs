//! Delete confirmation overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::core::view::Escaping;

pub struct ConfirmPopup<'a> {
    pub car_id: &'a str,
}

impl ConfirmPopup<'_> {
    fn question(&self) -> String {
        format!(
            "Delete {}? This cannot be undone.",
            Escaping::Terminal.apply(self.car_id)
        )
    }
}

impl Widget for ConfirmPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let question = self.question();
        let width = u16::try_from(question.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .clamp(30, 60);
        let popup = centered_fixed(width, 7, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(question, Theme::label_style())),
            Line::raw(""),
            Line::from(Span::styled("y: delete  n/Esc: cancel", Theme::dim_style())),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .centered()
            .render(inner, buf);
    }
}

/// Centered rectangle with fixed dimensions, clamped to `area`.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_fixed(40, 7, area), Rect::new(0, 0, 20, 5));
        assert_eq!(centered_fixed(10, 3, area), Rect::new(5, 1, 10, 3));
    }

    #[test]
    fn asks_about_the_car_by_id() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ConfirmPopup { car_id: "C7" }.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|p| buf[p].symbol().to_string())
            .collect();
        assert!(text.contains("Delete C7? This cannot be undone."));
        assert!(text.contains("n/Esc: cancel"));
    }

    #[test]
    fn hostile_or_huge_ids_are_contained() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ConfirmPopup { car_id: "C\x07\x1b]0;x" }.render(area, &mut buf);
        assert!((0..area.height).all(|y| (0..area.width).all(|x| {
            !buf[(x, y)].symbol().chars().any(char::is_control)
        })));

        let huge = "C".repeat(70_000);
        let mut buf = Buffer::empty(area);
        ConfirmPopup { car_id: &huge }.render(area, &mut buf);
    }
}
