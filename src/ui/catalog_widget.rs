//! Ratatui widget that renders a [`CatalogView`] as a scrolling list of
//! car cards.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::view::{
    Badge, CardAction, CarCard, CatalogBody, CatalogView, Escaping, EMPTY_CATALOG,
};

use super::theme::Theme;

/// Rows per card, including the blank separator.
const CARD_HEIGHT: u16 = 4;

/// Created fresh each frame.
pub struct CatalogWidget<'a> {
    view: Option<&'a CatalogView>,
    selected: usize,
    loading: bool,
    block: Option<Block<'a>>,
}

impl<'a> CatalogWidget<'a> {
    pub fn new(view: Option<&'a CatalogView>) -> Self {
        Self {
            view,
            selected: 0,
            loading: false,
            block: None,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Show a loading line when there is no view yet.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

/// First card index to draw so that `selected` stays on screen.
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

fn card_lines(card: &CarCard, is_selected: bool, width: u16) -> [Line<'static>; 3] {
    let marker = if is_selected { "▸ " } else { "  " };
    let title_width = card.title.chars().count() + marker.chars().count();
    let price_width = card.price.chars().count();
    let gap = (width as usize).saturating_sub(title_width + price_width).max(1);

    let title = Line::from(vec![
        Span::raw(marker),
        Span::styled(card.title.clone(), Theme::car_title_style()),
        Span::raw(" ".repeat(gap)),
        Span::styled(card.price.clone(), Theme::price_style()),
    ]);

    let badge_style = match card.badge {
        Badge::Available => Theme::available_badge_style(),
        Badge::RentedBy(_) => Theme::rented_badge_style(),
    };
    let action_style = match card.action {
        CardAction::Delete => Theme::danger_action_style(),
        CardAction::Return => Theme::ghost_action_style(),
    };
    let meta = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!(" {} ", card.badge.text()), badge_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", card.action.label()), action_style),
    ]);

    let detail = Line::from(Span::styled(
        format!("  {} · {}", Escaping::Terminal.apply(&card.car_id), card.image_url),
        Theme::dim_style(),
    ));

    let mut lines = [title, meta, detail];
    if is_selected {
        for line in &mut lines {
            line.style = Theme::selected_style();
        }
    }
    lines
}

impl<'a> Widget for CatalogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let Some(view) = self.view else {
            if self.loading {
                Paragraph::new(Line::from(Span::styled("Loading…", Theme::dim_style())))
                    .render(inner, buf);
            }
            return;
        };

        let cards = match &view.body {
            CatalogBody::Empty => {
                Paragraph::new(Line::from(Span::styled(EMPTY_CATALOG, Theme::dim_style())))
                    .render(inner, buf);
                return;
            }
            CatalogBody::Cards(cards) => cards,
        };

        let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
        let offset = scroll_offset(self.selected, visible);

        for (row, (idx, card)) in cards.iter().enumerate().skip(offset).take(visible).enumerate() {
            let y = inner.y + row as u16 * CARD_HEIGHT;
            let lines = card_lines(card, idx == self.selected, inner.width);
            for (i, line) in lines.iter().enumerate() {
                let line_y = y + i as u16;
                if line_y >= inner.y + inner.height {
                    return;
                }
                if idx == self.selected {
                    buf.set_style(Rect::new(inner.x, line_y, inner.width, 1), Theme::selected_style());
                }
                buf.set_line(inner.x, line_y, line, inner.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::car::{Car, Snapshot};
    use crate::core::view::RenderOptions;

    fn view(cars: Vec<Car>) -> CatalogView {
        CatalogView::build(
            &Snapshot::new(cars),
            "",
            &RenderOptions {
                escaping: Escaping::Terminal,
                currency: "₹".into(),
            },
        )
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn car(id: &str, available: bool) -> Car {
        Car {
            car_id: id.into(),
            brand: "Tata".into(),
            model: "Nexon".into(),
            price_per_day: 1200.0,
            image_url: "x".into(),
            available,
            rented_by: (!available).then(|| "Asha".to_string()),
        }
    }

    #[test]
    fn renders_card_with_badge_and_action() {
        let view = view(vec![car("C1", true), car("C2", false)]);
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        CatalogWidget::new(Some(&view)).render(area, &mut buf);

        let out = text(&buf);
        assert!(out.contains("Tata Nexon"));
        assert!(out.contains("₹1200/day"));
        assert!(out.contains("Available"));
        assert!(out.contains("[Delete]"));
        assert!(out.contains("Rented by Asha"));
        assert!(out.contains("[Return]"));
    }

    #[test]
    fn renders_empty_state_and_loading() {
        let empty = view(vec![]);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        CatalogWidget::new(Some(&empty)).render(area, &mut buf);
        assert!(text(&buf).contains("No cars found."));

        let mut buf = Buffer::empty(area);
        CatalogWidget::new(None).loading(true).render(area, &mut buf);
        assert!(text(&buf).contains("Loading"));

        let mut buf = Buffer::empty(area);
        CatalogWidget::new(None).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn car_id_control_sequences_are_stripped() {
        let view = view(vec![car("C1\x1b[2J", true)]);
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        CatalogWidget::new(Some(&view)).render(area, &mut buf);

        let out = text(&buf);
        assert!(out.contains("C1[2J"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn price_lines_up_on_the_selected_card() {
        let view = view(vec![car("C1", true), car("C2", true)]);
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        CatalogWidget::new(Some(&view)).selected(0).render(area, &mut buf);

        let last = |y: u16| buf[(area.width - 1, y)].symbol().to_string();
        assert_eq!(last(0), "y");
        assert_eq!(last(4), "y");
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
        assert_eq!(scroll_offset(4, 0), 4);
    }
}
