//! Labelled input rows for the add-car and rent forms.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::form::FormFields;
use crate::core::view::NO_CARS_AVAILABLE;

use super::theme::Theme;

pub enum RowValue<'a> {
    Text(&'a str),
    /// A selection control.  `None` when there is nothing to choose.
    Choice(Option<&'a str>),
}

pub struct FormRow<'a> {
    pub label: &'a str,
    pub value: RowValue<'a>,
}

/// One row per label of `form`.  Rows without a text buffer show `choice`.
pub fn form_rows<'a, F: FormFields>(form: &'a F, choice: Option<&'a str>) -> Vec<FormRow<'a>> {
    F::LABELS
        .iter()
        .enumerate()
        .map(|(idx, label)| FormRow {
            label: *label,
            value: match form.field(idx) {
                Some(text) => RowValue::Text(text),
                None => RowValue::Choice(choice),
            },
        })
        .collect()
}

pub struct FormWidget<'a> {
    rows: Vec<FormRow<'a>>,
    /// Row holding the cursor; `None` when the form is not focused.
    active: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> FormWidget<'a> {
    pub fn new(rows: Vec<FormRow<'a>>) -> Self {
        Self {
            rows,
            active: None,
            block: None,
        }
    }

    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> Widget for FormWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let is_active = self.active == Some(idx);
                let marker = if is_active { "▸ " } else { "  " };
                let mut spans = vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:<width$} ", row.label, width = label_width),
                        Theme::label_style(),
                    ),
                ];
                match &row.value {
                    RowValue::Text(text) => {
                        spans.push(Span::styled(text.to_string(), Theme::input_style()));
                        if is_active {
                            spans.push(Span::styled("▏", Theme::input_style()));
                        }
                    }
                    RowValue::Choice(Some(label)) => {
                        spans.push(Span::styled(
                            format!("◂ {label} ▸"),
                            Theme::input_style(),
                        ));
                    }
                    RowValue::Choice(None) => {
                        spans.push(Span::styled(NO_CARS_AVAILABLE, Theme::dim_style()));
                    }
                }
                let line = Line::from(spans);
                if is_active {
                    line.style(Theme::selected_style())
                } else {
                    line
                }
            })
            .collect();

        let mut paragraph = Paragraph::new(lines);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
