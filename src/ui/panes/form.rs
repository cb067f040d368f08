//! Customer details form
//!
//! One row per field with its current draft value, followed by the field's
//! message from the last validation pass (if any). The footer names the save
//! action, which depends on whether a record is being edited.

use super::border_style;
use crate::editor::form::{Field, FormState};
use crate::editor::validate::ErrorState;
use crate::record::Record;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 10;

/// Data needed to render the form pane
pub struct FormRenderData<'a> {
    pub form: &'a FormState,
    pub errors: &'a ErrorState,
    pub editing: Option<&'a Record>,
    /// Field holding keyboard focus, `None` when focus is elsewhere
    pub focused_field: Option<Field>,
}

/// Label of the save action for the current mode
pub fn save_label(editing: bool) -> &'static str {
    if editing {
        "Update Record"
    } else {
        "Add Record"
    }
}

/// Render the form pane
pub fn render_form_pane(frame: &mut Frame, area: Rect, data: FormRenderData) {
    let title = match data.editing {
        Some(record) => format!(" Editing Record {} ", record.id),
        None => " Customer Details ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(data.focused_field.is_some()))
        .padding(Padding::new(1, 1, 1, 0));

    let mut lines: Vec<Line> = Vec::new();

    for field in Field::ALL {
        let is_focused = data.focused_field == Some(field);
        let label_style = if is_focused {
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.label)
        };

        let mut spans = vec![
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
            Span::styled(
                data.form.get(field).to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ];
        if is_focused {
            spans.push(Span::styled(
                "▏",
                Style::default().fg(DEFAULT_THEME.border_focused),
            ));
        }
        lines.push(Line::from(spans));

        // Errors stay until the next submit, even if the value changed
        match data.errors.get(field) {
            Some(message) => lines.push(Line::from(Span::styled(
                format!("{:width$}✗ {}", "", message, width = LABEL_WIDTH),
                Style::default().fg(DEFAULT_THEME.error),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    let key_style = Style::default()
        .bg(DEFAULT_THEME.comment)
        .fg(ratatui::style::Color::Black);
    let mut footer = vec![
        Span::styled(" ↵ ", key_style),
        Span::styled(
            format!(" {} ", save_label(data.editing.is_some())),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if data.editing.is_some() {
        footer.push(Span::raw("  "));
        footer.push(Span::styled(" Esc ", key_style));
        footer.push(Span::styled(
            " cancel ",
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    lines.push(Line::from(footer));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
