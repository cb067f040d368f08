//! Customer list pane

use super::border_style;
use crate::record::{format_balance, Record, RecordId};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Rows each record occupies in the list
pub const ROWS_PER_RECORD: usize = 3;

/// Data needed to render the records pane
pub struct RecordsRenderData<'a> {
    pub records: &'a [Record],
    pub selected: usize,
    /// Id of the record currently loaded into the form
    pub editing: Option<&'a RecordId>,
    pub is_focused: bool,
}

/// Adjust `scroll_offset` (in records) so `selected` is on screen
pub fn scroll_to_selected(scroll_offset: &mut usize, selected: usize, visible: usize) {
    let visible = visible.max(1);
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible {
        *scroll_offset = selected + 1 - visible;
    }
}

/// Render the records pane
pub fn render_records_pane(
    frame: &mut Frame,
    area: Rect,
    data: RecordsRenderData,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Customer List ({}) ", data.records.len()))
        .borders(Borders::ALL)
        .border_style(border_style(data.is_focused));

    if data.records.is_empty() {
        *scroll_offset = 0;
        let paragraph = Paragraph::new("(no records)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    let visible_records = (visible_height / ROWS_PER_RECORD).max(1);

    scroll_to_selected(scroll_offset, data.selected, visible_records);

    let items: Vec<ListItem> = data
        .records
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_records)
        .map(|(index, record)| {
            let is_selected = index == data.selected;
            let is_editing = data.editing == Some(&record.id);
            record_item(record, is_selected && data.is_focused, is_editing)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn record_item(record: &Record, highlighted: bool, is_editing: bool) -> ListItem<'static> {
    let label = Style::default().fg(DEFAULT_THEME.label);
    let value = Style::default().fg(DEFAULT_THEME.fg);
    let marker = if is_editing {
        Span::styled("✎ ", Style::default().fg(DEFAULT_THEME.secondary))
    } else {
        Span::raw("  ")
    };

    let lines = vec![
        Line::from(vec![
            marker,
            Span::styled(
                record.name.clone(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  @{}", record.username), label),
            Span::styled(
                format!("  #{}", record.id),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Email: ", label),
            Span::styled(record.email.clone(), value),
            Span::styled("  Phone: ", label),
            Span::styled(record.phone.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("  Balance: ", label),
            Span::styled(
                format_balance(record.balance),
                Style::default().fg(DEFAULT_THEME.success),
            ),
        ]),
    ];

    let item = ListItem::new(lines);
    if highlighted {
        item.style(Style::default().bg(DEFAULT_THEME.selected_bg))
    } else {
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_follows_selection_down() {
        let mut offset = 0;
        scroll_to_selected(&mut offset, 5, 3);
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_scroll_follows_selection_up() {
        let mut offset = 4;
        scroll_to_selected(&mut offset, 1, 3);
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_scroll_unchanged_when_visible() {
        let mut offset = 2;
        scroll_to_selected(&mut offset, 3, 3);
        assert_eq!(offset, 2);
    }
}
