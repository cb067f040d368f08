//! TUI pane rendering modules
//!
//! - [`form`]: customer details form with inline validation errors
//! - [`records`]: scrollable list of customer records
//! - [`status`]: status bar with keybindings, edit mode and sync indicators
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area and borrowed data; scroll offsets are owned by the caller.

pub mod form;
pub mod records;
pub mod status;

pub use form::{render_form_pane, FormRenderData};
pub use records::{render_records_pane, RecordsRenderData};
pub use status::{render_status_bar, StatusRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by all bordered panes
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
