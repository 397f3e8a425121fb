use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear};

use crate::app::Model;

use super::{TextareaWidget, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let editor_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    frame.render_widget(Clear, editor_area);
    let widget = TextareaWidget::new(&model.textarea).block(editor_block(model));
    let textarea_rect = textarea_area(editor_area, widget.preferred_height());
    frame.render_widget(widget, textarea_rect);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

/// Top part of `area` tall enough for `preferred_height`, never more than
/// `area` itself.
pub fn textarea_area(area: Rect, preferred_height: u16) -> Rect {
    Rect {
        height: preferred_height.min(area.height),
        ..area
    }
}

fn editor_block(model: &Model) -> Block<'static> {
    let border_style = if model.textarea.buffer().is_focused() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .title(model.file_name())
        .borders(Borders::ALL)
        .border_style(border_style)
}
