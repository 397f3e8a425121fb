use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::textarea::EnhancedTextarea;

/// Draws an [`EnhancedTextarea`]: its text in the configured style, the
/// selection highlighted, the caret when focused and the placeholder while
/// empty.
///
/// The view scrolls just enough to keep the caret visible, down to its line
/// and across to its column.
#[derive(Debug, Clone)]
pub struct TextareaWidget<'a> {
    textarea: &'a EnhancedTextarea,
    block: Option<Block<'a>>,
}

impl<'a> TextareaWidget<'a> {
    pub const fn new(textarea: &'a EnhancedTextarea) -> Self {
        Self {
            textarea,
            block: None,
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Height the widget wants: the text area's rendered rows plus the block
    /// borders.
    pub fn preferred_height(&self) -> u16 {
        let rows = u16::try_from(self.textarea.rendered_rows()).unwrap_or(u16::MAX);
        let frame = self
            .block
            .as_ref()
            .map_or(0, |b| 2u16.saturating_sub(b.inner(Rect::new(0, 0, 2, 2)).height));
        rows.saturating_add(frame)
    }

    fn lines(&self, height: usize) -> Vec<Line<'static>> {
        let buf = self.textarea.buffer();
        let config = self.textarea.config();
        let focused = buf.is_focused();

        if buf.is_empty() {
            let mut spans = Vec::new();
            if focused {
                spans.push(Span::styled(" ", caret_style()));
            }
            if let Some(placeholder) = &config.placeholder {
                spans.push(Span::styled(
                    placeholder.clone(),
                    config.style.fg(Color::DarkGray),
                ));
            }
            return vec![Line::from(spans)];
        }

        let selection = buf.selection();
        let (start_line, start_col) = buf.line_col(selection.start);
        let (end_line, end_col) = buf.line_col(selection.end);
        let (head_line, head_col) = buf.line_col(buf.head());
        let first = scroll_offset(head_line, height);
        let last = (first + height).min(buf.line_count());

        (first..last)
            .map(|line_idx| {
                let text: Vec<char> = buf.line_at(line_idx).unwrap_or_default().chars().collect();
                let selected = if selection.is_caret() || line_idx < start_line || line_idx > end_line
                {
                    None
                } else {
                    let from = if line_idx == start_line { start_col } else { 0 };
                    let to = if line_idx == end_line {
                        end_col
                    } else {
                        text.len()
                    };
                    Some((from, to))
                };
                let caret = (focused && line_idx == head_line).then_some(head_col);
                styled_line(&text, config.style, selected, caret)
            })
            .collect()
    }
}

impl Widget for TextareaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let lines = self.lines(inner.height as usize);
        let (_, head_col) = self.textarea.buffer().line_col(self.textarea.buffer().head());
        let x = u16::try_from(scroll_offset(head_col, inner.width as usize)).unwrap_or(u16::MAX);
        let mut paragraph = Paragraph::new(lines)
            .style(self.textarea.config().style)
            .scroll((0, x));
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

/// First row (or column) to draw so that `pos` sits inside a view `extent`
/// cells long.
const fn scroll_offset(pos: usize, extent: usize) -> usize {
    if extent == 0 || pos < extent {
        0
    } else {
        pos + 1 - extent
    }
}

fn caret_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

/// Split one line into plain, selected and caret spans.
fn styled_line(
    text: &[char],
    base: Style,
    selected: Option<(usize, usize)>,
    caret: Option<usize>,
) -> Line<'static> {
    let selection_style = base.bg(Color::DarkGray);
    let style_at = |col: usize| match (caret, selected) {
        (Some(c), _) if c == col => caret_style(),
        (_, Some((from, to))) if col >= from && col < to => selection_style,
        _ => base,
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = base;
    for (col, ch) in text.iter().enumerate() {
        let style = style_at(col);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(*ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if caret.is_some_and(|c| c >= text.len()) {
        spans.push(Span::styled(" ", caret_style()));
    }
    Line::from(spans)
}
