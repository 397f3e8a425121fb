use crate::editor::Selection;
use crate::error::Result;
use crate::markers::{self, Marker};

use super::EnhancedTextarea;

/// How far a [`SelectRange`] reaches from its `from` offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Up to an absolute offset.
    To(usize),
    /// A number of characters.
    Length(usize),
    /// Nothing: a caret at `from`.
    Caret,
}

/// Argument of [`TextareaHandle::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectRange {
    pub from: usize,
    pub extent: Extent,
}

impl SelectRange {
    pub const fn to(from: usize, to: usize) -> Self {
        Self {
            from,
            extent: Extent::To(to),
        }
    }

    pub const fn length(from: usize, length: usize) -> Self {
        Self {
            from,
            extent: Extent::Length(length),
        }
    }

    pub const fn caret(from: usize) -> Self {
        Self {
            from,
            extent: Extent::Caret,
        }
    }

    /// The `(start, end)` pair this range resolves to.
    pub const fn bounds(&self) -> (usize, usize) {
        let end = match self.extent {
            Extent::To(to) => to,
            Extent::Length(length) => self.from.saturating_add(length),
            Extent::Caret => self.from,
        };
        (self.from, end)
    }
}

/// The operations an owner may perform on a text area.
///
/// Offsets are character offsets. Every operation taking offsets fails with
/// [`crate::TextareaError::InvalidRange`] instead of clamping.
pub trait TextareaHandle {
    /// The full content.
    fn value(&self) -> String;

    /// Replace the full content and notify the change handler.
    fn set_value(&mut self, value: &str);

    fn selection(&self) -> Selection;

    /// # Errors
    ///
    /// Fails when `start > end` or `end` is past the end of the content.
    fn set_selection(&mut self, start: usize, end: usize) -> Result<()>;

    fn selected_text(&self) -> String;

    /// Text from the start of the current line up to the selection start.
    fn selected_from_line_start(&self) -> String;

    /// Take input focus. No-op when already focused.
    fn focus(&mut self);

    /// Replace `[from, to)` with `text`, leave the caret after it and notify
    /// the change handler.
    ///
    /// # Errors
    ///
    /// Fails when `from > to` or `to` is past the end of the content.
    fn replace_text(&mut self, from: usize, to: usize, text: &str) -> Result<()>;

    /// Wrap the selection in the marker, or unwrap it.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn toggle_marker(&mut self, marker: &Marker) -> Result<()>;

    /// Fence the selection in a block marker on its own lines, or unfence it.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn toggle_multiple_line_marker(&mut self, marker: &Marker) -> Result<()>;

    /// Toggle a line-leading marker on every selected line.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn toggle_line_marker(&mut self, marker: &str) -> Result<()>;

    /// Insert `template` and select it, or remove it when it is selected.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn toggle_template(&mut self, template: &str) -> Result<()>;

    /// Like [`Self::toggle_template`], with the template on its own line.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn toggle_multiple_line_template(&mut self, template: &str) -> Result<()>;

    /// Append to the content and notify the change handler.
    fn append(&mut self, content: &str);

    fn selection_start(&self) -> usize {
        self.selection().start
    }

    fn selection_end(&self) -> usize {
        self.selection().end
    }

    /// Move the selection start; the end follows when it would be passed.
    ///
    /// # Errors
    ///
    /// Fails when `position` is past the end of the content.
    fn set_selection_start(&mut self, position: usize) -> Result<()> {
        let end = self.selection().end.max(position);
        self.set_selection(position, end)
    }

    /// Move the selection end; the start follows when it would be passed.
    ///
    /// # Errors
    ///
    /// Fails when `position` is past the end of the content.
    fn set_selection_end(&mut self, position: usize) -> Result<()> {
        let start = self.selection().start.min(position);
        self.set_selection(start, position)
    }

    /// Replace the selection with `text`.
    ///
    /// # Errors
    ///
    /// Fails only if the current selection is out of range.
    fn replace_selected_text(&mut self, text: &str) -> Result<()> {
        let Selection { start, end } = self.selection();
        self.replace_text(start, end, text)
    }

    /// # Errors
    ///
    /// Fails when the resolved range is reversed or past the end.
    fn select(&mut self, range: SelectRange) -> Result<()> {
        let (start, end) = range.bounds();
        self.set_selection(start, end)
    }

    /// Collapse the selection to a caret at `location`.
    ///
    /// # Errors
    ///
    /// Fails when `location` is past the end of the content.
    fn put_cursor_to(&mut self, location: usize) -> Result<()> {
        self.set_selection(location, location)
    }
}

impl TextareaHandle for EnhancedTextarea {
    fn value(&self) -> String {
        self.buffer.value()
    }

    fn set_value(&mut self, value: &str) {
        self.buffer.set_value(value);
        self.notify_change();
    }

    fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    fn set_selection(&mut self, start: usize, end: usize) -> Result<()> {
        self.buffer.set_selection(start, end)
    }

    fn selected_text(&self) -> String {
        self.buffer.selected_text()
    }

    fn selected_from_line_start(&self) -> String {
        self.buffer.selected_from_line_start()
    }

    fn focus(&mut self) {
        self.buffer.focus();
    }

    fn replace_text(&mut self, from: usize, to: usize, text: &str) -> Result<()> {
        self.buffer.replace(from, to, text)?;
        self.notify_change();
        Ok(())
    }

    fn toggle_marker(&mut self, marker: &Marker) -> Result<()> {
        self.focus();
        let splice = markers::toggle_inline(&self.value(), self.selection(), marker)?;
        self.apply_splice(splice)
    }

    fn toggle_multiple_line_marker(&mut self, marker: &Marker) -> Result<()> {
        self.focus();
        let splice = markers::toggle_block(&self.value(), self.selection(), marker)?;
        self.apply_splice(splice)
    }

    fn toggle_line_marker(&mut self, marker: &str) -> Result<()> {
        self.focus();
        let splice = markers::toggle_lines(
            &self.value(),
            self.selection(),
            marker,
            &self.config.line_markers,
        )?;
        self.apply_splice(splice)
    }

    fn toggle_template(&mut self, template: &str) -> Result<()> {
        self.focus();
        let splice = markers::toggle_template(&self.value(), self.selection(), template)?;
        self.apply_splice(splice)
    }

    fn toggle_multiple_line_template(&mut self, template: &str) -> Result<()> {
        self.focus();
        let splice = markers::toggle_block_template(&self.value(), self.selection(), template)?;
        self.apply_splice(splice)
    }

    fn append(&mut self, content: &str) {
        let mut value = self.buffer.value();
        value.push_str(content);
        self.set_value(&value);
    }
}
