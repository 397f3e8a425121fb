use ropey::Rope;

use crate::error::{Result, check_range};

/// A selected range of the buffer, in character offsets.
///
/// `start <= end` always holds for selections stored in a [`TextBuffer`].
/// A selection with `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width selection at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.is_caret()
    }
}

/// Which end of the selection moves when it is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionDirection {
    /// The caret sits at `end`.
    #[default]
    Forward,
    /// The caret sits at `start`.
    Backward,
}

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// Offsets are character indices into the whole buffer. Line breaks are
/// `\n`. A `\r` just before one belongs to the break rather than the line's
/// text, so End stops in front of it.
pub struct TextBuffer {
    rope: Rope,
    selection: Selection,
    direction: SelectionDirection,
    focused: bool,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl TextBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            direction: SelectionDirection::Forward,
            focused: false,
            col_memory: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn value(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole content. The caret moves to the end of the new text.
    pub fn set_value(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.set_caret(self.rope.len_chars());
    }

    /// Buffer length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn selection_direction(&self) -> SelectionDirection {
        self.direction
    }

    /// Select `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextareaError::InvalidRange`] when `start > end` or
    /// `end` is past the end of the buffer.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Result<()> {
        check_range(start, end, self.len_chars())?;
        self.selection = Selection::new(start, end);
        self.direction = SelectionDirection::Forward;
        self.col_memory = None;
        Ok(())
    }

    /// The caret position: the moving end of the selection.
    pub const fn head(&self) -> usize {
        match self.direction {
            SelectionDirection::Forward => self.selection.end,
            SelectionDirection::Backward => self.selection.start,
        }
    }

    /// The fixed end of the selection.
    const fn anchor(&self) -> usize {
        match self.direction {
            SelectionDirection::Forward => self.selection.start,
            SelectionDirection::Backward => self.selection.end,
        }
    }

    pub const fn focus(&mut self) {
        self.focused = true;
    }

    pub const fn blur(&mut self) {
        self.focused = false;
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Text covered by the selection.
    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// Text from the start of the selection's line up to the selection start.
    pub fn selected_from_line_start(&self) -> String {
        let start = self.selection.start;
        let line_start = self.line_start(start);
        self.rope.slice(line_start..start).to_string()
    }

    /// Offset of the first character of the line containing `pos`.
    pub fn line_start(&self, pos: usize) -> usize {
        self.rope.line_to_char(self.rope.char_to_line(pos))
    }

    /// Splice `text` over `[from, to)` and leave a caret after it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TextareaError::InvalidRange`] when the range is
    /// reversed or runs past the end of the buffer.
    pub fn replace(&mut self, from: usize, to: usize, text: &str) -> Result<()> {
        check_range(from, to, self.len_chars())?;
        if from < to {
            self.rope.remove(from..to);
        }
        if !text.is_empty() {
            self.rope.insert(from, text);
        }
        self.set_caret(from + text.chars().count());
        Ok(())
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing `\n` or `\r\n`).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(
            line.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Line and column (both zero-based, column in chars) of an offset.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.len_chars());
        let line = self.rope.char_to_line(pos);
        (line, pos - self.rope.line_to_char(line))
    }

    // --- Default editing behaviour ---

    /// Insert text over the selection (typing, pasting).
    pub fn insert_str(&mut self, s: &str) {
        let Selection { start, end } = self.selection;
        if start == end && s.is_empty() {
            return;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, s);
        self.set_caret(start + s.chars().count());
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let Selection { start, end } = self.selection;
        if start != end {
            self.rope.remove(start..end);
            self.set_caret(start);
            return true;
        }
        if start == 0 {
            return false;
        }
        self.rope.remove(start - 1..start);
        self.set_caret(start - 1);
        true
    }

    /// Delete the selection, or the character after the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let Selection { start, end } = self.selection;
        if start != end {
            self.rope.remove(start..end);
            self.set_caret(start);
            return true;
        }
        if start >= self.len_chars() {
            return false;
        }
        self.rope.remove(start..=start);
        self.set_caret(start);
        true
    }

    /// Move the caret, or extend the selection when `extend` is set.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend),
            Direction::Up => self.move_vertical(-1, extend),
            Direction::Down => self.move_vertical(1, extend),
        }
    }

    /// Move to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let target = self.line_start(self.head());
        self.move_head(target, extend);
    }

    /// Move to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.head());
        let target = self.rope.line_to_char(line) + self.line_len(line);
        self.move_head(target, extend);
    }

    /// Move one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let mut idx = self.head();
        while idx > 0 && !is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        self.move_head(idx, extend);
    }

    /// Move one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let len = self.len_chars();
        let mut idx = self.head();
        while idx < len && is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        while idx < len && !is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        self.move_head(idx, extend);
    }

    /// Move to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.move_head(0, extend);
    }

    /// Move to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.move_head(self.len_chars(), extend);
    }

    /// Select the whole buffer (Ctrl+A).
    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len_chars());
        self.direction = SelectionDirection::Forward;
        self.col_memory = None;
    }

    // --- Private helpers ---

    const fn set_caret(&mut self, pos: usize) {
        self.selection = Selection::caret(pos);
        self.direction = SelectionDirection::Forward;
        self.col_memory = None;
    }

    fn move_head(&mut self, pos: usize, extend: bool) {
        self.place_head(pos, extend);
        self.col_memory = None;
    }

    const fn place_head(&mut self, pos: usize, extend: bool) {
        if extend {
            let anchor = self.anchor();
            if pos < anchor {
                self.selection = Selection::new(pos, anchor);
                self.direction = SelectionDirection::Backward;
            } else {
                self.selection = Selection::new(anchor, pos);
                self.direction = SelectionDirection::Forward;
            }
        } else {
            self.selection = Selection::caret(pos);
            self.direction = SelectionDirection::Forward;
        }
    }

    fn move_left(&mut self, extend: bool) {
        if !extend && !self.selection.is_caret() {
            self.move_head(self.selection.start, false);
            return;
        }
        let head = self.head();
        self.move_head(head.saturating_sub(1), extend);
    }

    fn move_right(&mut self, extend: bool) {
        if !extend && !self.selection.is_caret() {
            self.move_head(self.selection.end, false);
            return;
        }
        let head = self.head();
        self.move_head((head + 1).min(self.len_chars()), extend);
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let (line, col) = self.line_col(self.head());
        let Some(target_line) = line.checked_add_signed(delta) else {
            return;
        };
        if target_line >= self.line_count() {
            return;
        }
        let want = self.col_memory.unwrap_or(col);
        let target = self.rope.line_to_char(target_line) + want.min(self.line_len(target_line));
        self.place_head(target, extend);
        self.col_memory = Some(want);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection)
            .field("direction", &self.direction)
            .field("focused", &self.focused)
            .finish()
    }
}
