use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::Direction;
use crate::error::Result;
use crate::markers::continuation_marker;

use super::{EnhancedTextarea, TextareaHandle};

/// Returned by owner handlers to let or stop the text area's default
/// handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFlow {
    #[default]
    Continue,
    PreventDefault,
}

/// What became of an event fed to [`EnhancedTextarea::handle_key`] or
/// [`EnhancedTextarea::handle_paste`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter continued a line marker; the plain newline was suppressed.
    Continued,
    /// An owner handler returned [`EventFlow::PreventDefault`].
    Prevented,
    /// The default editing action ran.
    Applied,
    /// Not for the text area: unfocused, a key release, or a key with no
    /// default action.
    Ignored,
}

impl EnhancedTextarea {
    /// Feed one key event.
    ///
    /// Enter on a line that starts with a configured marker inserts a
    /// newline followed by that marker. Any other key goes to the key-down
    /// handler, printable keys then to the key-press handler, and unless
    /// one of them prevents it the default editing action runs.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer selection is out of range.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<KeyOutcome> {
        if !self.buffer.is_focused() || key.kind == KeyEventKind::Release {
            return Ok(KeyOutcome::Ignored);
        }

        if key.code == KeyCode::Enter
            && let Some(marker) = self.continuation()
        {
            tracing::debug!(marker = %marker, "continuing line marker");
            self.replace_selected_text(&format!("\n{marker}"))?;
            return Ok(KeyOutcome::Continued);
        }

        if let Some(handler) = self.on_key_down.as_mut()
            && handler(key) == EventFlow::PreventDefault
        {
            return Ok(KeyOutcome::Prevented);
        }

        if is_printable(key)
            && let Some(handler) = self.on_key_press.as_mut()
            && handler(key) == EventFlow::PreventDefault
        {
            return Ok(KeyOutcome::Prevented);
        }

        Ok(self.apply_default_key(key))
    }

    /// Feed pasted text. `\r\n` and lone `\r` line breaks become `\n`
    /// first. The paste handler may prevent the insertion.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer selection is out of range.
    pub fn handle_paste(&mut self, text: &str) -> Result<KeyOutcome> {
        if !self.buffer.is_focused() {
            return Ok(KeyOutcome::Ignored);
        }
        let text = normalize_line_breaks(text);
        if let Some(handler) = self.on_paste.as_mut()
            && handler(&text) == EventFlow::PreventDefault
        {
            return Ok(KeyOutcome::Prevented);
        }
        self.replace_selected_text(&text)?;
        Ok(KeyOutcome::Applied)
    }

    fn continuation(&self) -> Option<String> {
        let line_head = self.buffer.selected_from_line_start();
        continuation_marker(&line_head, &self.config.line_markers).map(ToOwned::to_owned)
    }

    fn apply_default_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let buf = &mut self.buffer;

        let changed = match key.code {
            KeyCode::Char('a') if ctrl => {
                buf.select_all();
                false
            }
            KeyCode::Char(c) if is_printable(key) => {
                buf.insert_str(c.encode_utf8(&mut [0; 4]));
                true
            }
            KeyCode::Enter => {
                buf.insert_str("\n");
                true
            }
            KeyCode::Backspace => buf.delete_back(),
            KeyCode::Delete => buf.delete_forward(),
            KeyCode::Left if ctrl => {
                buf.move_word_left(shift);
                false
            }
            KeyCode::Right if ctrl => {
                buf.move_word_right(shift);
                false
            }
            KeyCode::Left => {
                buf.move_cursor(Direction::Left, shift);
                false
            }
            KeyCode::Right => {
                buf.move_cursor(Direction::Right, shift);
                false
            }
            KeyCode::Up => {
                buf.move_cursor(Direction::Up, shift);
                false
            }
            KeyCode::Down => {
                buf.move_cursor(Direction::Down, shift);
                false
            }
            KeyCode::Home if ctrl => {
                buf.move_to_start(shift);
                false
            }
            KeyCode::End if ctrl => {
                buf.move_to_end(shift);
                false
            }
            KeyCode::Home => {
                buf.move_home(shift);
                false
            }
            KeyCode::End => {
                buf.move_end(shift);
                false
            }
            _ => return KeyOutcome::Ignored,
        };

        if changed {
            self.notify_change();
        }
        KeyOutcome::Applied
    }
}

/// Terminals may deliver pasted line breaks as `\r` or `\r\n`.
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A character key without Ctrl or Alt.
fn is_printable(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
