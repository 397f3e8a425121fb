//! The enhanced text area.
//!
//! [`EnhancedTextarea`] owns a [`TextBuffer`], notifies its owner of every
//! content change, and layers the markdown shortcuts from
//! [`crate::markers`] on top of plain editing. Owners drive it through the
//! [`TextareaHandle`] trait, feed it key events with
//! [`EnhancedTextarea::handle_key`] and draw it with
//! [`crate::ui::TextareaWidget`].

mod config;
mod handle;
mod input;

pub use config::{DEFAULT_ROWS, TextareaConfig, ValueMode};
pub use handle::{Extent, SelectRange, TextareaHandle};
pub use input::{EventFlow, KeyOutcome};

use crossterm::event::KeyEvent;

use crate::editor::TextBuffer;
use crate::error::Result;
use crate::markers::Splice;

type ChangeHandler = Box<dyn FnMut(&str)>;
type KeyHandler = Box<dyn FnMut(&KeyEvent) -> EventFlow>;
type PasteHandler = Box<dyn FnMut(&str) -> EventFlow>;

/// A text area with markdown authoring shortcuts.
pub struct EnhancedTextarea {
    config: TextareaConfig,
    buffer: TextBuffer,
    on_change: Option<ChangeHandler>,
    on_key_down: Option<KeyHandler>,
    on_key_press: Option<KeyHandler>,
    on_paste: Option<PasteHandler>,
}

impl EnhancedTextarea {
    /// Create a text area seeded from the configured value.
    pub fn new(config: TextareaConfig) -> Self {
        let mut buffer = TextBuffer::from_text(config.value.initial());
        if config.auto_focus {
            buffer.focus();
        }
        tracing::debug!(
            id = config.id.as_deref(),
            class = config.class_name.as_deref(),
            controlled = config.value.is_controlled(),
            "created text area"
        );
        Self {
            config,
            buffer,
            on_change: None,
            on_key_down: None,
            on_key_press: None,
            on_paste: None,
        }
    }

    /// Called with the full new value after every content change.
    pub fn with_on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Receives key-down events the text area does not intercept itself.
    pub fn with_on_key_down(
        mut self,
        handler: impl FnMut(&KeyEvent) -> EventFlow + 'static,
    ) -> Self {
        self.on_key_down = Some(Box::new(handler));
        self
    }

    /// Receives printable key presses before they are inserted.
    pub fn with_on_key_press(
        mut self,
        handler: impl FnMut(&KeyEvent) -> EventFlow + 'static,
    ) -> Self {
        self.on_key_press = Some(Box::new(handler));
        self
    }

    /// Receives pasted text before it is inserted.
    pub fn with_on_paste(mut self, handler: impl FnMut(&str) -> EventFlow + 'static) -> Self {
        self.on_paste = Some(Box::new(handler));
        self
    }

    pub const fn config(&self) -> &TextareaConfig {
        &self.config
    }

    /// Read-only view of the underlying buffer, for rendering.
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Apply a fresh configuration.
    ///
    /// A controlled value replaces the buffer content whenever it differs
    /// from it. An uncontrolled value is ignored: it was only used at
    /// construction. Neither fires the change handler.
    pub fn sync_config(&mut self, config: TextareaConfig) {
        if let ValueMode::Controlled(value) = &config.value
            && *value != self.buffer.value()
        {
            self.buffer.set_value(value);
        }
        self.config = config;
    }

    /// Rows to draw: the configured minimum or the line count, whichever is
    /// larger.
    pub fn rendered_rows(&self) -> usize {
        self.config.rows.max(self.buffer.line_count())
    }

    pub(crate) fn apply_splice(&mut self, splice: Splice) -> Result<()> {
        self.buffer.replace(splice.from, splice.to, &splice.text)?;
        if let Some(selection) = splice.select {
            self.buffer.set_selection(selection.start, selection.end)?;
        }
        self.notify_change();
        Ok(())
    }

    fn notify_change(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            let value = self.buffer.value();
            handler(&value);
        }
    }
}

impl Default for EnhancedTextarea {
    fn default() -> Self {
        Self::new(TextareaConfig::default())
    }
}

impl std::fmt::Debug for EnhancedTextarea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnhancedTextarea")
            .field("config", &self.config)
            .field("buffer", &self.buffer)
            .field("on_change", &self.on_change.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_key_press", &self.on_key_press.is_some())
            .field("on_paste", &self.on_paste.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
