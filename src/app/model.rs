use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::textarea::{EnhancedTextarea, TextareaConfig, TextareaHandle};

/// Severity of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The editing surface
    pub textarea: EnhancedTextarea,
    /// File the content is saved to; `None` for a scratch buffer
    pub file_path: Option<PathBuf>,
    /// Set once the loop should exit
    pub should_quit: bool,
    /// First Ctrl+Q on a dirty buffer only warns
    pub quit_confirmed: bool,
    /// Bumped by the text area's change handler on every edit
    revision: Rc<Cell<u64>>,
    saved_revision: u64,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model editing `file_path` with the given text area options.
    pub fn new(file_path: Option<PathBuf>, config: TextareaConfig) -> Self {
        let revision = Rc::new(Cell::new(0));
        let counter = Rc::clone(&revision);
        let textarea =
            EnhancedTextarea::new(config).with_on_change(move |_| counter.set(counter.get() + 1));
        Self {
            textarea,
            file_path,
            should_quit: false,
            quit_confirmed: false,
            revision,
            saved_revision: 0,
            toast: None,
        }
    }

    /// Whether the content changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.revision.get() != self.saved_revision
    }

    /// Display name of the edited file.
    pub fn file_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
    }

    /// One-based line and column of the caret.
    pub fn cursor_position(&self) -> (usize, usize) {
        let buffer = self.textarea.buffer();
        let (line, col) = buffer.line_col(buffer.head());
        (line + 1, col + 1)
    }

    /// Write the content to the model's file.
    pub(super) fn save_to_disk(&mut self) -> Result<PathBuf> {
        let path = self
            .file_path
            .clone()
            .context("No file to save to; start markarea with a FILE argument")?;
        std::fs::write(&path, self.textarea.value())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.saved_revision = self.revision.get();
        tracing::debug!(path = %path.display(), revision = self.saved_revision, "saved");
        Ok(path)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(None, TextareaConfig::default())
    }
}
