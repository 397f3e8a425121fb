use crossterm::event::KeyEvent;

use crate::app::ToastLevel;
use crate::app::model::Model;
use crate::error::Result;
use crate::markers::Marker;
use crate::textarea::TextareaHandle;

/// Inserted by the checklist toggle.
pub const CHECKLIST_TEMPLATE: &str = "- [ ] ";

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key the app does not bind itself; goes to the text area
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),

    // Inline markers
    ToggleBold,
    ToggleItalic,
    ToggleInlineCode,
    // Block markers
    ToggleCodeBlock,
    ToggleChecklist,
    // Line markers
    ToggleBulletList,
    ToggleOrderedList,
    ToggleQuote,

    /// Write the buffer to its file (performed as a side effect)
    Save,
    /// Quit the application
    Quit,
}

pub fn bold_marker() -> Marker {
    Marker::symmetric("**", "bold text")
}

pub fn italic_marker() -> Marker {
    Marker::symmetric("_", "italic text")
}

pub fn inline_code_marker() -> Marker {
    Marker::symmetric("`", "code")
}

pub fn code_block_marker() -> Marker {
    Marker::new("```", "```", "code")
}

/// Pure function that updates the model based on a message.
///
/// File I/O for [`Message::Save`] happens afterwards in the event loop's
/// side-effect step.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save keeps a pending quit confirmation so Ctrl+S can complete it.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    let result = match msg {
        Message::Key(key) => model.textarea.handle_key(&key).map(drop),
        Message::Paste(text) => model.textarea.handle_paste(&text).map(drop),
        Message::ToggleBold => model.textarea.toggle_marker(&bold_marker()),
        Message::ToggleItalic => model.textarea.toggle_marker(&italic_marker()),
        Message::ToggleInlineCode => model.textarea.toggle_marker(&inline_code_marker()),
        Message::ToggleCodeBlock => model
            .textarea
            .toggle_multiple_line_marker(&code_block_marker()),
        Message::ToggleChecklist => model
            .textarea
            .toggle_multiple_line_template(CHECKLIST_TEMPLATE),
        Message::ToggleBulletList => model.textarea.toggle_line_marker("- "),
        Message::ToggleOrderedList => model.textarea.toggle_line_marker("1. "),
        Message::ToggleQuote => model.textarea.toggle_line_marker("> "),
        Message::Save => Ok(()),
        Message::Quit => {
            quit(&mut model);
            Ok(())
        }
    };
    report(&mut model, result);
    model
}

fn quit(model: &mut Model) {
    if model.is_dirty() && !model.quit_confirmed {
        model.show_toast(
            ToastLevel::Warning,
            "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
        );
        model.quit_confirmed = true;
    } else {
        model.should_quit = true;
    }
}

fn report(model: &mut Model, result: Result<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "edit rejected");
        model.show_toast(ToastLevel::Error, format!("Edit failed: {err}"));
    }
}
