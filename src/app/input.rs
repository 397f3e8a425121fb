use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;

/// Translate a terminal event into a message. Resizes and focus changes
/// yield `None`; the loop redraws after every event anyway.
pub(super) fn handle_event(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(*key),
        Event::Paste(text) => Some(Message::Paste(text.clone())),
        _ => None,
    }
}

/// Application shortcuts first; every other key goes to the text area.
pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let msg = match key.code {
        KeyCode::Char('q') if ctrl => Message::Quit,
        KeyCode::Char('s') if ctrl => Message::Save,
        KeyCode::Char('b') if ctrl => Message::ToggleBold,
        KeyCode::Char('k') if ctrl => Message::ToggleInlineCode,
        KeyCode::Char('l') if ctrl => Message::ToggleBulletList,
        KeyCode::Char('i') if alt => Message::ToggleItalic,
        KeyCode::Char('c') if alt => Message::ToggleCodeBlock,
        KeyCode::Char('o') if alt => Message::ToggleOrderedList,
        KeyCode::Char('q') if alt => Message::ToggleQuote,
        KeyCode::Char('t') if alt => Message::ToggleChecklist,
        _ => Message::Key(key),
    };
    Some(msg)
}
