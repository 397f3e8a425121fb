//! Editable text primitive backing the text area.
//!
//! Provides a rope-backed text buffer with a character-offset selection,
//! focus state and the default editing keys of a plain text area.

mod buffer;

pub use buffer::{Direction, Selection, SelectionDirection, TextBuffer};
