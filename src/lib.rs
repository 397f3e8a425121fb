// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. textarea::TextareaConfig)
    clippy::module_name_repetitions
)]

//! # markarea
//!
//! A terminal text area with markdown authoring shortcuts.
//!
//! The core is [`textarea::EnhancedTextarea`]: a plain multi-line editing
//! surface that can additionally
//! - wrap or unwrap the selection in inline markers (`**bold**`, `` `code` ``)
//! - fence the selection in block markers (```` ``` ````)
//! - toggle line-leading markers (`- `, `1. `, `> `) on every selected line
//! - continue the current line's marker when Enter is pressed
//!
//! Offsets throughout are character offsets, never bytes.
//!
//! ## Architecture
//!
//! The bundled binary hosts the text area using The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Rope-backed text buffer with selection and movement
//! - [`markers`]: Pure marker toggling rules
//! - [`textarea`]: The enhanced text area and its owner-facing handle
//! - [`ui`]: Ratatui widget and editor screen
//! - [`app`]: Host application loop and state
//! - [`config`]: Flag-file configuration

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod markers;
pub mod textarea;
pub mod ui;

pub use error::{Result, TextareaError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{Selection, TextBuffer};
    pub use crate::error::{Result, TextareaError};
    pub use crate::markers::{LineMarkerSet, Marker};
    pub use crate::textarea::{
        EnhancedTextarea, EventFlow, KeyOutcome, SelectRange, TextareaConfig, TextareaHandle,
    };
    pub use crate::ui::TextareaWidget;
}
