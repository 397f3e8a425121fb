//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{
    CHECKLIST_TEMPLATE, Message, bold_marker, code_block_marker, inline_code_marker,
    italic_marker, update,
};

use std::path::PathBuf;

use crate::config::ConfigFlags;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Default)]
pub struct App {
    file_path: Option<PathBuf>,
    flags: ConfigFlags,
}

impl App {
    /// Create a new application editing the given file. A file that does
    /// not exist yet is created on the first save.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            flags: ConfigFlags::default(),
        }
    }

    /// Apply merged CLI and config-file flags.
    pub fn with_flags(mut self, flags: ConfigFlags) -> Self {
        self.flags = flags;
        self
    }
}
