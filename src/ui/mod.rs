//! Terminal UI components.
//!
//! - [`TextareaWidget`]: draws an [`crate::textarea::EnhancedTextarea`]
//! - [`render`]: the editor screen (text area, toast and status bar)

mod render;
mod status;
mod textarea;

pub use render::{render, textarea_area};
pub use textarea::TextareaWidget;
