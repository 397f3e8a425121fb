use ratatui::style::Style;

use crate::markers::LineMarkerSet;

/// Minimum number of visible rows when none is configured.
pub const DEFAULT_ROWS: usize = 5;

/// Where the text area's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueMode {
    /// The owner supplies the value and it overrides the buffer on every
    /// [`super::EnhancedTextarea::sync_config`].
    Controlled(String),
    /// The value seeds the buffer once at construction; afterwards the
    /// buffer owns its content.
    Uncontrolled(String),
}

impl ValueMode {
    /// The value used to seed a new buffer.
    pub fn initial(&self) -> &str {
        match self {
            Self::Controlled(value) | Self::Uncontrolled(value) => value,
        }
    }

    pub const fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled(_))
    }
}

impl Default for ValueMode {
    fn default() -> Self {
        Self::Uncontrolled(String::new())
    }
}

/// Options for one text area, fixed at creation and refreshed through
/// [`super::EnhancedTextarea::sync_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextareaConfig {
    /// Identifier attached to log events.
    pub id: Option<String>,
    /// Free-form class tag attached to log events.
    pub class_name: Option<String>,
    /// Base style of the text.
    pub style: Style,
    /// Minimum visible rows. The rendered height is the larger of this and
    /// the current line count.
    pub rows: usize,
    pub value: ValueMode,
    /// Text shown, dimmed, while the buffer is empty.
    pub placeholder: Option<String>,
    /// Take focus on creation.
    pub auto_focus: bool,
    /// Markers recognised by line toggling and Enter continuation.
    pub line_markers: LineMarkerSet,
}

impl Default for TextareaConfig {
    fn default() -> Self {
        Self {
            id: None,
            class_name: None,
            style: Style::default(),
            rows: DEFAULT_ROWS,
            value: ValueMode::default(),
            placeholder: None,
            auto_focus: false,
            line_markers: LineMarkerSet::default(),
        }
    }
}

impl TextareaConfig {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub const fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Owner-controlled value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = ValueMode::Controlled(value.into());
        self
    }

    /// Initial value, applied once.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.value = ValueMode::Uncontrolled(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub const fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn with_line_markers(mut self, line_markers: LineMarkerSet) -> Self {
        self.line_markers = line_markers;
        self
    }
}
