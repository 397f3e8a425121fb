//! Marker toggling rules.
//!
//! Every function here is pure: it inspects the current value and selection
//! and returns a [`Splice`] describing the single replacement that adds or
//! removes the marker. The text area applies the splice and then the
//! requested selection.
//!
//! All offsets are character offsets.

mod lines;

pub use lines::{LineMarkerSet, continuation_marker, toggle_lines};

use crate::editor::Selection;
use crate::error::{Result, check_range};

/// A formatting delimiter pair plus the placeholder inserted when nothing is
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub prefix: String,
    pub suffix: String,
    pub default_text: String,
}

impl Marker {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        default_text: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            default_text: default_text.into(),
        }
    }

    /// A marker whose prefix and suffix are the same string (`**`, `_`, `` ` ``).
    pub fn symmetric(delimiter: &str, default_text: impl Into<String>) -> Self {
        Self::new(delimiter, delimiter, default_text)
    }
}

/// One replacement of `[from, to)` by `text`, followed by an optional
/// selection. Without a selection the caret stays after the inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub from: usize,
    pub to: usize,
    pub text: String,
    pub select: Option<Selection>,
}

/// Wrap the selection in `prefix`/`suffix`, or unwrap it when the markers
/// already surround it.
///
/// # Errors
///
/// Returns [`crate::TextareaError::InvalidRange`] if `selection` does not
/// fit in `value`.
pub fn toggle_inline(value: &str, selection: Selection, marker: &Marker) -> Result<Splice> {
    let chars: Vec<char> = value.chars().collect();
    let Selection { start, end } = selection;
    check_range(start, end, chars.len())?;

    let text = selected_or_default(&chars, selection, &marker.default_text);
    let text_len = text.chars().count();
    let prefix_len = marker.prefix.chars().count();
    let suffix_len = marker.suffix.chars().count();

    let present = start
        .checked_sub(prefix_len)
        .is_some_and(|at| matches_at(&chars, at, &marker.prefix))
        && matches_at(&chars, end, &marker.suffix);

    if present {
        let from = start - prefix_len;
        tracing::debug!(from, prefix = %marker.prefix, "removing inline marker");
        return Ok(unwrap_splice(
            from,
            end + suffix_len,
            text,
            text_len,
            &marker.default_text,
        ));
    }

    tracing::debug!(start, prefix = %marker.prefix, "adding inline marker");
    let inner = start + prefix_len;
    Ok(Splice {
        from: start,
        to: end,
        text: format!("{}{text}{}", marker.prefix, marker.suffix),
        select: Some(Selection::new(inner, inner + text_len)),
    })
}

/// Surround the selection with a fenced block:
/// `\n{prefix}\n{text}\n{suffix}\n`, or remove such a block around it.
///
/// The fences are looked for one character further out than in
/// [`toggle_inline`] to step over their newlines. Removal also takes the
/// newline directly outside each fence when there is one, so a fence at the
/// very start or end of the buffer is still recognised.
///
/// # Errors
///
/// Returns [`crate::TextareaError::InvalidRange`] if `selection` does not
/// fit in `value`.
pub fn toggle_block(value: &str, selection: Selection, marker: &Marker) -> Result<Splice> {
    let chars: Vec<char> = value.chars().collect();
    let Selection { start, end } = selection;
    check_range(start, end, chars.len())?;

    let text = selected_or_default(&chars, selection, &marker.default_text);
    let text_len = text.chars().count();
    let prefix_len = marker.prefix.chars().count();
    let suffix_len = marker.suffix.chars().count();

    let fence_from = start
        .checked_sub(prefix_len + 1)
        .filter(|&at| matches_at(&chars, at, &marker.prefix))
        .filter(|_| matches_at(&chars, end + 1, &marker.suffix));

    if let Some(fence_from) = fence_from {
        let fence_to = end + 1 + suffix_len;
        let from = if fence_from > 0 && chars[fence_from - 1] == '\n' {
            fence_from - 1
        } else {
            fence_from
        };
        let to = if chars.get(fence_to) == Some(&'\n') {
            fence_to + 1
        } else {
            fence_to
        };
        tracing::debug!(from, prefix = %marker.prefix, "removing block marker");
        return Ok(unwrap_splice(from, to, text, text_len, &marker.default_text));
    }

    tracing::debug!(start, prefix = %marker.prefix, "adding block marker");
    let inner = start + prefix_len + 2;
    Ok(Splice {
        from: start,
        to: end,
        text: format!("\n{}\n{text}\n{}\n", marker.prefix, marker.suffix),
        select: Some(Selection::new(inner, inner + text_len)),
    })
}

/// Insert `template` over the selection and select it, or delete it when
/// the selection is exactly the template.
///
/// # Errors
///
/// Returns [`crate::TextareaError::InvalidRange`] if `selection` does not
/// fit in `value`.
pub fn toggle_template(value: &str, selection: Selection, template: &str) -> Result<Splice> {
    let chars: Vec<char> = value.chars().collect();
    let Selection { start, end } = selection;
    check_range(start, end, chars.len())?;

    if slice(&chars, start, end) == template {
        return Ok(Splice {
            from: start,
            to: end,
            text: String::new(),
            select: None,
        });
    }
    Ok(Splice {
        from: start,
        to: end,
        text: template.to_string(),
        select: Some(Selection::new(start, start + template.chars().count())),
    })
}

/// Like [`toggle_template`] but the template sits on its own line: it is
/// inserted as `\n{template}\n`, and removal also takes the newline directly
/// before and after it when they are there.
///
/// # Errors
///
/// Returns [`crate::TextareaError::InvalidRange`] if `selection` does not
/// fit in `value`.
pub fn toggle_block_template(
    value: &str,
    selection: Selection,
    template: &str,
) -> Result<Splice> {
    let chars: Vec<char> = value.chars().collect();
    let Selection { start, end } = selection;
    check_range(start, end, chars.len())?;

    if slice(&chars, start, end) == template {
        let from = if start > 0 && chars[start - 1] == '\n' {
            start - 1
        } else {
            start
        };
        let to = if chars.get(end) == Some(&'\n') {
            end + 1
        } else {
            end
        };
        return Ok(Splice {
            from,
            to,
            text: String::new(),
            select: None,
        });
    }
    Ok(Splice {
        from: start,
        to: end,
        text: format!("\n{template}\n"),
        select: Some(Selection::new(
            start + 1,
            start + 1 + template.chars().count(),
        )),
    })
}

fn unwrap_splice(
    from: usize,
    to: usize,
    text: String,
    text_len: usize,
    default_text: &str,
) -> Splice {
    // Placeholder text leaves together with the markers.
    if text == default_text {
        return Splice {
            from,
            to,
            text: String::new(),
            select: None,
        };
    }
    Splice {
        from,
        to,
        text,
        select: Some(Selection::new(from, from + text_len)),
    }
}

fn selected_or_default(chars: &[char], selection: Selection, default_text: &str) -> String {
    if selection.is_caret() {
        default_text.to_string()
    } else {
        slice(chars, selection.start, selection.end)
    }
}

fn slice(chars: &[char], from: usize, to: usize) -> String {
    chars[from..to].iter().collect()
}

/// Whether `needle` occurs in `chars` starting exactly at `at`.
fn matches_at(chars: &[char], at: usize, needle: &str) -> bool {
    let len = needle.chars().count();
    chars
        .get(at..at + len)
        .is_some_and(|window| window.iter().copied().eq(needle.chars()))
}
