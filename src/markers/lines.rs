use crate::editor::Selection;
use crate::error::{Result, check_range};

use super::Splice;

/// Ordered set of line-leading markers (`- `, `> `, `1. `, ...).
///
/// Order decides which marker wins when several match the same line.
/// Duplicates and empty strings are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMarkerSet {
    markers: Vec<String>,
}

impl LineMarkerSet {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for marker in markers {
            set.push(marker.into());
        }
        set
    }

    /// Common markdown list, checklist and quote markers.
    ///
    /// The checklist marker comes before the plain bullet so that it is the
    /// one continued on Enter.
    pub fn markdown() -> Self {
        Self::new(["- [ ] ", "- ", "* ", "+ ", "1. ", "> "])
    }

    /// Add a marker at the end unless it is empty or already present.
    pub fn push(&mut self, marker: String) {
        if !marker.is_empty() && !self.contains(&marker) {
            self.markers.push(marker);
        }
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// First marker, in set order, that `text` starts with.
    pub fn leading_marker(&self, text: &str) -> Option<&str> {
        self.iter().find(|m| text.starts_with(m))
    }
}

impl<S: Into<String>> FromIterator<S> for LineMarkerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Toggle `marker` on every line touched by the selection.
///
/// The span runs from the start of the first selected line to the selection
/// end. Each line independently loses `marker` if it has it, has another
/// marker of `markers` swapped for it, or gets it prepended. Markers are
/// compared as literal prefixes.
///
/// # Errors
///
/// Returns [`crate::TextareaError::InvalidRange`] if `selection` does not
/// fit in `value`.
pub fn toggle_lines(
    value: &str,
    selection: Selection,
    marker: &str,
    markers: &LineMarkerSet,
) -> Result<Splice> {
    let chars: Vec<char> = value.chars().collect();
    let Selection { start, end } = selection;
    check_range(start, end, chars.len())?;

    let first_line_start = chars[..start]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    let span: String = chars[first_line_start..end].iter().collect();

    let others: Vec<&str> = markers.iter().filter(|m| *m != marker).collect();
    let text = span
        .split('\n')
        .map(|line| {
            if let Some(rest) = line.strip_prefix(marker) {
                return rest.to_string();
            }
            if let Some(current) = others.iter().find(|m| line.starts_with(**m)) {
                return format!("{marker}{}", &line[current.len()..]);
            }
            format!("{marker}{line}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(from = first_line_start, to = end, marker, "toggling line marker");
    Ok(Splice {
        from: first_line_start,
        to: end,
        text,
        select: None,
    })
}

/// The marker to repeat on a new line, given the text between the start of
/// the current line and the caret.
pub fn continuation_marker<'a>(line_head: &str, markers: &'a LineMarkerSet) -> Option<&'a str> {
    markers.leading_marker(line_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(value: &str, splice: &Splice) -> String {
        let chars: Vec<char> = value.chars().collect();
        let mut out: String = chars[..splice.from].iter().collect();
        out.push_str(&splice.text);
        out.extend(&chars[splice.to..]);
        out
    }

    fn lists() -> LineMarkerSet {
        LineMarkerSet::new(["- ", "1. ", "> "])
    }

    #[test]
    fn test_set_drops_duplicates_and_empty_markers() {
        let set = LineMarkerSet::new(["- ", "", "> ", "- "]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["- ", "> "]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_from_iterator() {
        let set: LineMarkerSet = vec!["* ".to_string(), "* ".to_string()].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains("* "));
    }

    #[test]
    fn test_prepends_marker_to_unmarked_line() {
        let value = "alpha\nbeta";
        let splice = toggle_lines(value, Selection::caret(8), "- ", &lists()).unwrap();
        assert_eq!(apply(value, &splice), "alpha\n- beta");
        assert_eq!(splice.select, None);
    }

    #[test]
    fn test_strips_marker_from_marked_line() {
        let value = "- alpha";
        let splice = toggle_lines(value, Selection::caret(7), "- ", &lists()).unwrap();
        assert_eq!(apply(value, &splice), "alpha");
    }

    #[test]
    fn test_span_ends_at_selection_end_not_line_end() {
        let value = "alpha beta";
        let splice = toggle_lines(value, Selection::caret(3), "> ", &lists()).unwrap();
        assert_eq!((splice.from, splice.to), (0, 3));
        assert_eq!(apply(value, &splice), "> alpha beta");
    }

    #[test]
    fn test_multi_line_selection_toggles_each_line_independently() {
        let value = "one\n- two\n1. three\nfour";
        let end = value.chars().count();
        let splice = toggle_lines(value, Selection::new(1, end), "- ", &lists()).unwrap();
        assert_eq!(apply(value, &splice), "- one\ntwo\n- three\n- four");
    }

    #[test]
    fn test_other_marker_is_replaced() {
        let value = "> quoted";
        let splice = toggle_lines(value, Selection::caret(8), "1. ", &lists()).unwrap();
        assert_eq!(apply(value, &splice), "1. quoted");
    }

    #[test]
    fn test_first_configured_other_marker_wins() {
        let markers = LineMarkerSet::new(["- ", "- [ ] ", "> "]);
        let value = "- [ ] task";
        let splice = toggle_lines(value, Selection::caret(10), "> ", &markers).unwrap();
        assert_eq!(apply(value, &splice), "> [ ] task");
    }

    #[test]
    fn test_marker_outside_set_still_toggles() {
        let value = "x";
        let splice = toggle_lines(value, Selection::caret(1), "# ", &lists()).unwrap();
        assert_eq!(apply(value, &splice), "# x");
    }

    #[test]
    fn test_continuation_marker_uses_set_order() {
        let markers = LineMarkerSet::markdown();
        assert_eq!(continuation_marker("- [ ] todo", &markers), Some("- [ ] "));
        assert_eq!(continuation_marker("- item", &markers), Some("- "));
        assert_eq!(continuation_marker("plain", &markers), None);
        assert_eq!(continuation_marker("  - indented", &markers), None);
    }
}
