use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::*;
use crate::TextareaError;
use crate::editor::Selection;
use crate::markers::{LineMarkerSet, Marker};

fn textarea(value: &str) -> EnhancedTextarea {
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_default_value(value));
    area.focus();
    area
}

fn list_textarea(value: &str) -> EnhancedTextarea {
    let config = TextareaConfig::default()
        .with_default_value(value)
        .with_line_markers(LineMarkerSet::new(["- ", "1. ", "> "]))
        .with_auto_focus(true);
    EnhancedTextarea::new(config)
}

/// Text area whose change notifications are collected.
fn recording(value: &str) -> (EnhancedTextarea, Rc<RefCell<Vec<String>>>) {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_default_value(value))
        .with_on_change(move |v| sink.borrow_mut().push(v.to_string()));
    area.focus();
    (area, changes)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn bold() -> Marker {
    Marker::symmetric("**", "bold text")
}

// --- Value modes ---

#[test]
fn test_controlled_value_follows_config_updates() {
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_value("123"));
    assert_eq!(area.value(), "123");
    area.sync_config(TextareaConfig::default().with_value("456"));
    assert_eq!(area.value(), "456");
}

#[test]
fn test_default_value_is_applied_once() {
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_default_value("123"));
    assert_eq!(area.value(), "123");
    area.sync_config(TextareaConfig::default().with_default_value("456"));
    assert_eq!(area.value(), "123");
}

#[test]
fn test_sync_config_does_not_fire_change_handler() {
    let changes = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&changes);
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_value("a"))
        .with_on_change(move |_| *sink.borrow_mut() += 1);
    area.sync_config(TextareaConfig::default().with_value("b"));
    assert_eq!(*changes.borrow(), 0);
}

#[test]
fn test_controlled_sync_keeps_selection_when_value_unchanged() {
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_value("hello"));
    area.set_selection(1, 3).unwrap();
    area.sync_config(TextareaConfig::default().with_value("hello"));
    assert_eq!(area.selection(), Selection::new(1, 3));
}

#[test]
fn test_auto_focus() {
    let area = EnhancedTextarea::new(TextareaConfig::default().with_auto_focus(true));
    assert!(area.buffer().is_focused());
    let area = EnhancedTextarea::default();
    assert!(!area.buffer().is_focused());
}

#[test]
fn test_rendered_rows_is_max_of_rows_and_lines() {
    let mut area = textarea("a\nb");
    assert_eq!(area.rendered_rows(), 5);
    area.set_value("1\n2\n3\n4\n5\n6\n7");
    assert_eq!(area.rendered_rows(), 7);
}

// --- Selection & replacement ---

#[test]
fn test_select_start_and_end_then_replace() {
    let (mut area, changes) = recording("AAA*BBBB*CCC");
    area.set_selection_start(4).unwrap();
    area.set_selection_end(8).unwrap();
    assert_eq!(area.selected_text(), "BBBB");

    area.replace_selected_text("GGGG").unwrap();
    assert_eq!(area.value(), "AAA*GGGG*CCC");
    assert_eq!(area.selection(), Selection::caret(8));
    assert_eq!(changes.borrow().as_slice(), ["AAA*GGGG*CCC".to_string()]);

    area.select(SelectRange::to(4, 8)).unwrap();
    assert_eq!(area.selected_text(), "GGGG");
    area.select(SelectRange::length(4, 8)).unwrap();
    assert_eq!(area.selected_text(), "GGGG*CCC");
}

#[test]
fn test_select_length_matches_select_to() {
    let mut area = textarea("0123456789");
    area.select(SelectRange::length(2, 5)).unwrap();
    let by_length = area.selection();
    area.select(SelectRange::to(2, 7)).unwrap();
    assert_eq!(area.selection(), by_length);
}

#[test]
fn test_select_caret_collapses() {
    let mut area = textarea("hello");
    area.select(SelectRange::caret(3)).unwrap();
    assert_eq!(area.selection(), Selection::caret(3));
}

#[test]
fn test_select_past_end_is_invalid_range() {
    let mut area = textarea("hello");
    assert_eq!(
        area.select(SelectRange::length(3, 5)),
        Err(TextareaError::InvalidRange {
            from: 3,
            to: 8,
            len: 5
        })
    );
}

#[test]
fn test_selection_start_setter_drags_end() {
    let mut area = textarea("hello world");
    area.set_selection(1, 3).unwrap();
    area.set_selection_start(6).unwrap();
    assert_eq!(area.selection(), Selection::caret(6));
    area.set_selection_end(2).unwrap();
    assert_eq!(area.selection(), Selection::caret(2));
}

#[test]
fn test_put_cursor_to() {
    let mut area = textarea("hello");
    area.set_selection(0, 5).unwrap();
    area.put_cursor_to(2).unwrap();
    assert_eq!(area.selection(), Selection::caret(2));
    assert!(area.put_cursor_to(6).is_err());
}

#[test]
fn test_replace_text_rejects_reversed_range() {
    let (mut area, changes) = recording("hello");
    assert!(area.replace_text(4, 1, "x").is_err());
    assert_eq!(area.value(), "hello");
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_selected_from_line_start() {
    let mut area = textarea("first\n- second");
    area.put_cursor_to(14).unwrap();
    assert_eq!(area.selected_from_line_start(), "- second");
}

#[test]
fn test_set_value_and_append_notify() {
    let (mut area, changes) = recording("");
    area.set_value("abc");
    area.append("def");
    assert_eq!(area.value(), "abcdef");
    assert_eq!(
        changes.borrow().as_slice(),
        ["abc".to_string(), "abcdef".to_string()]
    );
}

// --- Marker toggles ---

#[test]
fn test_toggle_marker_focuses_and_wraps() {
    let mut area = EnhancedTextarea::new(TextareaConfig::default().with_default_value("x y"));
    area.set_selection(2, 3).unwrap();
    area.toggle_marker(&bold()).unwrap();
    assert!(area.buffer().is_focused());
    assert_eq!(area.value(), "x **y**");
    assert_eq!(area.selected_text(), "y");
}

#[test]
fn test_toggle_marker_twice_round_trips() {
    let (mut area, changes) = recording("some words here");
    area.set_selection(5, 10).unwrap();
    area.toggle_marker(&bold()).unwrap();
    area.toggle_marker(&bold()).unwrap();
    assert_eq!(area.value(), "some words here");
    assert_eq!(area.selection(), Selection::new(5, 10));
    assert_eq!(changes.borrow().len(), 2);
}

#[test]
fn test_toggle_marker_on_caret_inserts_placeholder_then_removes_it() {
    let mut area = textarea("ab");
    area.put_cursor_to(1).unwrap();
    area.toggle_marker(&bold()).unwrap();
    assert_eq!(area.value(), "a**bold text**b");
    assert_eq!(area.selected_text(), "bold text");
    area.toggle_marker(&bold()).unwrap();
    assert_eq!(area.value(), "ab");
    assert_eq!(area.selection(), Selection::caret(1));
}

#[test]
fn test_toggle_multiple_line_marker_round_trips() {
    let mut area = textarea("intro code outro");
    area.set_selection(6, 10).unwrap();
    let fence = Marker::new("```", "```", "code");
    area.toggle_multiple_line_marker(&fence).unwrap();
    assert_eq!(area.value(), "intro \n```\ncode\n```\n outro");
    assert_eq!(area.selected_text(), "code");
    area.toggle_multiple_line_marker(&fence).unwrap();
    assert_eq!(area.value(), "intro  outro");
}

#[test]
fn test_toggle_multiple_line_marker_removes_fence_at_buffer_edges() {
    let fence = Marker::new("```", "```", "code");

    let mut whole = textarea("```\nlet x\n```");
    whole.set_selection(4, 9).unwrap();
    whole.toggle_multiple_line_marker(&fence).unwrap();
    assert_eq!(whole.value(), "let x");
    assert_eq!(whole.selection(), Selection::new(0, 5));

    let mut trailing = textarea("intro\n```\nlet x\n```");
    trailing.set_selection(10, 15).unwrap();
    trailing.toggle_multiple_line_marker(&fence).unwrap();
    assert_eq!(trailing.value(), "introlet x");
    assert_eq!(trailing.selected_text(), "let x");
}

#[test]
fn test_toggle_line_marker_strips_exactly_marker() {
    let mut area = list_textarea("- - item");
    area.put_cursor_to(8).unwrap();
    area.toggle_line_marker("- ").unwrap();
    assert_eq!(area.value(), "- item");
    assert_eq!(area.selection(), Selection::caret(6));
}

#[test]
fn test_toggle_line_marker_switches_list_style() {
    let mut area = list_textarea("1. a\n1. b");
    area.select(SelectRange::to(0, 9)).unwrap();
    area.toggle_line_marker("- ").unwrap();
    assert_eq!(area.value(), "- a\n- b");
}

#[test]
fn test_toggle_templates() {
    let mut area = textarea("ab");
    area.put_cursor_to(1).unwrap();
    area.toggle_template("[x]").unwrap();
    assert_eq!(area.value(), "a[x]b");
    assert_eq!(area.selected_text(), "[x]");
    area.toggle_template("[x]").unwrap();
    assert_eq!(area.value(), "ab");

    area.put_cursor_to(1).unwrap();
    area.toggle_multiple_line_template("---").unwrap();
    assert_eq!(area.value(), "a\n---\nb");
    area.toggle_multiple_line_template("---").unwrap();
    assert_eq!(area.value(), "ab");
}

// --- Keys ---

#[test]
fn test_enter_continues_line_marker() {
    let downs = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&downs);
    let mut area = list_textarea("- item").with_on_key_down(move |_| {
        *sink.borrow_mut() += 1;
        EventFlow::Continue
    });
    area.put_cursor_to(6).unwrap();
    assert_eq!(area.selected_from_line_start(), "- item");

    let outcome = area.handle_key(&key(KeyCode::Enter)).unwrap();
    assert_eq!(outcome, KeyOutcome::Continued);
    assert_eq!(area.value(), "- item\n- ");
    assert_eq!(area.selection(), Selection::caret(9));
    assert_eq!(*downs.borrow(), 0, "intercepted Enter is not forwarded");
}

#[test]
fn test_enter_without_marker_is_forwarded_then_inserts_newline() {
    let downs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&downs);
    let mut area = list_textarea("plain").with_on_key_down(move |k| {
        sink.borrow_mut().push(k.code);
        EventFlow::Continue
    });
    area.put_cursor_to(5).unwrap();
    let outcome = area.handle_key(&key(KeyCode::Enter)).unwrap();
    assert_eq!(outcome, KeyOutcome::Applied);
    assert_eq!(area.value(), "plain\n");
    assert_eq!(downs.borrow().as_slice(), [KeyCode::Enter]);
}

#[test]
fn test_key_down_handler_can_prevent_default() {
    let mut area = textarea("abc").with_on_key_down(|_| EventFlow::PreventDefault);
    area.put_cursor_to(3).unwrap();
    let outcome = area.handle_key(&key(KeyCode::Backspace)).unwrap();
    assert_eq!(outcome, KeyOutcome::Prevented);
    assert_eq!(area.value(), "abc");
}

#[test]
fn test_key_press_handler_sees_printable_keys_only() {
    let presses = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&presses);
    let mut area = textarea("").with_on_key_press(move |k| {
        sink.borrow_mut().push(k.code);
        if k.code == KeyCode::Char('x') {
            EventFlow::PreventDefault
        } else {
            EventFlow::Continue
        }
    });
    area.handle_key(&key(KeyCode::Char('a'))).unwrap();
    area.handle_key(&key(KeyCode::Char('x'))).unwrap();
    area.handle_key(&key(KeyCode::Left)).unwrap();
    assert_eq!(area.value(), "a");
    assert_eq!(
        presses.borrow().as_slice(),
        [KeyCode::Char('a'), KeyCode::Char('x')]
    );
}

#[test]
fn test_typing_fires_change_per_edit() {
    let (mut area, changes) = recording("");
    area.handle_key(&key(KeyCode::Char('h'))).unwrap();
    area.handle_key(&KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT))
        .unwrap();
    area.handle_key(&key(KeyCode::Left)).unwrap();
    assert_eq!(area.value(), "hI");
    assert_eq!(
        changes.borrow().as_slice(),
        ["h".to_string(), "hI".to_string()]
    );
}

#[test]
fn test_unfocused_text_area_ignores_keys() {
    let mut area = EnhancedTextarea::new(TextareaConfig::default());
    let outcome = area.handle_key(&key(KeyCode::Char('a'))).unwrap();
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(area.value(), "");
}

#[test]
fn test_key_release_is_ignored() {
    let mut area = textarea("");
    let mut release = key(KeyCode::Char('a'));
    release.kind = KeyEventKind::Release;
    assert_eq!(area.handle_key(&release).unwrap(), KeyOutcome::Ignored);
    assert_eq!(area.value(), "");
}

#[test]
fn test_ctrl_char_has_no_default() {
    let mut area = textarea("");
    let outcome = area
        .handle_key(&KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL))
        .unwrap();
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(area.value(), "");
}

#[test]
fn test_shift_arrow_then_type_replaces_selection() {
    let mut area = textarea("hello");
    area.put_cursor_to(5).unwrap();
    let shift_left = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
    area.handle_key(&shift_left).unwrap();
    area.handle_key(&shift_left).unwrap();
    assert_eq!(area.selected_text(), "lo");
    area.handle_key(&key(KeyCode::Char('p'))).unwrap();
    assert_eq!(area.value(), "help");
}

#[test]
fn test_paste_inserts_unless_prevented() {
    let mut area = textarea("ab");
    area.put_cursor_to(1).unwrap();
    assert_eq!(area.handle_paste("XY").unwrap(), KeyOutcome::Applied);
    assert_eq!(area.value(), "aXYb");

    let mut area = textarea("ab").with_on_paste(|_| EventFlow::PreventDefault);
    assert_eq!(area.handle_paste("XY").unwrap(), KeyOutcome::Prevented);
    assert_eq!(area.value(), "ab");
}

#[test]
fn test_paste_converts_carriage_returns_to_newlines() {
    let mut area = list_textarea("");
    area.handle_paste("- one\r- two\r\n- three").unwrap();
    assert_eq!(area.value(), "- one\n- two\n- three");
    assert_eq!(area.buffer().line_count(), 3);

    assert_eq!(area.handle_key(&key(KeyCode::Enter)).unwrap(), KeyOutcome::Continued);
    assert_eq!(area.value(), "- one\n- two\n- three\n- ");
}
