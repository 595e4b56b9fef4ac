use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::tempdir;

use crate::config::ThemeMode;
use crate::editor::Motion;
use crate::persist::{Autosaver, DOCUMENT_KEY, MemoryStorage, Storage};
use crate::transform::{Selection, ToolbarAction};

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, ToastLevel, update};

fn create_test_model(text: &str) -> Model {
    Model::new(text, None, (80, 24))
}

fn create_autosaving_model(text: &str) -> (Model, MemoryStorage) {
    let storage = MemoryStorage::new();
    let saver = Autosaver::spawn(Box::new(storage.clone()), DOCUMENT_KEY).unwrap();
    (Model::new(text, Some(saver), (80, 24)), storage)
}

fn select(mut model: Model, start: usize, end: usize) -> Model {
    model.editor.set_selection(Selection::new(start, end));
    model
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// --- Editing flows through the store ---

#[test]
fn test_typing_updates_store_and_preview() {
    let mut model = create_test_model("");
    for ch in "# Hi".chars() {
        model = update(model, Message::InsertChar(ch));
    }
    assert_eq!(model.store.get(), "# Hi");
    assert_eq!(model.preview().as_str().trim(), "<h1>Hi</h1>");
}

#[test]
fn test_initial_text_is_previewed_without_edit() {
    let model = create_test_model("*x*");
    assert!(model.preview().as_str().contains("<em>x</em>"));
}

#[test]
fn test_backspace_removes_selection_from_store() {
    let model = select(create_test_model("one two"), 3, 7);
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.store.get(), "one");
}

#[test]
fn test_backspace_at_start_leaves_store_alone() {
    let model = create_test_model("abc");
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.store.get(), "abc");
}

#[test]
fn test_paste_replaces_selection() {
    let model = select(create_test_model("hello world"), 6, 11);
    let model = update(model, Message::Paste("there\nfriend".to_string()));
    assert_eq!(model.store.get(), "hello there\nfriend");
    assert_eq!(model.editor.cursor().line, 1);
}

#[test]
fn test_newline_splits_line() {
    let mut model = create_test_model("ab");
    model.editor.move_cursor(Motion::Right);
    let model = update(model, Message::InsertNewline);
    assert_eq!(model.store.get(), "a\nb");
}

// --- Toolbar ---

#[test]
fn test_bold_on_empty_document_leaves_caret_between_markers() {
    let model = create_test_model("");
    let model = update(model, Message::Toolbar(ToolbarAction::Bold));
    assert_eq!(model.store.get(), "****");
    assert_eq!(model.editor.text(), "****");
    assert_eq!(model.editor.selection(), Selection::caret(2));

    let model = update(model, Message::InsertChar('x'));
    assert_eq!(model.store.get(), "**x**");
    assert!(model.preview().as_str().contains("<strong>x</strong>"));
}

#[test]
fn test_italic_wraps_selection_and_keeps_it_selected() {
    let model = select(create_test_model("hello"), 0, 5);
    let model = update(model, Message::Toolbar(ToolbarAction::Italic));
    assert_eq!(model.store.get(), "*hello*");
    assert_eq!(model.editor.selected_text().as_deref(), Some("hello"));
}

#[test]
fn test_bold_twice_nests_markers() {
    let model = select(create_test_model("hello"), 0, 5);
    let model = update(model, Message::Toolbar(ToolbarAction::Bold));
    let model = update(model, Message::Toolbar(ToolbarAction::Bold));
    assert_eq!(model.store.get(), "****hello****");
}

#[test]
fn test_heading_inserts_marker_at_selection_start() {
    let model = select(create_test_model("Title"), 0, 5);
    let model = update(model, Message::Toolbar(ToolbarAction::Heading));
    assert_eq!(model.store.get(), "# Title");
    assert_eq!(model.editor.selected_text().as_deref(), Some("Title"));
}

#[test]
fn test_link_inserts_template_and_collapses_caret() {
    let model = select(create_test_model("see "), 4, 4);
    let model = update(model, Message::Toolbar(ToolbarAction::Link));
    assert_eq!(model.store.get(), "see [Link text](url)");
    assert!(!model.editor.has_selection());
    assert_eq!(model.editor.cursor_offset(), model.store.get().len());
}

#[test]
fn test_code_block_wraps_selection_on_own_lines() {
    let model = select(create_test_model("let x = 1;"), 0, 10);
    let model = update(model, Message::Toolbar(ToolbarAction::CodeBlock));
    assert_eq!(model.store.get(), "```\nlet x = 1;\n```");
    assert!(model.preview().as_str().contains("<pre><code>"));
}

#[test]
fn test_toolbar_on_script_input_previews_safely() {
    let model = select(create_test_model("<script>alert(1)</script>"), 0, 25);
    let model = update(model, Message::Toolbar(ToolbarAction::Blockquote));
    assert!(model.store.get().starts_with("> <script>"));
    assert!(!model.preview().as_str().contains("<script"));
}

// --- Store subscribers ---

#[test]
fn test_edits_reach_autosave_storage() {
    let (model, storage) = create_autosaving_model("");
    let model = update(model, Message::InsertChar('a'));
    let model = update(model, Message::Toolbar(ToolbarAction::Bold));
    model.flush_autosave();
    assert_eq!(storage.get(DOCUMENT_KEY).as_deref(), Some("a****"));
    assert!(model.autosave_enabled());
}

#[test]
fn test_dropping_model_drains_autosave() {
    let (model, storage) = create_autosaving_model("");
    let model = update(model, Message::Paste("last edit".to_string()));
    drop(model);
    assert_eq!(storage.get(DOCUMENT_KEY).as_deref(), Some("last edit"));
}

// --- Startup ---

#[test]
fn test_build_model_restores_saved_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    crate::persist::FileStorage::new(&path)
        .save(DOCUMENT_KEY, "# saved")
        .unwrap();

    let app = App::new(path).with_theme(ThemeMode::Dark);
    let model = app.build_model((80, 24));
    assert_eq!(model.store.get(), "# saved");
    assert_eq!(model.editor.text(), "# saved");
    assert_eq!(model.theme, ThemeMode::Dark);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_build_model_with_corrupt_storage_starts_empty_with_warning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{broken").unwrap();

    let model = App::new(path).build_model((80, 24));
    assert_eq!(model.store.get(), "");
    let (_, level) = model.active_toast().expect("warning toast");
    assert_eq!(level, ToastLevel::Warning);
}

#[test]
fn test_build_model_without_autosave_ignores_storage_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    crate::persist::FileStorage::new(&path)
        .save(DOCUMENT_KEY, "on disk")
        .unwrap();

    let model = App::new(path.clone())
        .with_autosave(false)
        .build_model((80, 24));
    assert_eq!(model.store.get(), "");
    let model = update(model, Message::InsertChar('x'));
    model.flush_autosave();
    drop(model);
    let reread = crate::persist::FileStorage::new(&path).load(DOCUMENT_KEY).unwrap();
    assert_eq!(reread.as_deref(), Some("on disk"));
}

// --- Import / export side effects ---

#[test]
fn test_confirm_import_replaces_document() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, "# Imported").unwrap();

    let mut model = create_test_model("old");
    model = update(model, Message::StartImport);
    model = update(model, Message::ImportInput(file.display().to_string()));
    model = update(model, Message::ConfirmImport);
    App::handle_message_side_effects(&mut model, &Message::ConfirmImport);

    assert_eq!(model.store.get(), "# Imported");
    assert_eq!(model.editor.text(), "# Imported");
    assert!(model.import_prompt.is_none());
    assert!(model.preview().as_str().contains("<h1>Imported</h1>"));
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Info));
}

#[test]
fn test_import_of_unusual_extension_warns_but_loads() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("data.csv");
    std::fs::write(&file, "a,b").unwrap();

    let mut model = create_test_model("");
    model.import_prompt = Some(file.display().to_string());
    App::handle_message_side_effects(&mut model, &Message::ConfirmImport);
    assert_eq!(model.store.get(), "a,b");
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Warning));
}

#[test]
fn test_failed_import_leaves_document_unchanged() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model("keep me");
    model.import_prompt = Some(dir.path().join("missing.md").display().to_string());
    App::handle_message_side_effects(&mut model, &Message::ConfirmImport);

    assert_eq!(model.store.get(), "keep me");
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Error));
}

#[test]
fn test_cancel_import_closes_prompt() {
    let model = update(create_test_model(""), Message::StartImport);
    assert_eq!(model.import_prompt.as_deref(), Some(""));
    let model = update(model, Message::CancelImport);
    assert!(model.import_prompt.is_none());
}

#[test]
fn test_export_writes_document_md() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model("# Out\r\n");
    model.export_dir = dir.path().to_path_buf();
    App::handle_message_side_effects(&mut model, &Message::Export);

    let written = std::fs::read_to_string(dir.path().join("document.md")).unwrap();
    assert_eq!(written, "# Out\r\n");
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Info));
}

#[test]
fn test_export_failure_shows_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("plain.txt");
    std::fs::write(&blocker, "x").unwrap();
    let mut model = create_test_model("x");
    model.export_dir = blocker.join("out");
    App::handle_message_side_effects(&mut model, &Message::Export);
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Error));
}

#[test]
fn test_export_creates_configured_directory() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model("# notes");
    model.export_dir = dir.path().join("notes");
    App::handle_message_side_effects(&mut model, &Message::Export);

    let written = std::fs::read_to_string(dir.path().join("notes").join("document.md")).unwrap();
    assert_eq!(written, "# notes");
}

// --- View state ---

#[test]
fn test_toggle_theme_switches_palette() {
    let model = create_test_model("");
    assert_eq!(model.theme, ThemeMode::Light);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme, ThemeMode::Dark);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme, ThemeMode::Light);
}

#[test]
fn test_toggle_help_changes_visibility() {
    let model = create_test_model("");
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_cursor_stays_visible_when_moving_to_end() {
    let text = (1..=50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let model = create_test_model(&text);
    let model = update(model, Message::MoveCursor(Motion::BufferEnd));
    assert_eq!(model.editor.cursor().line, 49);
    assert_eq!(model.editor_scroll_offset, 49 + 1 - model.editor_rows());

    let model = update(model, Message::MoveCursor(Motion::BufferStart));
    assert_eq!(model.editor_scroll_offset, 0);
}

#[test]
fn test_cursor_at_end_of_long_line_scrolls_horizontally() {
    let model = create_test_model(&"x".repeat(100));
    assert_eq!(model.editor_cols(), 36);

    let model = update(model, Message::MoveCursor(Motion::LineEnd));
    assert_eq!(model.editor_hscroll, 100 + 1 - 36);

    let model = update(model, Message::MoveCursor(Motion::LineStart));
    assert_eq!(model.editor_hscroll, 0);
}

#[test]
fn test_click_after_horizontal_scroll_maps_to_buffer_column() {
    let model = create_test_model(&"x".repeat(100));
    let model = update(model, Message::MoveCursor(Motion::LineEnd));
    let msg = App::handle_mouse(click(3, 2), &model);
    assert_eq!(msg, Some(Message::EditorClick { line: 0, column: 65 }));
}

#[test]
fn test_preview_scroll_counts_wrapped_rows() {
    // "<p>" + 199 chars + "</p>" is 206 columns, six rows of 38.
    let model = create_test_model("word ".repeat(40).trim_end());
    assert_eq!(model.preview_row_count(), 6);
    let model = update(model, Message::ScrollPreviewDown(100));
    assert_eq!(model.preview_scroll, 5);
}

#[test]
fn test_preview_scroll_is_clamped() {
    let model = create_test_model("a\n\nb\n\nc");
    let model = update(model, Message::ScrollPreviewDown(100));
    assert_eq!(model.preview_row_count(), 3);
    assert_eq!(model.preview_scroll, 2);
    let model = update(model, Message::ScrollPreviewUp(100));
    assert_eq!(model.preview_scroll, 0);
}

#[test]
fn test_quit_sets_should_quit() {
    let model = update(create_test_model(""), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_resize_updates_size() {
    let model = update(create_test_model(""), Message::Resize(120, 40));
    assert_eq!((model.width, model.height), (120, 40));
    assert_eq!(model.editor_rows(), 36);
}

#[test]
fn test_toast_lifecycle() {
    let mut model = create_test_model("");
    model.show_toast(ToastLevel::Warning, "autosave failed");
    let (msg, level) = model.active_toast().expect("toast should be set");
    assert_eq!(msg, "autosave failed");
    assert_eq!(level, ToastLevel::Warning);
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

// --- Key mapping ---

#[test]
fn test_alt_shortcuts_map_to_toolbar_actions() {
    let model = create_test_model("");
    for action in ToolbarAction::ALL {
        let msg = App::handle_key(key(KeyCode::Char(action.shortcut()), KeyModifiers::ALT), &model);
        assert_eq!(msg, Some(Message::Toolbar(action)));
    }
}

#[test]
fn test_ctrl_keys_map_to_commands() {
    let model = create_test_model("");
    let cases = [
        ('o', Message::StartImport),
        ('s', Message::Export),
        ('c', Message::Copy),
        ('t', Message::ToggleTheme),
        ('q', Message::Quit),
        ('a', Message::SelectAll),
    ];
    for (c, expected) in cases {
        let msg = App::handle_key(key(KeyCode::Char(c), KeyModifiers::CONTROL), &model);
        assert_eq!(msg, Some(expected));
    }
}

#[test]
fn test_shift_arrow_extends_selection() {
    let model = create_test_model("");
    let msg = App::handle_key(key(KeyCode::Right, KeyModifiers::SHIFT), &model);
    assert_eq!(msg, Some(Message::ExtendSelection(Motion::Right)));
    let msg = App::handle_key(
        key(KeyCode::Left, KeyModifiers::SHIFT | KeyModifiers::CONTROL),
        &model,
    );
    assert_eq!(msg, Some(Message::ExtendSelection(Motion::WordLeft)));
}

#[test]
fn test_plain_keys_edit_and_move() {
    let model = create_test_model("");
    assert_eq!(
        App::handle_key(key(KeyCode::Char('X'), KeyModifiers::SHIFT), &model),
        Some(Message::InsertChar('X'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Home, KeyModifiers::NONE), &model),
        Some(Message::MoveCursor(Motion::LineStart))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::End, KeyModifiers::CONTROL), &model),
        Some(Message::MoveCursor(Motion::BufferEnd))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::PageDown, KeyModifiers::NONE), &model),
        Some(Message::MoveCursor(Motion::PageDown(20)))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Up, KeyModifiers::ALT), &model),
        Some(Message::ScrollPreviewUp(1))
    );
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model("");
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(App::handle_key(release, &model), None);
}

#[test]
fn test_prompt_captures_typing() {
    let mut model = create_test_model("");
    model.import_prompt = Some("notes".to_string());
    assert_eq!(
        App::handle_key(key(KeyCode::Char('b'), KeyModifiers::ALT), &model),
        None
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('.'), KeyModifiers::NONE), &model),
        Some(Message::ImportInput("notes.".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace, KeyModifiers::NONE), &model),
        Some(Message::ImportInput("note".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model),
        Some(Message::ConfirmImport)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::CancelImport)
    );
}

#[test]
fn test_any_key_closes_help() {
    let mut model = create_test_model("");
    model.help_visible = true;
    let msg = App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &model);
    assert_eq!(msg, Some(Message::HideHelp));
}

// --- Mouse mapping ---

#[test]
fn test_click_on_toolbar_label_runs_action() {
    let model = create_test_model("");
    for (action, start, width) in crate::ui::toolbar_buttons() {
        let msg = App::handle_mouse(click(start + width / 2, 0), &model);
        assert_eq!(msg, Some(Message::Toolbar(action)));
    }
    assert_eq!(App::handle_mouse(click(0, 0), &model), None);
}

#[test]
fn test_click_in_editor_places_caret() {
    let model = create_test_model("hello\nworld");
    // Border at x=0, one-digit gutter plus space: text starts at x=3, y=2.
    let msg = App::handle_mouse(click(5, 3), &model);
    assert_eq!(msg, Some(Message::EditorClick { line: 1, column: 2 }));

    let model = update(model, msg.unwrap());
    assert_eq!(model.editor.cursor_offset(), 8);
}

#[test]
fn test_drag_in_editor_extends_selection() {
    let model = create_test_model("hello\nworld");
    let model = update(model, Message::EditorClick { line: 0, column: 1 });
    let model = update(model, Message::EditorDrag { line: 1, column: 2 });
    assert_eq!(model.editor.selected_text().as_deref(), Some("ello\nwo"));
}

#[test]
fn test_wheel_scrolls_pane_under_pointer() {
    let model = create_test_model("");
    let wheel = |column| MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column,
        row: 5,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        App::handle_mouse(wheel(60), &model),
        Some(Message::ScrollPreviewDown(3))
    );
    assert_eq!(
        App::handle_mouse(wheel(10), &model),
        Some(Message::ScrollEditorDown(3))
    );
}

// --- Resize debouncing ---

#[test]
fn test_resize_debouncer_waits_for_quiet_period() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(120, 40, 0);

    assert!(debouncer.take_ready(50).is_none());
    assert_eq!(debouncer.take_ready(100), Some((120, 40)));
}

#[test]
fn test_resize_debouncer_uses_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(120, 40, 0);
    debouncer.queue(140, 50, 20);

    assert!(debouncer.take_ready(80).is_none());
    assert_eq!(debouncer.take_ready(120), Some((140, 50)));
}
