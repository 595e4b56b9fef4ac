use crate::app::{Model, ToastLevel};
use crate::editor::Motion;
use crate::transform::{self, ToolbarAction};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor, replacing any selection
    InsertChar(char),
    /// Insert pasted text at the cursor, replacing any selection
    Paste(String),
    /// Insert a line break (Enter)
    InsertNewline,
    /// Delete the selection or the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the selection or the character at the cursor (Delete)
    DeleteForward,

    // Cursor and selection
    /// Move the cursor, dropping the selection
    MoveCursor(Motion),
    /// Move the cursor while extending the selection (Shift)
    ExtendSelection(Motion),
    /// Place the caret at an editor line and display column (mouse click)
    EditorClick { line: usize, column: usize },
    /// Extend the selection to an editor line and display column (mouse drag)
    EditorDrag { line: usize, column: usize },
    /// Select the whole document
    SelectAll,
    /// Drop the selection
    ClearSelection,

    // Formatting
    /// Apply a toolbar formatting action to the selection
    Toolbar(ToolbarAction),

    // Scrolling
    /// Scroll the editor pane up by n lines
    ScrollEditorUp(usize),
    /// Scroll the editor pane down by n lines
    ScrollEditorDown(usize),
    /// Scroll the preview pane up by n lines
    ScrollPreviewUp(usize),
    /// Scroll the preview pane down by n lines
    ScrollPreviewDown(usize),

    // Files
    /// Open the import prompt
    StartImport,
    /// Update the path typed into the import prompt
    ImportInput(String),
    /// Import the file named in the prompt
    ConfirmImport,
    /// Close the import prompt
    CancelImport,
    /// Export the document to the export directory
    Export,
    /// Copy the document to the clipboard
    Copy,

    // View
    /// Switch between light and dark colors
    ToggleTheme,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

impl Message {
    /// Whether handling this message may move the editor cursor.
    const fn moves_cursor(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::Paste(_)
                | Self::InsertNewline
                | Self::DeleteBack
                | Self::DeleteForward
                | Self::MoveCursor(_)
                | Self::ExtendSelection(_)
                | Self::EditorClick { .. }
                | Self::EditorDrag { .. }
                | Self::SelectAll
                | Self::Toolbar(_)
                | Self::Resize(_, _)
        )
    }
}

/// Pure state transition: apply `msg` to `model`.
///
/// File, clipboard and other I/O happens afterwards in
/// `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    let follow_cursor = msg.moves_cursor();

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.editor.insert_char(ch);
            model.commit_editor();
        }
        Message::Paste(text) => {
            model.editor.insert_str(&text);
            model.commit_editor();
        }
        Message::InsertNewline => {
            model.editor.split_line();
            model.commit_editor();
        }
        Message::DeleteBack => {
            if model.editor.delete_back() {
                model.commit_editor();
            }
        }
        Message::DeleteForward => {
            if model.editor.delete_forward() {
                model.commit_editor();
            }
        }

        // Cursor and selection
        Message::MoveCursor(motion) => model.editor.move_cursor(motion),
        Message::ExtendSelection(motion) => model.editor.extend_selection(motion),
        Message::EditorClick { line, column } => {
            let col = model.editor.col_for_display(line, column);
            model.editor.move_to(line, col);
        }
        Message::EditorDrag { line, column } => {
            let col = model.editor.col_for_display(line, column);
            model.editor.select_to(line, col);
        }
        Message::SelectAll => model.editor.select_all(),
        Message::ClearSelection => model.editor.clear_selection(),

        // Formatting
        Message::Toolbar(action) => apply_toolbar(&mut model, action),

        // Scrolling
        Message::ScrollEditorUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::ScrollEditorDown(n) => {
            let max = model.editor.line_count().saturating_sub(1);
            model.editor_scroll_offset = (model.editor_scroll_offset + n).min(max);
        }
        Message::ScrollPreviewUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        Message::ScrollPreviewDown(n) => {
            let max = model.preview_row_count().saturating_sub(1);
            model.preview_scroll = (model.preview_scroll + n).min(max);
        }

        // Files
        Message::StartImport => {
            model.import_prompt = Some(String::new());
        }
        Message::ImportInput(path) => {
            if model.import_prompt.is_some() {
                model.import_prompt = Some(path);
            }
        }
        Message::CancelImport => {
            model.import_prompt = None;
        }
        // The prompt text is consumed by the import side effect.
        Message::ConfirmImport | Message::Export | Message::Copy => {}

        // View
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
            model.show_toast(
                ToastLevel::Info,
                format!("Theme: {}", model.theme.as_str()),
            );
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }

    if follow_cursor {
        editor_ensure_cursor_visible(&mut model);
    }
    model
}

/// Run a toolbar action against the store's text and the editor selection.
fn apply_toolbar(model: &mut Model, action: ToolbarAction) {
    debug_assert_eq!(model.editor.text(), model.store.get());
    let selection = model.editor.selection();
    match transform::apply(model.store.get(), selection, action.operation()) {
        Ok(out) => {
            tracing::debug!(?action, ?selection, new = ?out.selection, "toolbar action applied");
            model.editor.replace_text(&out.text, out.selection);
            model.store.set(out.text);
        }
        Err(err) => {
            tracing::error!(error = %err, ?action, "editor selection rejected by transformer");
            model.show_toast(ToastLevel::Error, format!("{} failed: {err}", action.label()));
        }
    }
}

/// Ensure the editor cursor is visible in the viewport, vertically and
/// horizontally.
fn editor_ensure_cursor_visible(model: &mut Model) {
    let cursor = model.editor.cursor();
    let visible_height = model.editor_rows();
    if visible_height == 0 {
        model.editor_scroll_offset = cursor.line;
    } else if cursor.line < model.editor_scroll_offset {
        model.editor_scroll_offset = cursor.line;
    } else if cursor.line >= model.editor_scroll_offset + visible_height {
        model.editor_scroll_offset = cursor.line + 1 - visible_height;
    }

    // The caret cell after the last character needs a column too.
    let cursor_col = model.editor.display_col(cursor.line, cursor.col);
    let visible_width = model.editor_cols();
    if visible_width == 0 || cursor_col < model.editor_hscroll {
        model.editor_hscroll = cursor_col;
    } else if cursor_col >= model.editor_hscroll + visible_width {
        model.editor_hscroll = cursor_col + 1 - visible_width;
    }
}
