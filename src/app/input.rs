use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};

use crate::app::{App, Message, Model};
use crate::editor::Motion;
use crate::transform::ToolbarAction;

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) if model.import_prompt.is_none() && !model.help_visible => {
                Some(Message::Paste(text.clone()))
            }
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.import_prompt.is_some() {
            return None;
        }

        let panes = crate::ui::split_panes(Rect::new(0, 0, model.width, model.height));
        let pos = Position::new(mouse.column, mouse.row);
        let text_area = crate::ui::editor_text_area(panes.editor, model.editor.line_count());

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if panes.toolbar.contains(pos) {
                    return crate::ui::toolbar_hit(mouse.column - panes.toolbar.x)
                        .map(Message::Toolbar);
                }
                if text_area.contains(pos) {
                    let (line, column) = editor_point(model, text_area, pos);
                    return Some(Message::EditorClick { line, column });
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left)
                if panes.editor.contains(pos) && !text_area.is_empty() =>
            {
                let pos = Position::new(
                    pos.x.clamp(text_area.x, text_area.right().saturating_sub(1)),
                    pos.y.clamp(text_area.y, text_area.bottom().saturating_sub(1)),
                );
                let (line, column) = editor_point(model, text_area, pos);
                Some(Message::EditorDrag { line, column })
            }
            MouseEventKind::ScrollDown if panes.preview.contains(pos) => {
                Some(Message::ScrollPreviewDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if panes.preview.contains(pos) => {
                Some(Message::ScrollPreviewUp(WHEEL_LINES))
            }
            MouseEventKind::ScrollDown if panes.editor.contains(pos) => {
                Some(Message::ScrollEditorDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if panes.editor.contains(pos) => {
                Some(Message::ScrollEditorUp(WHEEL_LINES))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if let Some(typed) = model.import_prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelImport),
                KeyCode::Enter => Some(Message::ConfirmImport),
                KeyCode::Backspace => {
                    let mut next = typed.clone();
                    next.pop();
                    Some(Message::ImportInput(next))
                }
                KeyCode::Char(c) if !ctrl && !alt => {
                    let mut next = typed.clone();
                    next.push(c);
                    Some(Message::ImportInput(next))
                }
                _ => None,
            };
        }

        // Formatting shortcuts and preview scrolling
        if alt && !ctrl {
            return match key.code {
                KeyCode::Char(c) => {
                    ToolbarAction::from_shortcut(c.to_ascii_lowercase()).map(Message::Toolbar)
                }
                KeyCode::Up => Some(Message::ScrollPreviewUp(1)),
                KeyCode::Down => Some(Message::ScrollPreviewDown(1)),
                KeyCode::PageUp => Some(Message::ScrollPreviewUp(model.editor_rows())),
                KeyCode::PageDown => Some(Message::ScrollPreviewDown(model.editor_rows())),
                _ => None,
            };
        }

        if ctrl {
            match key.code {
                KeyCode::Char('o') => return Some(Message::StartImport),
                KeyCode::Char('s') => return Some(Message::Export),
                KeyCode::Char('c') => return Some(Message::Copy),
                KeyCode::Char('t') => return Some(Message::ToggleTheme),
                KeyCode::Char('q') => return Some(Message::Quit),
                KeyCode::Char('a') => return Some(Message::SelectAll),
                _ => {}
            }
        }

        if let Some(motion) = motion_for_key(key.code, ctrl, model.editor_rows()) {
            return Some(if shift {
                Message::ExtendSelection(motion)
            } else {
                Message::MoveCursor(motion)
            });
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc => Some(Message::ClearSelection),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn motion_for_key(code: KeyCode, ctrl: bool, page_rows: usize) -> Option<Motion> {
    let motion = match code {
        KeyCode::Left if ctrl => Motion::WordLeft,
        KeyCode::Right if ctrl => Motion::WordRight,
        KeyCode::Home if ctrl => Motion::BufferStart,
        KeyCode::End if ctrl => Motion::BufferEnd,
        KeyCode::Left => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Home => Motion::LineStart,
        KeyCode::End => Motion::LineEnd,
        KeyCode::PageUp => Motion::PageUp(page_rows.max(1)),
        KeyCode::PageDown => Motion::PageDown(page_rows.max(1)),
        _ => return None,
    };
    Some(motion)
}

/// Buffer line and display column under a point in the editor text area.
fn editor_point(model: &Model, text_area: Rect, pos: Position) -> (usize, usize) {
    let line = model.editor_scroll_offset + usize::from(pos.y - text_area.y);
    let column = model.editor_hscroll + usize::from(pos.x - text_area.x);
    (line, column)
}
