use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style::Theme;

pub fn render_import_prompt(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let typed = model.import_prompt.as_deref().unwrap_or_default();
    let text = format!(" Import file: {typed}\u{2588}  Enter: import  Esc: cancel");
    let bar = Paragraph::new(text).style(theme.prompt);
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let cursor = model.editor.cursor();
    let col = model.editor.display_col(cursor.line, cursor.col);
    let chars = model.store.get().chars().count();

    let selection = model.editor.selection();
    let selection_info = if selection.is_empty() {
        String::new()
    } else {
        format!("  [{} selected]", selection.len())
    };
    let autosave = if model.autosave_enabled() {
        "autosave"
    } else {
        "not saved"
    };

    let status = format!(
        " markpad  Ln {}, Col {}  {} chars{}  [{}]  [{}]  F1:help",
        cursor.line + 1,
        col + 1,
        chars,
        selection_info,
        autosave,
        model.theme.as_str()
    );

    let status_bar = Paragraph::new(status).style(theme.status);
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
