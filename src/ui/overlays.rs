use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::transform::ToolbarAction;

use super::style::Theme;

pub fn render_help_overlay(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let mut lines: Vec<Line> = Vec::new();

    // Formatting
    lines.push(Line::styled("Formatting (toolbar or Alt+key)", theme.section));
    for action in ToolbarAction::ALL {
        lines.push(Line::raw(format!(
            "  Alt+{}               {}",
            action.shortcut().to_ascii_uppercase(),
            action.label()
        )));
    }
    lines.push(Line::raw(""));

    // Editing
    lines.push(Line::styled("Editing", theme.section));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    lines.push(Line::raw("  Shift+movement      Extend selection"));
    lines.push(Line::raw("  Ctrl+A / Esc        Select all / clear selection"));
    lines.push(Line::raw("  Alt+Up/Down         Scroll preview"));
    lines.push(Line::raw(""));

    // Files
    lines.push(Line::styled("Document", theme.section));
    lines.push(Line::raw("  Ctrl+O              Import a file"));
    lines.push(Line::raw("  Ctrl+S              Export document.md"));
    lines.push(Line::raw("  Ctrl+C              Copy document"));
    lines.push(Line::raw("  Ctrl+T              Light / dark theme"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));
    lines.push(Line::raw(""));

    // Config
    lines.push(Line::styled("Config", theme.section));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(format!("  Export to: {}", model.export_dir.display())));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Any key closes", theme.dim));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(theme.popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
