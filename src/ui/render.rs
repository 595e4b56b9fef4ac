use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Model;
use crate::editor::{Cursor, char_width};
use crate::transform::{Selection, ToolbarAction};

use super::style::Theme;
use super::{EDITOR_WIDTH_PERCENT, PREVIEW_WIDTH_PERCENT, overlays, status};

/// Screen regions of the main layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub toolbar: Rect,
    /// Editor pane including its border
    pub editor: Rect,
    /// Preview pane including its border
    pub preview: Rect,
    /// Status bar, prompt or toast
    pub bottom: Rect,
}

pub fn split_panes(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(rows[1]);
    Panes {
        toolbar: rows[0],
        editor: columns[0],
        preview: columns[1],
        bottom: rows[2],
    }
}

/// Text rows inside either pane for a terminal of `total_height` rows.
pub const fn pane_text_height(total_height: u16) -> u16 {
    // toolbar + bottom bar + two border rows
    total_height.saturating_sub(4)
}

/// Where editor text is drawn: the pane interior right of the gutter.
pub fn editor_text_area(editor_pane: Rect, line_count: usize) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(editor_pane);
    let gutter = line_number_width(line_count) + 1;
    Rect {
        x: inner.x.saturating_add(gutter),
        width: inner.width.saturating_sub(gutter),
        ..inner
    }
}

/// Start column and width of each toolbar button, left to right.
pub fn toolbar_buttons() -> Vec<(ToolbarAction, u16, u16)> {
    let mut x = 1;
    ToolbarAction::ALL
        .iter()
        .map(|&action| {
            let width = u16::try_from(action.label().len()).unwrap_or(u16::MAX) + 2;
            let button = (action, x, width);
            x += width + 1;
            button
        })
        .collect()
}

/// The toolbar button drawn at `column` of the toolbar row, if any.
pub fn toolbar_hit(column: u16) -> Option<ToolbarAction> {
    toolbar_buttons()
        .into_iter()
        .find(|&(_, start, width)| column >= start && column < start + width)
        .map(|(action, _, _)| action)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::for_mode(model.theme);
    let panes = split_panes(area);

    frame.render_widget(Block::default().style(theme.base), area);
    render_toolbar(&theme, frame, panes.toolbar);
    render_editor(model, &theme, frame, panes.editor);
    render_preview(model, &theme, frame, panes.preview);

    if model.import_prompt.is_some() {
        status::render_import_prompt(model, &theme, frame, panes.bottom);
    } else if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, panes.bottom);
    } else {
        status::render_status_bar(model, &theme, frame, panes.bottom);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, &theme, frame, area);
    }
}

fn render_toolbar(theme: &Theme, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (action, _, _) in toolbar_buttons() {
        spans.push(Span::styled(format!(" {} ", action.label()), theme.button));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(" Alt+key formats \u{b7} F1 help", theme.dim));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.toolbar), area);
}

fn render_editor(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Markdown ")
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buf = &model.editor;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let selection = buf.selection();
    let cursor = buf.cursor();

    let visible_height = inner.height as usize;
    let start = model.editor_scroll_offset;
    let end = (start + visible_height).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_start = buf.offset_of(Cursor::at(line_idx, 0));
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, theme.gutter)];
        let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
        spans.extend(editor_line_spans(
            &line_text,
            line_start,
            selection,
            cursor_col,
            model.editor_hscroll,
            theme,
        ));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, inner);
    frame.render_widget(Paragraph::new(content).style(theme.base), inner);
}

/// Spans for one editor line with the selection and cursor cell styled,
/// starting at display column `hscroll`.
fn editor_line_spans(
    text: &str,
    line_start: usize,
    selection: Selection,
    cursor_col: Option<usize>,
    hscroll: usize,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let selected = |offset: usize| offset >= selection.start && offset < selection.end;

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = theme.base;
    let mut display = 0;
    for (col, ch) in text.char_indices() {
        let scrolled_past = display < hscroll;
        display += char_width(ch);
        if scrolled_past {
            continue;
        }
        let style = if cursor_col == Some(col) {
            theme.cursor
        } else if selected(line_start + col) {
            theme.selection
        } else {
            theme.base
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(if ch.is_control() { ' ' } else { ch });
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    // Cursor past the last character, or a selected line break.
    if display < hscroll {
        return spans;
    }
    let line_end = line_start + text.len();
    if cursor_col.is_some_and(|col| col >= text.len()) {
        spans.push(Span::styled(" ", theme.cursor));
    } else if selected(line_end) {
        spans.push(Span::styled(" ", theme.selection));
    }
    spans
}

fn render_preview(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner = preview_text_area(area);
    frame.render_widget(block, area);

    let markup = model.preview();
    let rows = preview_rows(markup.as_str(), inner.width, theme);
    let max_start = rows.len().saturating_sub(1);
    let start = model.preview_scroll.min(max_start);

    let content: Vec<Line> = rows
        .into_iter()
        .skip(start)
        .take(inner.height as usize)
        .collect();

    frame.render_widget(Clear, inner);
    frame.render_widget(Paragraph::new(content).style(theme.base), inner);
}

/// Where preview text is drawn: the pane interior.
pub fn preview_text_area(preview_pane: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(preview_pane)
}

/// The markup as styled terminal rows, each line wrapped at `width`
/// columns.
pub fn preview_rows(markup: &str, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    markup
        .lines()
        .flat_map(|line| wrap_spans(markup_line_spans(line, theme), usize::from(width)))
        .collect()
}

/// Number of rows [`preview_rows`] produces, without styling.
pub fn preview_row_count(markup: &str, width: u16) -> usize {
    markup
        .lines()
        .map(|line| {
            let mut rows = 1;
            let mut used = 0;
            for ch in line.chars() {
                let w = char_width(ch);
                if breaks_before(used, w, usize::from(width)) {
                    rows += 1;
                    used = 0;
                }
                used += w;
            }
            rows
        })
        .sum()
}

/// Whether a character `w` columns wide starts a new row when `used`
/// columns of a `width`-column row are taken.
const fn breaks_before(used: usize, w: usize, width: usize) -> bool {
    width > 0 && used > 0 && used + w > width
}

/// Break one line of spans into rows at most `width` columns wide.
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let w = char_width(ch);
            if breaks_before(used, w, width) {
                if !piece.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            piece.push(if ch.is_control() { ' ' } else { ch });
            used += w;
        }
        if !piece.is_empty() {
            row.push(Span::styled(piece, span.style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// Split one line of markup into dimmed tags and text styled by the
/// elements open around it on that line.
pub fn markup_line_spans(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        if rest.starts_with('<')
            && let Some(close) = rest.find('>')
        {
            let tag = &rest[..=close];
            track_element(&mut open, tag);
            spans.push(Span::styled(tag.to_string(), theme.tag));
            rest = &rest[close + 1..];
            continue;
        }
        let skip = rest.chars().next().map_or(1, char::len_utf8);
        let text_end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        let style = open
            .iter()
            .filter_map(|name| theme.style_for_element(name))
            .fold(theme.base, |acc, style| acc.patch(style));
        spans.push(Span::styled(rest[..text_end].to_string(), style));
        rest = &rest[text_end..];
    }
    spans
}

fn track_element(open: &mut Vec<String>, tag: &str) {
    let inner = tag.trim_start_matches('<').trim_end_matches('>');
    if let Some(name) = inner.strip_prefix('/') {
        let name = name.trim().to_ascii_lowercase();
        if let Some(pos) = open.iter().rposition(|n| *n == name) {
            open.truncate(pos);
        }
    } else if !inner.ends_with('/') {
        let name: String = inner
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect();
        open.push(name.to_ascii_lowercase());
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
