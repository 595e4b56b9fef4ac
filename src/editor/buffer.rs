use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use crate::transform::Selection;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
    PageUp(usize),
    PageDown(usize),
}

/// The editable text behind the editor pane.
///
/// Backed by a rope, with a cursor and an optional selection anchor. The
/// selection is the span between the anchor and the cursor; it is exposed
/// as byte offsets through [`EditorBuffer::selection`] so it can be handed
/// to the transformer.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total length in bytes.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    // --- Offsets and selection ---

    /// Byte offset of `cursor` in the whole buffer.
    pub fn offset_of(&self, cursor: Cursor) -> usize {
        let line = cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_byte(line) + cursor.col.min(self.line_len(line))
    }

    /// Byte offset of the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.offset_of(self.cursor)
    }

    /// Cursor position for a byte offset, clamped to the buffer and snapped
    /// back to a character boundary.
    pub fn cursor_at(&self, offset: usize) -> Cursor {
        let offset = offset.min(self.rope.len_bytes());
        let offset = self.rope.char_to_byte(self.rope.byte_to_char(offset));
        let line = self.rope.byte_to_line(offset);
        let col = (offset - self.rope.line_to_byte(line)).min(self.line_len(line));
        Cursor::at(line, col)
    }

    /// The selected span, ordered, as byte offsets. Empty when nothing is
    /// selected (a caret at the cursor).
    pub fn selection(&self) -> Selection {
        let head = self.cursor_offset();
        let tail = self.anchor.map_or(head, |anchor| self.offset_of(anchor));
        Selection::new(head.min(tail), head.max(tail))
    }

    /// Whether a non-empty span is selected.
    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    /// The selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        let Selection { start, end } = self.selection();
        if start == end {
            return None;
        }
        Some(self.rope.byte_slice(start..end).to_string())
    }

    /// Select `selection`, with the cursor at its end.
    pub fn set_selection(&mut self, selection: Selection) {
        let end = self.cursor_at(selection.end);
        if selection.is_empty() {
            self.anchor = None;
        } else {
            self.anchor = Some(self.cursor_at(selection.start));
        }
        self.cursor = end;
    }

    /// Drop the selection, keeping the cursor where it is.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.set_selection(Selection::new(0, self.rope.len_bytes()));
    }

    /// Replace the whole text and place the selection (e.g. after a toolbar
    /// transformation computed from the old text).
    pub fn replace_text(&mut self, text: &str, selection: Selection) {
        self.rope = Rope::from_str(text);
        self.set_selection(selection);
    }

    // --- Editing ---

    /// Insert a character, replacing the selection if there is one.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Insert a string, replacing the selection if there is one. The cursor
    /// ends up after the inserted text.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        if s.is_empty() {
            return;
        }
        let offset = self.cursor_offset();
        self.rope.insert(self.rope.byte_to_char(offset), s);
        self.cursor = self.cursor_at(offset + s.len());
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_str("\n");
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let offset = self.cursor_offset();
        if offset == 0 {
            return false;
        }
        let char_idx = self.rope.byte_to_char(offset);
        // Treat CRLF as one break so the cursor never lands between them.
        let start = if char_idx >= 2
            && self.rope.char(char_idx - 1) == '\n'
            && self.rope.char(char_idx - 2) == '\r'
        {
            char_idx - 2
        } else {
            char_idx - 1
        };
        let start_byte = self.rope.char_to_byte(start);
        self.rope.remove(start..char_idx);
        self.cursor = self.cursor_at(start_byte);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let offset = self.cursor_offset();
        if offset >= self.rope.len_bytes() {
            return false;
        }
        let char_idx = self.rope.byte_to_char(offset);
        let end = if self.rope.char(char_idx) == '\r'
            && char_idx + 1 < self.rope.len_chars()
            && self.rope.char(char_idx + 1) == '\n'
        {
            char_idx + 2
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.cursor = self.cursor_at(offset);
        true
    }

    /// Remove the selected span. Returns `false` if nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Selection { start, end } = self.selection();
        self.anchor = None;
        if start == end {
            return false;
        }
        let range = self.rope.byte_to_char(start)..self.rope.byte_to_char(end);
        self.rope.remove(range);
        self.cursor = self.cursor_at(start);
        true
    }

    // --- Movement ---

    /// Move the cursor, dropping any selection.
    ///
    /// Left/Right with a selection collapse it to its start/end instead of
    /// moving.
    pub fn move_cursor(&mut self, motion: Motion) {
        if self.has_selection() && matches!(motion, Motion::Left | Motion::Right) {
            let Selection { start, end } = self.selection();
            let target = if motion == Motion::Left { start } else { end };
            self.anchor = None;
            self.cursor = self.cursor_at(target);
            return;
        }
        self.anchor = None;
        self.apply_motion(motion);
    }

    /// Move the cursor while keeping the anchor, growing or shrinking the
    /// selection (Shift + movement).
    pub fn extend_selection(&mut self, motion: Motion) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
        self.apply_motion(motion);
    }

    /// Move cursor to a specific line and column, dropping the selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let line_text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(line_text.len());
        while !line_text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Move the cursor to a line and column, keeping the anchor (mouse drag).
    pub fn select_to(&mut self, line: usize, col: usize) {
        let anchor = self.anchor.unwrap_or(self.cursor);
        self.move_to(line, col);
        self.anchor = Some(anchor);
    }

    /// Terminal column at which byte column `col` of `line` is drawn.
    pub fn display_col(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let col = col.min(text.len());
        text.get(..col)
            .unwrap_or_default()
            .chars()
            .map(char_width)
            .sum()
    }

    /// Byte column of `line` drawn at terminal column `display_col`.
    pub fn col_for_display(&self, line: usize, display_col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut width = 0;
        for (idx, c) in text.char_indices() {
            let w = char_width(c);
            if width + w > display_col {
                return idx;
            }
            width += w;
        }
        text.len()
    }

    fn apply_motion(&mut self, motion: Motion) {
        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => self.move_vertical(-1),
            Motion::Down => self.move_vertical(1),
            Motion::PageUp(rows) => self.move_vertical(-isize::try_from(rows).unwrap_or(isize::MAX)),
            Motion::PageDown(rows) => self.move_vertical(isize::try_from(rows).unwrap_or(isize::MAX)),
            Motion::LineStart => self.cursor.set_col(0),
            Motion::LineEnd => self.cursor.set_col(self.line_len(self.cursor.line)),
            Motion::WordLeft => self.move_word_left(),
            Motion::WordRight => self.move_word_right(),
            Motion::BufferStart => self.cursor = Cursor::new(),
            Motion::BufferEnd => {
                let last_line = self.line_count().saturating_sub(1);
                self.cursor = Cursor::at(last_line, self.line_len(last_line));
            }
        }
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let max_line = self.line_count().saturating_sub(1);
        let target = self.cursor.line.saturating_add_signed(delta).min(max_line);
        if target == self.cursor.line {
            return;
        }
        self.cursor.line = target;
        let line = self.line_at(target).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.col = col;
    }

    fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let trimmed = line[..self.cursor.col].trim_end();
        // Start of the previous word
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }
}

/// Cells a character occupies in the editor pane. Control characters (tabs)
/// are drawn as a single blank.
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .finish()
    }
}
