//! Selection-aware text insertion used by the formatting toolbar.
//!
//! Every operation splices text around a [`Selection`] of the document:
//!
//! ```text
//! new = buffer[..start] + before + buffer[start..end] + after + buffer[end..]
//! ```
//!
//! The three [`Operation`] kinds differ only in `before`/`after` and in where
//! the selection lands afterwards:
//!
//! - [`Operation::Wrap`]: the new selection covers the original text, now
//!   sitting between the markers. An empty selection leaves the caret between
//!   them, ready for typing.
//! - [`Operation::Prefix`]: the selection shifts right by the marker length.
//! - [`Operation::Insert`]: the selection collapses right after the template.
//!
//! Applying the same wrap again to the returned selection nests the markers
//! around the same text (`**` + `**x**` + `**`); the new markers never land
//! inside the old ones.

mod toolbar;

pub use toolbar::ToolbarAction;

use thiserror::Error;

/// A caret or highlighted span, as byte offsets into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A span from `start` to `end`. Not validated until it is applied.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty selection (caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    const fn shifted(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

/// A text transformation anchored on a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Insert `before` at the selection start and `after` at its end.
    Wrap { before: &'a str, after: &'a str },
    /// Insert a line marker at the selection start, ignoring its length.
    Prefix(&'a str),
    /// Insert a fixed template at the selection start.
    Insert(&'a str),
}

impl<'a> Operation<'a> {
    /// Text spliced in at the selection start.
    pub const fn before(&self) -> &'a str {
        match *self {
            Self::Wrap { before, .. } => before,
            Self::Prefix(text) | Self::Insert(text) => text,
        }
    }

    /// Text spliced in at the selection end.
    pub const fn after(&self) -> &'a str {
        match *self {
            Self::Wrap { after, .. } => after,
            Self::Prefix(_) | Self::Insert(_) => "",
        }
    }
}

/// Result of [`apply`]: the new document text and where the selection goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The caller passed an inverted, out-of-bounds, or mid-character range.
    #[error("invalid selection {start}..{end} for buffer of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Apply `operation` to `buffer` around `selection`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidRange`] if `selection.start > selection.end`,
/// `selection.end > buffer.len()`, or either offset splits a UTF-8 character.
pub fn apply(
    buffer: &str,
    selection: Selection,
    operation: Operation<'_>,
) -> Result<Transformed, TransformError> {
    validate(buffer, selection)?;

    let Selection { start, end } = selection;
    let before = operation.before();
    let after = operation.after();

    let mut text = String::with_capacity(buffer.len() + before.len() + after.len());
    text.push_str(&buffer[..start]);
    text.push_str(before);
    text.push_str(&buffer[start..end]);
    text.push_str(after);
    text.push_str(&buffer[end..]);

    let selection = match operation {
        Operation::Wrap { .. } | Operation::Prefix(_) => selection.shifted(before.len()),
        Operation::Insert(_) => Selection::caret(start + before.len()),
    };

    Ok(Transformed { text, selection })
}

fn validate(buffer: &str, selection: Selection) -> Result<(), TransformError> {
    let Selection { start, end } = selection;
    let valid = start <= end
        && end <= buffer.len()
        && buffer.is_char_boundary(start)
        && buffer.is_char_boundary(end);
    if valid {
        Ok(())
    } else {
        Err(TransformError::InvalidRange {
            start,
            end,
            len: buffer.len(),
        })
    }
}
