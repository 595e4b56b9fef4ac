//! Rope-backed text buffer behind the editor pane.
//!
//! Tracks a cursor and a selection anchor, and converts between line/column
//! positions and the byte offsets used by [`crate::transform`].

mod buffer;

pub use buffer::{Cursor, EditorBuffer, Motion, char_width};
