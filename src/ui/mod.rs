//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: Layout of the toolbar, editor, preview and bottom bar
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{
    Panes, editor_text_area, line_number_width, markup_line_spans, pane_text_height,
    preview_row_count, preview_rows, preview_text_area, render, split_panes, toolbar_buttons,
    toolbar_hit,
};

pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 50;
