// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::Renderer)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! A terminal Markdown editor with a live, sanitized preview.
//!
//! The core is three small pieces that know nothing about the terminal:
//! - a renderer that turns Markdown into [`render::SafeMarkup`], HTML that
//!   has been through an allow-list sanitizer,
//! - a selection-aware transformer that implements the formatting toolbar,
//! - a [`document::DocumentStore`] that owns the text and notifies its
//!   subscribers (preview first, autosave second) on every change.
//!
//! ## Architecture
//!
//! The terminal front end uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`render`]: Markdown to sanitized HTML
//! - [`transform`]: Selection-aware text insertion and toolbar actions
//! - [`document`]: The document store
//! - [`persist`]: Autosave storage
//! - [`files`]: Import and export
//! - [`clipboard`]: Copying the document
//! - [`editor`]: Text buffer with cursor and selection
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod editor;
pub mod files;
pub mod persist;
pub mod render;
pub mod transform;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::DocumentStore;
    pub use crate::render::{SafeMarkup, render};
    pub use crate::transform::{Operation, Selection, ToolbarAction, apply};
}
