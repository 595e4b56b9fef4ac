//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;
use crate::persist::{self, Autosaver, DOCUMENT_KEY, FileStorage, MemoryStorage, Storage};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    theme: ThemeMode,
    autosave: bool,
    storage_path: PathBuf,
    export_dir: PathBuf,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application that autosaves to `storage_path`.
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            theme: ThemeMode::default(),
            autosave: true,
            storage_path,
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the initial color theme.
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable the file-backed autosave slot.
    ///
    /// When disabled the document starts empty and lives only in memory.
    pub const fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Where Ctrl+S writes `document.md`.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Restore the saved document and wire up the store's subscribers.
    fn build_model(&self, terminal_size: (u16, u16)) -> Model {
        let storage: Box<dyn Storage> = if self.autosave {
            Box::new(FileStorage::new(&self.storage_path))
        } else {
            Box::new(MemoryStorage::new())
        };
        let (text, restore_error) = persist::restore(storage.as_ref());

        let (autosaver, spawn_error) = match Autosaver::spawn(storage, DOCUMENT_KEY) {
            Ok(saver) => (Some(saver), None),
            Err(err) => {
                tracing::warn!(error = %err, "autosave thread unavailable");
                (None, Some(err))
            }
        };

        let mut model = Model::new(&text, autosaver, terminal_size);
        model.theme = self.theme;
        model.export_dir.clone_from(&self.export_dir);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        if let Some(err) = restore_error {
            model.show_toast(
                ToastLevel::Warning,
                format!("Saved document unavailable ({err}); starting empty"),
            );
        } else if let Some(err) = spawn_error {
            model.show_toast(ToastLevel::Warning, format!("Autosave disabled: {err}"));
        }
        model
    }
}

#[cfg(test)]
mod tests;
