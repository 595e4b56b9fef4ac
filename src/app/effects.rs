use std::path::PathBuf;

use crate::app::{App, Message, Model, ToastLevel};
use crate::files;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::ConfirmImport => Self::import_from_prompt(model),
            Message::Export => Self::export_document(model),
            Message::Copy => Self::copy_document(model),
            _ => {}
        }
    }

    fn import_from_prompt(model: &mut Model) {
        let Some(input) = model.import_prompt.take() else {
            return;
        };
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        let path = expand_home(input);
        match files::import(&path) {
            Ok(text) => {
                let chars = text.chars().count();
                model.load_document(text);
                if files::has_import_extension(&path) {
                    model.show_toast(
                        ToastLevel::Info,
                        format!("Imported {} ({chars} chars)", path.display()),
                    );
                } else {
                    model.show_toast(
                        ToastLevel::Warning,
                        format!("Imported {} as plain text", path.display()),
                    );
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "import failed");
                model.show_toast(ToastLevel::Error, format!("Import failed: {err}"));
            }
        }
    }

    fn export_document(model: &mut Model) {
        match files::export(model.store.get(), &model.export_dir) {
            Ok(path) => {
                model.show_toast(ToastLevel::Info, format!("Exported {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }

    fn copy_document(model: &mut Model) {
        match crate::clipboard::copy_to_clipboard(model.store.get()) {
            Ok(()) => {
                let chars = model.store.get().chars().count();
                model.show_toast(ToastLevel::Info, format!("Copied {chars} chars"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
            }
        }
    }
}

/// Expand a leading `~/` in a typed path.
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(input)
}
