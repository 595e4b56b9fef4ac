use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::ThemeMode;
use crate::document::DocumentStore;
use crate::editor::EditorBuffer;
use crate::persist::Autosaver;
use crate::render::{Renderer, SafeMarkup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// The [`DocumentStore`] is the single source of truth for the document
/// text. The editor buffer mirrors it for cursor and selection handling, and
/// every edit is pushed back into the store, which then notifies the
/// preview renderer first and the autosave writer second.
pub struct Model {
    /// Authoritative document text
    pub store: DocumentStore,
    /// Renderer shared with the store's preview subscription
    preview: Rc<RefCell<Renderer>>,
    /// Background writer fed by the store's autosave subscription
    autosaver: Option<Autosaver>,
    /// Text, cursor and selection of the editor pane
    pub editor: EditorBuffer,
    /// First editor line shown in the pane
    pub editor_scroll_offset: usize,
    /// First display column shown in the editor pane
    pub editor_hscroll: usize,
    /// First preview line shown in the pane
    pub preview_scroll: usize,
    pub theme: ThemeMode,
    /// Directory that Ctrl+S exports document.md into
    pub export_dir: PathBuf,
    /// Path being typed in the import prompt, when it is open
    pub import_prompt: Option<String>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Terminal size as last reported
    pub width: u16,
    pub height: u16,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("store", &self.store)
            .field("editor", &self.editor)
            .field("autosave", &self.autosaver.is_some())
            .field("theme", &self.theme)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create the model for `text`, wiring the preview (and the autosave
    /// writer, when given) to the document store.
    pub fn new(text: &str, autosaver: Option<Autosaver>, terminal_size: (u16, u16)) -> Self {
        let mut store = DocumentStore::with_text(text);

        let mut renderer = Renderer::new();
        renderer.render(text);
        let preview = Rc::new(RefCell::new(renderer));
        let listener = Rc::clone(&preview);
        store.subscribe(move |text: &str| {
            listener.borrow_mut().render(text);
        });
        if let Some(saver) = &autosaver {
            store.subscribe(saver.listener());
        }

        Self {
            store,
            preview,
            autosaver,
            editor: EditorBuffer::from_text(text),
            width: terminal_size.0,
            height: terminal_size.1,
            ..Self::empty_shell()
        }
    }

    fn empty_shell() -> Self {
        Self {
            store: DocumentStore::new(),
            preview: Rc::new(RefCell::new(Renderer::new())),
            autosaver: None,
            editor: EditorBuffer::empty(),
            editor_scroll_offset: 0,
            editor_hscroll: 0,
            preview_scroll: 0,
            theme: ThemeMode::default(),
            export_dir: PathBuf::from("."),
            import_prompt: None,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            width: 80,
            height: 24,
            toast: None,
            should_quit: false,
        }
    }

    /// The sanitized preview of the current document.
    pub fn preview(&self) -> SafeMarkup {
        self.preview.borrow().current().cloned().unwrap_or_default()
    }

    /// Whether document changes are being written to storage.
    pub const fn autosave_enabled(&self) -> bool {
        self.autosaver.is_some()
    }

    /// Block until queued autosave writes have reached storage.
    pub fn flush_autosave(&self) {
        if let Some(saver) = &self.autosaver {
            saver.flush();
        }
    }

    /// Push the editor's text into the store after an edit.
    pub(super) fn commit_editor(&mut self) {
        self.store.set(self.editor.text());
    }

    /// Replace the whole document (import), caret at the start.
    pub(super) fn load_document(&mut self, text: String) {
        self.editor = EditorBuffer::from_text(&text);
        self.editor_scroll_offset = 0;
        self.editor_hscroll = 0;
        self.preview_scroll = 0;
        self.store.set(text);
    }

    /// Rows of text visible in the editor pane.
    pub fn editor_rows(&self) -> usize {
        usize::from(crate::ui::pane_text_height(self.height))
    }

    /// Display columns of text visible in the editor pane, right of the
    /// gutter.
    pub fn editor_cols(&self) -> usize {
        let panes = crate::ui::split_panes(Rect::new(0, 0, self.width, self.height));
        usize::from(crate::ui::editor_text_area(panes.editor, self.editor.line_count()).width)
    }

    /// Terminal rows the preview needs for the current markup at the
    /// current width.
    pub fn preview_row_count(&self) -> usize {
        let panes = crate::ui::split_panes(Rect::new(0, 0, self.width, self.height));
        let width = crate::ui::preview_text_area(panes.preview).width;
        crate::ui::preview_row_count(self.preview().as_str(), width)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::empty_shell()
    }
}
