//! Markdown to sanitized HTML.
//!
//! Rendering runs in two fixed steps:
//! - Convert markdown to HTML with comrak (GitHub-flavoured extensions)
//! - Clean the HTML with a fixed ammonia allow-list
//!
//! The result is a [`SafeMarkup`], which can only be produced by the
//! sanitizer, so anything holding one can display it without further
//! escaping.

mod sanitize;

pub use sanitize::sanitize;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use comrak::{Options, markdown_to_html};

/// HTML that has been through the sanitizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    /// Markup with no content. Trivially safe.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SafeMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A markdown-to-HTML capability.
///
/// Implementations must accept any input. The output is treated as
/// untrusted and always sanitized afterwards.
pub trait MarkdownToHtml {
    fn to_html(&self, source: &str) -> String;
}

/// The comrak-backed converter used by the editor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Comrak;

impl MarkdownToHtml for Comrak {
    fn to_html(&self, source: &str) -> String {
        markdown_to_html(source, &create_options())
    }
}

fn create_options() -> Options {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.shortcodes = true;

    // Raw HTML goes through to the sanitizer instead of being dropped here.
    options.render.unsafe_ = true;

    options
}

/// Render markdown to sanitized HTML with the default converter.
///
/// # Example
///
/// ```
/// let html = markpad::render::render("# Hi <script>alert(1)</script>");
/// assert!(html.as_str().contains("<h1>"));
/// assert!(!html.as_str().contains("<script"));
/// ```
pub fn render(source: &str) -> SafeMarkup {
    render_with(&Comrak, source)
}

/// Render markdown with an explicit converter.
///
/// A converter that panics yields empty markup; the unsanitized output is
/// never returned.
pub fn render_with(converter: &dyn MarkdownToHtml, source: &str) -> SafeMarkup {
    let started = Instant::now();
    let Ok(html) = catch_quietly(|| converter.to_html(source)) else {
        tracing::error!(
            source_bytes = source.len(),
            "markdown conversion failed, showing empty preview"
        );
        return SafeMarkup::empty();
    };
    let markup = sanitize(&html);
    tracing::debug!(
        source_bytes = source.len(),
        html_bytes = markup.as_str().len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "rendered preview"
    );
    markup
}

/// Serializes panic hook swaps so concurrent renders restore the right hook.
static HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Run `f`, catching a panic without calling the installed panic hook.
///
/// The terminal's hook restores the screen and prints the panic, which
/// would tear down the editor for a failure handled here. The panic is
/// logged instead.
fn catch_quietly<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let _guard = HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "markdown converter panicked");
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

/// Renders markdown, skipping work when the input has not changed.
pub struct Renderer {
    converter: Box<dyn MarkdownToHtml>,
    last: Option<(String, SafeMarkup)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_converter(Comrak)
    }

    pub fn with_converter(converter: impl MarkdownToHtml + 'static) -> Self {
        Self {
            converter: Box::new(converter),
            last: None,
        }
    }

    /// Render `source`, reusing the previous result for identical input.
    pub fn render(&mut self, source: &str) -> &SafeMarkup {
        if self.last.as_ref().is_some_and(|(seen, _)| seen != source) {
            self.last = None;
        }
        let (_, markup) = self.last.get_or_insert_with(|| {
            (
                source.to_string(),
                render_with(self.converter.as_ref(), source),
            )
        });
        markup
    }

    /// The most recent output, if anything has been rendered yet.
    pub fn current(&self) -> Option<&SafeMarkup> {
        self.last.as_ref().map(|(_, markup)| markup)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field(
                "last_source_bytes",
                &self.last.as_ref().map(|(source, _)| source.len()),
            )
            .finish_non_exhaustive()
    }
}
