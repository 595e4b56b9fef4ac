//! Theming and color definitions.
//!
//! Two fixed palettes, light and dark, switched at runtime with Ctrl+T.
//! Uses indexed ANSI colors so both work on 256-color terminals.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Complete color theme for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Pane background and plain text
    pub base: Style,
    /// Pane borders
    pub border: Style,
    /// Line-number gutter
    pub gutter: Style,
    /// Cell under the cursor
    pub cursor: Style,
    /// Selected text in the editor
    pub selection: Style,
    /// Markup tags in the preview
    pub tag: Style,
    /// Toolbar row
    pub toolbar: Style,
    /// One toolbar button
    pub button: Style,
    /// Heading text in the preview
    pub heading: Style,
    /// Code text in the preview
    pub code: Style,
    /// Link text in the preview
    pub link: Style,
    /// Emphasis in the preview
    pub emphasis: Style,
    /// Strong emphasis in the preview
    pub strong: Style,
    /// Status bar
    pub status: Style,
    /// Import prompt
    pub prompt: Style,
    /// Popup body
    pub popup: Style,
    /// Popup section headers
    pub section: Style,
    /// Secondary text
    pub dim: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Create a theme optimized for dark terminals.
    pub const fn dark() -> Self {
        Self {
            base: Style::new().bg(Color::Indexed(234)).fg(Color::Indexed(252)),
            border: Style::new().fg(Color::Indexed(240)),
            gutter: Style::new().fg(Color::Indexed(242)),
            cursor: Style::new().bg(Color::Indexed(252)).fg(Color::Black),
            selection: Style::new().bg(Color::Indexed(24)).fg(Color::White),
            tag: Style::new()
                .fg(Color::Indexed(243))
                .add_modifier(Modifier::DIM),
            toolbar: Style::new().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            button: Style::new()
                .bg(Color::Indexed(238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            heading: Style::new()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            code: Style::new().fg(Color::Indexed(180)),
            link: Style::new()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            emphasis: Style::new().add_modifier(Modifier::ITALIC),
            strong: Style::new().add_modifier(Modifier::BOLD),
            status: Style::new().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            prompt: Style::new().bg(Color::Blue).fg(Color::White),
            popup: Style::new().bg(Color::Black).fg(Color::White),
            section: Style::new()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::Indexed(245)),
        }
    }

    /// Create a theme optimized for light terminals.
    pub const fn light() -> Self {
        Self {
            base: Style::new().bg(Color::Indexed(255)).fg(Color::Indexed(235)),
            border: Style::new().fg(Color::Indexed(248)),
            gutter: Style::new().fg(Color::Indexed(246)),
            cursor: Style::new().bg(Color::Indexed(235)).fg(Color::White),
            selection: Style::new().bg(Color::Indexed(153)).fg(Color::Black),
            tag: Style::new()
                .fg(Color::Indexed(247))
                .add_modifier(Modifier::DIM),
            toolbar: Style::new().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            button: Style::new()
                .bg(Color::Indexed(250))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            heading: Style::new()
                .fg(Color::Indexed(24)) // Darker cyan
                .add_modifier(Modifier::BOLD),
            code: Style::new().fg(Color::Indexed(124)),
            link: Style::new()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::UNDERLINED),
            emphasis: Style::new().add_modifier(Modifier::ITALIC),
            strong: Style::new().add_modifier(Modifier::BOLD),
            status: Style::new().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            prompt: Style::new().bg(Color::Indexed(25)).fg(Color::White),
            popup: Style::new().bg(Color::Indexed(255)).fg(Color::Black),
            section: Style::new()
                .fg(Color::Indexed(130))
                .add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::Indexed(243)),
        }
    }

    /// Extra style for text inside an element, layered over `base`.
    pub fn style_for_element(&self, tag: &str) -> Option<Style> {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(self.heading),
            "code" | "pre" => Some(self.code),
            "a" => Some(self.link),
            "em" | "i" => Some(self.emphasis),
            "strong" | "b" => Some(self.strong),
            "del" | "s" => Some(Style::new().add_modifier(Modifier::CROSSED_OUT)),
            _ => None,
        }
    }
}
