use super::Operation;

/// Formatting buttons shown in the toolbar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Heading,
    BulletList,
    OrderedList,
    Blockquote,
    Link,
    CodeBlock,
}

impl ToolbarAction {
    /// Toolbar order, left to right.
    pub const ALL: [Self; 8] = [
        Self::Bold,
        Self::Italic,
        Self::Heading,
        Self::BulletList,
        Self::OrderedList,
        Self::Blockquote,
        Self::Link,
        Self::CodeBlock,
    ];

    /// The text operation this button performs.
    pub const fn operation(self) -> Operation<'static> {
        match self {
            Self::Bold => Operation::Wrap {
                before: "**",
                after: "**",
            },
            Self::Italic => Operation::Wrap {
                before: "*",
                after: "*",
            },
            Self::Heading => Operation::Prefix("# "),
            Self::BulletList => Operation::Prefix("- "),
            Self::OrderedList => Operation::Prefix("1. "),
            Self::Blockquote => Operation::Prefix("> "),
            Self::Link => Operation::Insert("[Link text](url)"),
            Self::CodeBlock => Operation::Wrap {
                before: "```\n",
                after: "\n```",
            },
        }
    }

    /// Short label drawn on the toolbar.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Heading => "H1",
            Self::BulletList => "List",
            Self::OrderedList => "1.List",
            Self::Blockquote => "Quote",
            Self::Link => "Link",
            Self::CodeBlock => "Code",
        }
    }

    /// Key pressed together with Alt to trigger the action.
    pub const fn shortcut(self) -> char {
        match self {
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::Heading => 'h',
            Self::BulletList => 'l',
            Self::OrderedList => 'o',
            Self::Blockquote => 'q',
            Self::Link => 'k',
            Self::CodeBlock => 'c',
        }
    }

    /// Look up the action bound to `Alt+<c>`.
    pub fn from_shortcut(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        Self::ALL.into_iter().find(|action| action.shortcut() == c)
    }
}
