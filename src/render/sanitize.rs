//! The fixed HTML allow-list applied to every preview.

use std::sync::LazyLock;

use ammonia::Builder;

use super::SafeMarkup;

/// Clean untrusted HTML into [`SafeMarkup`].
///
/// Drops script, style and embedding elements (with their content), event
/// handler attributes, and URLs outside the allowed schemes (`javascript:`,
/// `vbscript:` and `data:` are never allowed). Structural and inline
/// formatting survives.
pub fn sanitize(html: &str) -> SafeMarkup {
    SafeMarkup(POLICY.clean(html).to_string())
}

static POLICY: LazyLock<Builder<'static>> = LazyLock::new(policy);

fn policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        // Task list checkboxes
        .add_tags(&["input"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        // Fenced code language hint
        .add_tag_attributes("code", &["class"]);
    builder
}
