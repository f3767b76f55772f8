//! File type icon rendering and detection

use maud::{Markup, html};
use std::path::Path;

use crate::markdown::is_markdown;

/// Renders file icon based on path
///
/// Directories are recognised by a trailing slash.
pub fn file_icon(path: &str) -> Markup {
    let (icon_class, icon_modifier) = icon_classes(path);

    html! {
        div class="icon-box" {
            @if let Some(modifier) = icon_modifier {
                i class=(format!("{} {}", icon_class, modifier)) {}
            } @else {
                i class=(icon_class) {}
            }
        }
    }
}

/// Returns Phosphor icon classes for file type
///
/// # Returns
///
/// Phosphor icon class name and optional CSS modifier class for color styling
pub fn icon_classes(path: &str) -> (&'static str, Option<&'static str>) {
    if path.ends_with('/') {
        return ("ph-fill ph-folder", Some("icon-folder"));
    }

    if is_readme(path) {
        return ("ph ph-info", Some("icon-readme"));
    }

    if is_markdown(path) {
        return ("ph ph-file-text", Some("icon-markdown"));
    }

    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("rs") => ("ph ph-file-rs", Some("icon-rust")),
        Some("toml" | "yaml" | "yml" | "json" | "ini") => ("ph ph-gear", Some("icon-config")),
        Some("png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico") => {
            ("ph ph-file-image", Some("icon-image"))
        }
        _ => ("ph ph-file", None),
    }
}

/// Checks if file path names a README, with or without extension
pub fn is_readme(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase().starts_with("readme"))
        .unwrap_or(false)
}
