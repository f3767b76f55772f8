//! File listing table components

use maud::{Markup, html};

use super::icons::file_icon;

/// Wraps file rows in table container
pub fn file_table(rows: Markup) -> Markup {
    html! {
        div class="file-table" {
            (rows)
        }
    }
}

/// Renders single file or directory row
///
/// Displays icon, name and a short metadata column. Directory names are
/// passed with a trailing slash so the icon matches, and shown without it.
///
/// # Arguments
///
/// * `href`: Link target for row click
/// * `name`: File name, or directory name ending in `/`
/// * `meta`: Right column text (short object ID, size); may be empty
pub fn file_row(href: &str, name: &str, meta: &str) -> Markup {
    let label = name.trim_end_matches('/');

    html! {
        a href=(href) class="file-row" {
            div class="file-name-cell" {
                (file_icon(name))
                span { (label) }
            }
            div class="file-meta" { (meta) }
        }
    }
}

/// Renders the row linking to the parent directory.
pub fn parent_row(href: &str) -> Markup {
    html! {
        a href=(href) class="file-row" {
            div class="file-name-cell" {
                div class="icon-box" {
                    i class="ph ph-arrow-up icon-folder" {}
                }
                span { ".." }
            }
            div class="file-meta" {}
        }
    }
}
