//! Navigation breadcrumb component

use maud::{Markup, html};

use crate::pages::{commits_page_path, dir_page_path};

/// Renders breadcrumb navigation
///
/// The repository name links to the landing page, every ancestor directory
/// of `path` links to its directory page and the last component is shown
/// as the current location. Blob and directory pages share this header.
///
/// # Arguments
///
/// * `repo_name`: Repository name for root breadcrumb link
/// * `root_href`: Relative href from the current page to the site root
/// * `ref_name`: Git reference (branch/tag) being viewed
/// * `path`: Repository path of the current file or directory
///
/// # Returns
///
/// Breadcrumb navigation markup with links and separators
pub fn breadcrumb(repo_name: &str, root_href: &str, ref_name: &str, path: &str) -> Markup {
    let components = path_components(path);
    let tree_root = format!("{}{}", root_href, dir_page_path(ref_name, ""));

    html! {
        header {
            div class="breadcrumb" {
                a href=(format!("{}index.html", root_href)) class="breadcrumb-link" { (repo_name) }
                span class="breadcrumb-separator" { "/" }
                @if components.is_empty() {
                    span class="breadcrumb-current" { "tree" }
                } @else {
                    a href=(tree_root) class="breadcrumb-link" { "tree" }
                }
                @for (idx, component) in components.iter().enumerate() {
                    span class="breadcrumb-separator" { "/" }
                    @if idx + 1 == components.len() {
                        span class="breadcrumb-current" { (*component) }
                    } @else {
                        @let partial = components[..=idx].join("/");
                        a href=(format!("{}{}", root_href, dir_page_path(ref_name, &partial)))
                            class="breadcrumb-link" { (*component) }
                    }
                }
            }
            div class="ref-info" {
                i class="ph ph-git-branch" {}
                span class="ref-name" { (ref_name) }
                a href=(format!("{}{}", root_href, commits_page_path(ref_name))) class="ref-commits" {
                    "commits"
                }
            }
        }
    }
}

/// Renders the header of pages outside the file tree (commits, tags)
pub fn section_header(repo_name: &str, root_href: &str, section: &str) -> Markup {
    html! {
        header {
            div class="breadcrumb" {
                a href=(format!("{}index.html", root_href)) class="breadcrumb-link" { (repo_name) }
                span class="breadcrumb-separator" { "/" }
                span class="breadcrumb-current" { (section) }
            }
        }
    }
}

/// Splits a repository path into its non-empty components.
pub fn path_components(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
