//! Page generation modules for different view types
//!
//! Each page module renders one kind of page from shared components. The
//! functions here fix where every page lives in the output tree; hrefs
//! between pages are always built from them, prefixed with the linking
//! page's root href.

pub mod blob;
pub mod commits;
pub mod index;
pub mod tags;
pub mod tree;

use crate::highlight::Highlighter;
use crate::markdown::{MarkdownRenderer, PathSets};
use crate::path;

/// Site landing page.
pub const INDEX_PAGE: &str = "index.html";

/// Tag listing page.
pub const TAGS_PAGE: &str = "tags/index.html";

/// Read only state shared by every page rendered for one ref.
///
/// Everything here is immutable after construction, so one context is
/// shared by all rendering threads.
pub struct SiteContext<'a> {
    pub repo_name: &'a str,
    pub owner: Option<&'a str>,
    pub ref_name: &'a str,
    pub paths: &'a PathSets,
    pub markdown: &'a MarkdownRenderer,
    pub highlighter: &'a Highlighter,
}

/// Output path of the rendered page for a tracked file.
pub fn blob_page_path(ref_name: &str, file_path: &str) -> String {
    format!("blob/{}/{}.html", ref_name, file_path)
}

/// Output path of a directory page (`""` for the tree root).
pub fn dir_page_path(ref_name: &str, dir_path: &str) -> String {
    path::join(&["blob", ref_name, dir_path, "index.html"])
}

/// Output path of the verbatim copy of a tracked file.
pub fn raw_path(ref_name: &str, file_path: &str) -> String {
    format!("raw/{}/{}", ref_name, file_path)
}

/// Output path of the commit log for a ref.
pub fn commits_page_path(ref_name: &str) -> String {
    format!("commits/{}/index.html", ref_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        assert_eq!(blob_page_path("main", "src/lib.rs"), "blob/main/src/lib.rs.html");
        assert_eq!(dir_page_path("main", ""), "blob/main/index.html");
        assert_eq!(dir_page_path("fix/bug", "docs"), "blob/fix/bug/docs/index.html");
        assert_eq!(raw_path("main", "assets/logo.png"), "raw/main/assets/logo.png");
        assert_eq!(commits_page_path("main"), "commits/main/index.html");
    }

    #[test]
    fn test_output_paths_agree_with_link_targets() {
        // Arrange
        let paths = PathSets::from_paths(["docs/guide.md", "docs/img/a.png"]);
        let resolver = crate::markdown::LinkResolver::new(&paths, "", "main");

        // Act
        let file_link = resolver.rewrite_href("docs/guide.md", "");
        let dir_link = resolver.rewrite_href("docs/", "");
        let raw_link = resolver.rewrite_src("docs/img/a.png", "");

        // Assert
        assert_eq!(file_link, blob_page_path("main", "docs/guide.md"));
        assert_eq!(dir_link, dir_page_path("main", "docs"));
        assert_eq!(raw_link, raw_path("main", "docs/img/a.png"));
    }
}
