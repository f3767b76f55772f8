//! Directory page generation for tree browsing

use maud::{Markup, html};

use super::{SiteContext, blob_page_path, dir_page_path};
use crate::components::file_list::{file_row, file_table, parent_row};
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::path::{self, root_href};
use crate::tree::FileTree;

/// Generates the index page of one directory
///
/// Lists subdirectories first, then files, each linking to its own page.
/// Pages below the tree root get a parent row. Written to
/// `blob/<ref>/<dir_path>/index.html`.
///
/// # Arguments
///
/// * `ctx`: Site context of the ref being rendered
/// * `tree`: Directory tree of the ref
/// * `dir_path`: Directory within the repository (empty for root)
pub fn generate(ctx: &SiteContext<'_>, tree: &FileTree, dir_path: &str) -> Markup {
    let root = root_href(&dir_page_path(ctx.ref_name, dir_path));
    let title = if dir_path.is_empty() {
        ctx.repo_name.to_string()
    } else {
        format!("{} - {}", dir_path, ctx.repo_name)
    };

    page_wrapper(
        &title,
        &root,
        &["tree.css"],
        html! {
            (breadcrumb(ctx.repo_name, &root, ctx.ref_name, dir_path))
            main class="tree-container" {
                (listing(ctx, tree, dir_path, &root))
            }
        },
    )
}

/// Renders the file table for `dir_path` with hrefs relative to `root`.
///
/// Shared with the landing page, which lists the tree root.
pub(crate) fn listing(
    ctx: &SiteContext<'_>,
    tree: &FileTree,
    dir_path: &str,
    root: &str,
) -> Markup {
    let subdirs = tree.subdirs_at(dir_path);
    let files = tree.files_at(dir_path);

    if subdirs.is_empty() && files.is_empty() {
        return html! {
            p class="empty-state" { "Empty directory" }
        };
    }

    file_table(html! {
        @if !dir_path.is_empty() {
            @let parent = path::dir(dir_path);
            @let parent = if parent == "." { "" } else { parent.as_str() };
            (parent_row(&format!("{}{}", root, dir_page_path(ctx.ref_name, parent))))
        }
        @for subdir in &subdirs {
            @let full = path::join(&[dir_path, *subdir]);
            (file_row(
                &format!("{}{}", root, dir_page_path(ctx.ref_name, &full)),
                &format!("{}/", subdir),
                "",
            ))
        }
        @for entry in files {
            @if let Some(file_path) = entry.path_str() {
                @let name = file_path.rsplit('/').next().unwrap_or(file_path);
                @let short_oid = entry.oid().to_hex_with_len(7).to_string();
                (file_row(
                    &format!("{}{}", root, blob_page_path(ctx.ref_name, file_path)),
                    name,
                    &short_oid,
                ))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FileEntry;
    use crate::highlight::Highlighter;
    use crate::markdown::{MarkdownRenderer, PathSets};

    fn render(paths: &[&str], dir_path: &str) -> String {
        let entries: Vec<FileEntry> = paths.iter().map(|p| FileEntry::new_for_test(p)).collect();
        let tree = FileTree::from_files(&entries);
        let sets = PathSets::from_entries(&entries);
        let markdown = MarkdownRenderer::new();
        let highlighter = Highlighter::new();
        let ctx = SiteContext {
            repo_name: "test-repo",
            owner: None,
            ref_name: "main",
            paths: &sets,
            markdown: &markdown,
            highlighter: &highlighter,
        };

        generate(&ctx, &tree, dir_path).into_string()
    }

    #[test]
    fn test_root_directory_page() {
        // Arrange & Act
        let html = render(&["README.md", "src/lib.rs"], "");

        // Assert
        assert!(html.contains(r#"href="../../blob/main/src/index.html""#), "{}", html);
        assert!(html.contains(r#"href="../../blob/main/README.md.html""#));
        assert!(!html.contains("ph-arrow-up"), "Root has no parent row");
    }

    #[test]
    fn test_nested_directory_page() {
        // Arrange & Act
        let html = render(&["src/pages/blob.rs", "src/lib.rs"], "src/pages");

        // Assert
        assert!(html.contains(r#"href="../../../../blob/main/src/pages/blob.rs.html""#));
        assert!(html.contains(r#"href="../../../../blob/main/src/index.html""#), "Parent row");
        assert!(html.contains("<span>blob.rs</span>"));
        assert!(!html.contains("lib.rs.html"), "Only direct children are listed");
    }

    #[test]
    fn test_first_level_parent_is_tree_root() {
        let html = render(&["docs/guide.md"], "docs");

        assert!(html.contains(r#"href="../../../blob/main/index.html""#));
    }

    #[test]
    fn test_multi_level_branch_root_href() {
        let entries = vec![FileEntry::new_for_test("a.txt")];
        let tree = FileTree::from_files(&entries);
        let sets = PathSets::from_entries(&entries);
        let markdown = MarkdownRenderer::new();
        let highlighter = Highlighter::new();
        let ctx = SiteContext {
            repo_name: "test-repo",
            owner: None,
            ref_name: "fix/bug",
            paths: &sets,
            markdown: &markdown,
            highlighter: &highlighter,
        };

        let html = generate(&ctx, &tree, "").into_string();

        assert!(html.contains(r#"href="../../../assets/tree.css""#));
        assert!(html.contains(r#"href="../../../blob/fix/bug/a.txt.html""#));
    }
}
