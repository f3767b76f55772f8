//! Repository landing page generation

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};

use super::tree::listing;
use super::{INDEX_PAGE, SiteContext, TAGS_PAGE, commits_page_path};
use crate::components::icons::is_readme;
use crate::components::layout::page_wrapper;
use crate::git::{CommitInfo, FileEntry};
use crate::markdown::{LinkResolver, is_markdown};
use crate::path::root_href;
use crate::tree::FileTree;
use crate::util::{format_relative_time, now_seconds};

/// Data container for index page generation
pub struct IndexPageData<'a> {
    pub tree: &'a FileTree,
    pub latest_commit: Option<&'a CommitInfo>,
    pub commit_count: usize,
    pub tag_count: usize,
    /// README path and its rendered HTML
    pub readme: Option<(&'a str, &'a str)>,
}

/// Generates repository index page HTML with optional README rendering
///
/// Shows the repository header, the latest commit, the root listing and
/// the rendered README below it.
pub fn generate(ctx: &SiteContext<'_>, data: IndexPageData<'_>) -> Markup {
    let root = root_href(INDEX_PAGE);
    let now = now_seconds();

    page_wrapper(
        ctx.repo_name,
        &root,
        &["index.css", "markdown.css"],
        html! {
            header class="repo-header" {
                @if let Some(owner_name) = ctx.owner {
                    span class="repo-owner" { (owner_name) " / " }
                }
                h1 class="repo-name" { (ctx.repo_name) }
                @if data.tag_count > 0 {
                    a href=(TAGS_PAGE) class="tag-link" {
                        i class="ph ph-tag" {}
                        " " (data.tag_count) " tags"
                    }
                }
            }

            main class="repo-card" {
                div class="repo-controls" {
                    div class="branch-info" {
                        i class="ph ph-git-branch" {}
                        span class="branch-name branch-active" { (ctx.ref_name) }
                    }

                    @if let Some(commit) = data.latest_commit {
                        div class="commit-info-wrapper" {
                            span class="repo-commit-message" { (commit.message()) }
                            div class="commit-meta" {
                                span { (commit.author()) }
                                span { "·" }
                                code class="commit-hash" title=(commit.oid()) { (commit.short_oid()) }
                                span { "·" }
                                span { (format_relative_time(commit.date(), now)) }
                            }
                        }
                    }

                    a href=(commits_page_path(ctx.ref_name)) class="history-link" {
                        i class="ph ph-clock-counter-clockwise" {}
                        " " (data.commit_count) " commits"
                    }
                }

                (listing(ctx, data.tree, "", &root))
            }

            @if let Some((readme_path, readme_html)) = data.readme {
                section class="readme-section" {
                    div class="readme-card" {
                        div class="readme-header" {
                            i class="ph ph-info" {}
                            span class="readme-title" { (readme_path) }
                        }
                        div class="readme-content markdown-content" {
                            (PreEscaped(readme_html))
                        }
                    }
                }
            }
        },
    )
}

/// Finds the README shown on the landing page
///
/// Only files at the repository root are considered. `README.md` wins,
/// then any markdown README, then any other README.
pub fn find_readme(files: &[FileEntry]) -> Option<&FileEntry> {
    let root_readmes: Vec<(&FileEntry, &str)> = files
        .iter()
        .filter_map(|entry| entry.path_str().map(|path| (entry, path)))
        .filter(|(_, path)| !path.contains('/') && is_readme(path))
        .collect();

    root_readmes
        .iter()
        .find(|(_, path)| *path == "README.md")
        .or_else(|| root_readmes.iter().find(|(_, path)| is_markdown(path)))
        .or_else(|| root_readmes.first())
        .map(|(entry, _)| *entry)
}

/// Renders README content for the landing page
///
/// Markdown is rendered with links resolved from the site root; other
/// READMEs are shown preformatted.
///
/// # Errors
///
/// Returns error if content is not UTF8 or markdown rendering fails
pub fn render_readme(ctx: &SiteContext<'_>, readme_path: &str, content: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(content)
        .with_context(|| format!("README contains invalid UTF8: {}", readme_path))?;

    if !is_markdown(readme_path) {
        return Ok(html! { pre class="readme-plain" { (text) } }.into_string());
    }

    let root = root_href(INDEX_PAGE);
    let resolver = LinkResolver::new(ctx.paths, &root, ctx.ref_name);
    ctx.markdown
        .render_with_links(text, &resolver, readme_path)
        .context("Failed to render README markdown")
}
