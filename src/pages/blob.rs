//! Blob page generation for file content viewing

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::path::Path;

use super::{SiteContext, blob_page_path, raw_path};
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::highlight::line_count;
use crate::markdown::{LinkResolver, is_markdown};
use crate::path::root_href;
use crate::util::{format_file_size, is_binary};

/// How a blob is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobView {
    /// Rendered markdown with repository links rewritten
    Markdown(String),
    /// Highlighted source and its line count
    Code { html: String, lines: usize },
    /// Content that cannot be shown as text
    Binary { size: usize },
}

/// Chooses and renders the view for a blob.
///
/// Content with a NUL byte near the start or invalid UTF8 is binary.
/// Markdown files are rendered and their links resolved relative to the
/// page at `blob/<ref>/<file_path>.html`; everything else is highlighted.
///
/// # Errors
///
/// Returns error if markdown rendering or syntax highlighting fails
pub fn render_view(ctx: &SiteContext<'_>, file_path: &str, content: &[u8]) -> Result<BlobView> {
    if is_binary(content) {
        return Ok(BlobView::Binary {
            size: content.len(),
        });
    }
    let Ok(text) = std::str::from_utf8(content) else {
        return Ok(BlobView::Binary {
            size: content.len(),
        });
    };

    if is_markdown(file_path) {
        let root = root_href(&blob_page_path(ctx.ref_name, file_path));
        let resolver = LinkResolver::new(ctx.paths, &root, ctx.ref_name);
        let html = ctx
            .markdown
            .render_with_links(text, &resolver, file_path)
            .with_context(|| format!("Failed to render markdown: {}", file_path))?;
        return Ok(BlobView::Markdown(html));
    }

    let html = ctx
        .highlighter
        .highlight(text, Path::new(file_path))
        .with_context(|| format!("Failed to apply syntax highlighting: {}", file_path))?;

    Ok(BlobView::Code {
        html,
        lines: line_count(text),
    })
}

/// Generates HTML blob page
///
/// # Arguments
///
/// * `ctx`: Site context of the ref being rendered
/// * `file_path`: File path within repository tree
/// * `content`: Raw blob bytes
///
/// # Errors
///
/// Returns error if the view cannot be rendered
///
/// # Examples
///
/// ```no_run
/// use gitshelf::pages::{SiteContext, blob};
/// use gitshelf::{Highlighter, MarkdownRenderer, PathSets};
///
/// let paths = PathSets::from_paths(["README.md"]);
/// let markdown = MarkdownRenderer::new();
/// let highlighter = Highlighter::new();
/// let ctx = SiteContext {
///     repo_name: "my-repo",
///     owner: None,
///     ref_name: "main",
///     paths: &paths,
///     markdown: &markdown,
///     highlighter: &highlighter,
/// };
///
/// let html = blob::generate(&ctx, "README.md", b"# Hello")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(ctx: &SiteContext<'_>, file_path: &str, content: &[u8]) -> Result<Markup> {
    let view = render_view(ctx, file_path, content)?;
    Ok(blob_page_markup(ctx, file_path, &view))
}

fn blob_page_markup(ctx: &SiteContext<'_>, file_path: &str, view: &BlobView) -> Markup {
    let root = root_href(&blob_page_path(ctx.ref_name, file_path));
    let raw_href = format!("{}{}", root, raw_path(ctx.ref_name, file_path));

    let stylesheets: &[&str] = match view {
        BlobView::Markdown(_) => &["blob.css", "markdown.css"],
        _ => &["blob.css"],
    };

    page_wrapper(
        file_path,
        &root,
        stylesheets,
        html! {
            (breadcrumb(ctx.repo_name, &root, ctx.ref_name, file_path))
            div class="blob-toolbar" {
                @match view {
                    BlobView::Code { lines, .. } => span class="blob-info" { (lines) " lines" },
                    BlobView::Binary { size } => span class="blob-info" { (format_file_size(*size)) },
                    BlobView::Markdown(_) => span class="blob-info" { "markdown" },
                }
                a href=(raw_href) class="raw-link" { "raw" }
            }
            @match view {
                BlobView::Markdown(rendered) => {
                    main class="markdown-content" {
                        (PreEscaped(rendered))
                    }
                },
                BlobView::Code { html, lines } => {
                    main class="blob-container" {
                        div class="line-numbers" {
                            @for line_num in 1..=(*lines).max(1) {
                                a id=(format!("L{}", line_num)) href=(format!("#L{}", line_num))
                                    class="line-number" { (line_num) }
                            }
                        }
                        pre class="code-content" {
                            code { (PreEscaped(html)) }
                        }
                    }
                },
                BlobView::Binary { .. } => {
                    main class="binary-placeholder" {
                        p {
                            "Binary file not shown. "
                            a href=(raw_href) { "Download" }
                        }
                    }
                },
            }
        },
    )
}
