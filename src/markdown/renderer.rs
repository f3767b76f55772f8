//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::Options;
use html_escape::{decode_html_entities, encode_text};
use syntect::html::ClassedHTMLGenerator;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::LinkResolver;
use crate::highlight::CLASS_STYLE;

const CODE_OPEN: &str = "<code class=\"language-";
const CODE_CLOSE: &str = "</code>";

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Enables tables, strikethrough, autolinks, task lists, footnotes,
/// description lists and heading anchors. Fenced code blocks with a
/// language are highlighted with syntect using CSS classes, so the same
/// theme stylesheet serves source pages and markdown pages.
///
/// The renderer only holds a syntax set and is shared across worker
/// threads during site generation.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
}

impl MarkdownRenderer {
    /// Creates renderer with bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn options() -> Options<'static> {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.header_ids = Some(String::new());

        options.parse.smart = true;

        // Repository content is trusted: raw HTML passes through.
        options.render.unsafe_ = true;

        options
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting of a code block fails
    pub fn render(&self, content: &str) -> Result<String> {
        let html = comrak::markdown_to_html(content, &Self::options());
        self.highlight_code_blocks(&html)
    }

    /// Renders markdown and rewrites repository links for the site.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown source
    /// * `resolver`: Link resolver for the page being generated
    /// * `current_path`: Repository path of the markdown file
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting of a code block fails
    pub fn render_with_links(
        &self,
        content: &str,
        resolver: &LinkResolver<'_>,
        current_path: &str,
    ) -> Result<String> {
        let html = self.render(content)?;
        Ok(resolver.resolve(&html, current_path))
    }

    /// Replaces the plain text of `<code class="language-X">` blocks with
    /// highlighted markup. Blocks with an unterminated tag are copied as is.
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut search_pos = 0;

        while let Some(found) = html[search_pos..].find(CODE_OPEN) {
            let code_start = search_pos + found;
            let lang_start = code_start + CODE_OPEN.len();

            let Some(lang_len) = html[lang_start..].find('"') else {
                break;
            };
            let lang_end = lang_start + lang_len;
            let language = &html[lang_start..lang_end];

            let Some(tag_len) = html[lang_end..].find('>') else {
                break;
            };
            let content_start = lang_end + tag_len + 1;

            let Some(content_len) = html[content_start..].find(CODE_CLOSE) else {
                break;
            };
            let content_end = content_start + content_len;

            let code = decode_html_entities(&html[content_start..content_end]);
            let highlighted = self
                .highlight_code(&code, language)
                .with_context(|| format!("Failed to highlight {} code block", language))?;

            result.push_str(&html[last_end..content_start]);
            result.push_str(&highlighted);
            result.push_str(CODE_CLOSE);

            last_end = content_end + CODE_CLOSE.len();
            search_pos = last_end;
        }

        result.push_str(&html[last_end..]);
        Ok(result)
    }

    fn highlight_code(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
        else {
            return Ok(encode_text(code).into_owned());
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks whether a path names a markdown document.
pub fn is_markdown(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".markdown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::PathSets;

    #[test]
    fn test_render_basic_markdown() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("# Title\n\nSome *emphasis*.")
            .expect("Should render");

        // Assert
        assert!(html.contains("<h1>"), "Should render heading: {}", html);
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_render_gfm_table_and_strikethrough() {
        let renderer = MarkdownRenderer::new();

        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~")
            .expect("Should render");

        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_heading_anchor() {
        let renderer = MarkdownRenderer::new();

        let html = renderer.render("## Getting Started").expect("Should render");

        assert!(html.contains("getting-started"), "Should add heading id: {}", html);
    }

    #[test]
    fn test_code_block_highlighted_with_classes() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "```rust\nfn main() {}\n```";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert!(html.contains("language-rust"), "Language class kept: {}", html);
        assert!(html.contains("hl-"), "Highlight classes applied: {}", html);
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let renderer = MarkdownRenderer::new();

        let html = renderer
            .render("```nosuchlang\n<tag> & more\n```")
            .expect("Should render");

        assert!(html.contains("&lt;tag&gt; &amp; more"), "{}", html);
    }

    #[test]
    fn test_raw_html_passes_through() {
        let renderer = MarkdownRenderer::new();

        let html = renderer
            .render("<p align=\"center\"><img src=\"logo.png\"></p>")
            .expect("Should render");

        assert!(html.contains("align=\"center\""));
    }

    #[test]
    fn test_render_with_links_rewrites_markdown_links() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let paths = PathSets::from_paths(["README.md", "docs/guide.md"]);
        let resolver = LinkResolver::new(&paths, "../../", "main");

        // Act
        let html = renderer
            .render_with_links(
                "See [guide](docs/guide.md) and ![logo](assets/logo.png).",
                &resolver,
                "README.md",
            )
            .expect("Should render");

        // Assert
        assert!(html.contains(r#"href="../../blob/main/docs/guide.md.html""#), "{}", html);
        assert!(html.contains(r#"src="../../raw/main/assets/logo.png""#), "{}", html);
    }

    #[test]
    fn test_render_with_links_resolves_ampersand_file_names() {
        let renderer = MarkdownRenderer::new();
        let paths = PathSets::from_paths(["README.md", "docs/q&a.md"]);
        let resolver = LinkResolver::new(&paths, "", "main");

        let html = renderer
            .render_with_links("[Q and A](docs/q&a.md)", &resolver, "README.md")
            .expect("Should render");

        assert!(html.contains(r#"href="blob/main/docs/q%26a.md.html""#), "{}", html);
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("README.md"));
        assert!(is_markdown("docs/Guide.MD"));
        assert!(is_markdown("notes.markdown"));
        assert!(!is_markdown("src/main.rs"));
        assert!(!is_markdown("md"));
    }

    #[test]
    fn test_code_block_entities_are_not_double_escaped() {
        let renderer = MarkdownRenderer::new();

        let html = renderer
            .render("```rust\nlet ok = a < b && c;\n```\n")
            .expect("Should render");

        assert!(!html.contains("&amp;lt;"), "{}", html);
        assert!(!html.contains("&amp;amp;"), "{}", html);
    }
}
