//! Syntax highlighting with syntect.
//!
//! Highlighting emits CSS classes rather than inline styles; the colors come
//! from a stylesheet generated once per site from the configured theme.

use anyhow::{Context, Result};
use std::path::Path;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Class naming shared by source pages and markdown code blocks.
pub(crate) const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Source code highlighter for blob pages.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    /// Creates highlighter with bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlights a source file to classed HTML.
    ///
    /// The syntax is chosen by file extension, then by the first line
    /// (shebangs, modelines), falling back to plain text. Output keeps the
    /// input's line structure so a line number gutter can sit next to it.
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails to parse a line
    pub fn highlight(&self, code: &str, path: &Path) -> Result<String> {
        let syntax = self.detect_syntax(code, path);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .with_context(|| format!("Failed to highlight {}", path.display()))?;
        }

        Ok(generator.finalize())
    }

    fn detect_syntax(&self, code: &str, path: &Path) -> &SyntaxReference {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.syntax_set.find_syntax_by_extension(ext))
            .or_else(|| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| self.syntax_set.find_syntax_by_extension(name))
            })
            .or_else(|| self.syntax_set.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the bundled syntect themes, sorted.
pub fn theme_names() -> Vec<String> {
    let mut names: Vec<String> = ThemeSet::load_defaults().themes.into_keys().collect();
    names.sort();
    names
}

/// Whether a theme paints code on a light or a dark background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeTone {
    Light,
    Dark,
}

fn load_theme(theme_name: &str) -> Result<Theme> {
    let mut themes = ThemeSet::load_defaults();
    themes.themes.remove(theme_name).with_context(|| {
        format!(
            "Unknown theme '{}', available: {}",
            theme_name,
            theme_names().join(", ")
        )
    })
}

/// Generates the highlight stylesheet for a bundled theme.
///
/// # Errors
///
/// Returns error if the theme is unknown or CSS generation fails
pub fn theme_css(theme_name: &str) -> Result<String> {
    let theme = load_theme(theme_name)?;

    css_for_theme_with_class_style(&theme, CLASS_STYLE)
        .with_context(|| format!("Failed to generate CSS for theme {}", theme_name))
}

/// Tone of a bundled theme, judged by the luminance of its background.
///
/// Themes that declare no background count as light.
///
/// # Errors
///
/// Returns error if the theme is unknown
pub fn theme_tone(theme_name: &str) -> Result<ThemeTone> {
    Ok(tone_of(load_theme(theme_name)?.settings.background))
}

fn tone_of(background: Option<Color>) -> ThemeTone {
    match background {
        Some(color) if relative_luminance(color) < 0.5 => ThemeTone::Dark,
        _ => ThemeTone::Light,
    }
}

fn relative_luminance(color: Color) -> f32 {
    (0.2126 * f32::from(color.r) + 0.7152 * f32::from(color.g) + 0.0722 * f32::from(color.b))
        / 255.0
}

/// Number of lines a highlighted file occupies in the gutter.
pub fn line_count(code: &str) -> usize {
    LinesWithEndings::from(code).count()
}
