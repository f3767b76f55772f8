//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

use crate::highlight::{ThemeTone, theme_css, theme_tone};

const BASE: &str = include_str!("../assets/base.css");
const PALETTE_DARK: &str = include_str!("../assets/palette-dark.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const NAV: &str = include_str!("../assets/components/nav.css");
const FILE_LIST: &str = include_str!("../assets/components/file-list.css");

const INDEX_PAGE: &str = include_str!("../assets/page-index.css");
const TREE_PAGE: &str = include_str!("../assets/page-tree.css");
const BLOB_PAGE: &str = include_str!("../assets/page-blob.css");
const COMMITS_PAGE: &str = include_str!("../assets/page-commits.css");
const TAGS_PAGE: &str = include_str!("../assets/page-tags.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");
const MARKDOWN_DARK: &str = include_str!("../assets/markdown-dark.css");

/// Writes all bundled CSS assets plus the theme stylesheet
///
/// Page and markdown styles follow the theme's tone so highlighted code
/// never sits on a page of the opposite brightness.
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written
pub fn write_css_assets(assets_dir: &Path, theme: &str) -> Result<()> {
    let tone = theme_tone(theme)?;
    debug!(theme, ?tone, "Writing CSS assets");

    let (palette, markdown) = match tone {
        ThemeTone::Light => ("", ""),
        ThemeTone::Dark => (PALETTE_DARK, MARKDOWN_DARK),
    };

    fs::create_dir_all(assets_dir)
        .with_context(|| format!("Failed to create {}", assets_dir.display()))?;

    write_bundled(
        assets_dir,
        "index.css",
        &[BASE, palette, LAYOUT, FILE_LIST, INDEX_PAGE],
    )?;
    write_bundled(
        assets_dir,
        "tree.css",
        &[BASE, palette, LAYOUT, NAV, FILE_LIST, TREE_PAGE],
    )?;
    write_bundled(
        assets_dir,
        "blob.css",
        &[BASE, palette, LAYOUT, NAV, BLOB_PAGE],
    )?;
    write_bundled(
        assets_dir,
        "commits.css",
        &[BASE, palette, LAYOUT, NAV, COMMITS_PAGE],
    )?;
    write_bundled(
        assets_dir,
        "tags.css",
        &[BASE, palette, LAYOUT, NAV, FILE_LIST, TAGS_PAGE],
    )?;
    write_bundled(assets_dir, "markdown.css", &[MARKDOWN, markdown])?;
    write_bundled(assets_dir, "highlight.css", &[&theme_css(theme)?])?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
