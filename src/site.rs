//! Site generation: renders every page of one ref into the output directory.
//!
//! The tree listing is read once. Path sets, directory tree and renderers
//! are built from it and then shared read only by the rayon workers that
//! render blob and directory pages. A page that fails to render is logged
//! and skipped; failing to write output aborts the run.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::assets::write_css_assets;
use crate::config::Config;
use crate::git::{FileEntry, analyze_repository, list_commits, list_files, list_tags, open_shared};
use crate::highlight::Highlighter;
use crate::markdown::{MarkdownRenderer, PathSets};
use crate::pages::{
    self, INDEX_PAGE, SiteContext, TAGS_PAGE, blob_page_path, commits_page_path, dir_page_path,
    raw_path,
};
use crate::tree::FileTree;

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    pub blob_pages: usize,
    pub dir_pages: usize,
    pub skipped: usize,
    pub commits: usize,
    pub tags: usize,
}

enum Outcome {
    Written,
    Skipped,
}

/// Generates the static site described by `config`.
///
/// # Errors
///
/// Returns error if the repository or the ref cannot be read, the theme is
/// unknown, or any output file cannot be written.
pub fn generate_site(config: &Config) -> Result<SiteStats> {
    let repo_info = analyze_repository(&config.repo, config.owner.clone())
        .context("Failed to analyze repository")?;
    let ref_name = config
        .branch
        .clone()
        .unwrap_or_else(|| repo_info.default_branch().to_string());
    let repo_name = config
        .project_name()
        .context("Failed to determine project name")?;

    info!(repo = %config.repo.display(), branch = %ref_name, "Generating site");

    let files = list_files(&config.repo, Some(&ref_name))
        .with_context(|| format!("Failed to list files at {}", ref_name))?;
    let paths = PathSets::from_entries(&files);
    let tree = FileTree::from_files(&files);
    let markdown = MarkdownRenderer::new();
    let highlighter = Highlighter::new();

    let ctx = SiteContext {
        repo_name: &repo_name,
        owner: repo_info.owner(),
        ref_name: &ref_name,
        paths: &paths,
        markdown: &markdown,
        highlighter: &highlighter,
    };

    let output = config.output.as_path();
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    write_css_assets(&output.join("assets"), &config.theme)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("Failed to build worker pool")?;

    let dirs = tree.all_dirs();
    let dir_page_paths: HashSet<String> = dirs
        .iter()
        .map(|dir| dir_page_path(&ref_name, dir))
        .collect();
    let progress = progress_bar((files.len() + dirs.len()) as u64, config.quiet)?;

    let shared_repo = open_shared(&config.repo)?;
    let (blob_outcomes, dir_pages) = pool.install(|| -> Result<(Vec<Outcome>, usize)> {
        let blob_outcomes = files
            .par_iter()
            .map_init(
                || shared_repo.to_thread_local(),
                |repo, entry| {
                    let outcome = write_file_pages(&ctx, repo, entry, &dir_page_paths, output);
                    progress.inc(1);
                    outcome
                },
            )
            .collect::<Result<Vec<_>>>()?;

        dirs.par_iter()
            .map(|dir| {
                let html = pages::tree::generate(&ctx, &tree, dir);
                progress.inc(1);
                write_page(output, &dir_page_path(&ref_name, dir), &html.into_string())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((blob_outcomes, dirs.len()))
    })?;
    progress.finish_and_clear();

    let blob_pages = blob_outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Written))
        .count();
    let skipped = blob_outcomes.len() - blob_pages;

    let commits = list_commits(&config.repo, Some(&ref_name), Some(config.commit_limit))
        .with_context(|| format!("Failed to list commits of {}", ref_name))?;
    let commits_html = pages::commits::generate(&commits, &ref_name, &repo_name);
    write_page(output, &commits_page_path(&ref_name), &commits_html.into_string())?;

    let tags = list_tags(&config.repo).context("Failed to list tags")?;
    let tags_html = pages::tags::generate(&repo_name, &tags);
    write_page(output, TAGS_PAGE, &tags_html.into_string())?;

    let readme = render_landing_readme(&ctx, &shared_repo.to_thread_local(), &files);
    let index_html = pages::index::generate(
        &ctx,
        pages::index::IndexPageData {
            tree: &tree,
            latest_commit: commits.first(),
            commit_count: commits.len(),
            tag_count: tags.len(),
            readme: readme
                .as_ref()
                .map(|(path, html)| (path.as_str(), html.as_str())),
        },
    );
    write_page(output, INDEX_PAGE, &index_html.into_string())?;

    let stats = SiteStats {
        blob_pages,
        dir_pages,
        skipped,
        commits: commits.len(),
        tags: tags.len(),
    };
    info!(
        blob_pages = stats.blob_pages,
        dir_pages = stats.dir_pages,
        skipped = stats.skipped,
        commits = stats.commits,
        tags = stats.tags,
        output = %output.display(),
        "Site generated"
    );

    Ok(stats)
}

/// Writes the raw copy and the rendered page of one tracked file.
///
/// A file named `index` shares its page path with the directory page of
/// its parent; the directory page wins and only the raw copy is written.
fn write_file_pages(
    ctx: &SiteContext<'_>,
    repo: &gix::Repository,
    entry: &FileEntry,
    dir_pages: &HashSet<String>,
    output: &Path,
) -> Result<Outcome> {
    let Some(file_path) = entry.path_str() else {
        warn!(oid = %entry.oid_hex(), "Skipping file with non UTF8 path");
        return Ok(Outcome::Skipped);
    };

    let content = match crate::git::read_blob_by_id(repo, *entry.oid()) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = file_path, error = %format!("{:#}", err), "Skipping unreadable blob");
            return Ok(Outcome::Skipped);
        }
    };

    write_output(output, &raw_path(ctx.ref_name, file_path), &content)?;

    let page_path = blob_page_path(ctx.ref_name, file_path);
    if dir_pages.contains(&page_path) {
        warn!(
            path = file_path,
            page = %page_path,
            "Blob page collides with directory page, keeping directory page"
        );
        return Ok(Outcome::Skipped);
    }

    match pages::blob::generate(ctx, file_path, &content) {
        Ok(html) => {
            write_page(output, &page_path, &html.into_string())?;
            debug!(path = file_path, "Rendered blob page");
            Ok(Outcome::Written)
        }
        Err(err) => {
            warn!(path = file_path, error = %format!("{:#}", err), "Skipping blob page");
            Ok(Outcome::Skipped)
        }
    }
}

/// Reads and renders the landing page README, if any.
fn render_landing_readme(
    ctx: &SiteContext<'_>,
    repo: &gix::Repository,
    files: &[FileEntry],
) -> Option<(String, String)> {
    let entry = pages::index::find_readme(files)?;
    let readme_path = entry.path_str()?;

    let rendered = crate::git::read_blob_by_id(repo, *entry.oid())
        .and_then(|content| pages::index::render_readme(ctx, readme_path, &content));

    match rendered {
        Ok(html) => Some((readme_path.to_string(), html)),
        Err(err) => {
            warn!(path = readme_path, error = %format!("{:#}", err), "Skipping README");
            None
        }
    }
}

fn progress_bar(len: u64, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} Rendering [{bar:40.cyan/blue}] {pos}/{len}")
            .context("Invalid progress template")?
            .progress_chars("█▓░"),
    );
    Ok(bar)
}

fn write_page(output: &Path, relative: &str, html: &str) -> Result<()> {
    write_output(output, relative, html.as_bytes())
}

fn write_output(output: &Path, relative: &str, content: &[u8]) -> Result<()> {
    let target = output.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&target, content).with_context(|| format!("Failed to write {}", target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_creates_parents() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp directory");

        // Act
        write_page(dir.path(), "blob/fix/bug/src/lib.rs.html", "<html></html>")
            .expect("Should write page");

        // Assert
        let written = fs::read_to_string(dir.path().join("blob/fix/bug/src/lib.rs.html"))
            .expect("Should read page");
        assert_eq!(written, "<html></html>");
    }

    #[test]
    fn test_progress_bar_hidden_when_quiet() {
        let bar = progress_bar(10, true).expect("Should build bar");

        assert!(bar.is_hidden());
    }
}
