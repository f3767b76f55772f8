//! Link resolution for repository internal references.
//!
//! Rendered documents link to files the way an author sees them on disk
//! (`../docs/faq.md`, `tutorial/`, `/README.md`). Inside the generated site
//! those targets live under `blob/<ref>/...` as rendered pages and under
//! `raw/<ref>/...` as verbatim bytes. [`LinkResolver`] rewrites anchor
//! `href` and image `src` attributes accordingly, using [`PathSets`] to tell
//! files, extensionless markdown links and directories apart.

use html_escape::decode_html_entities;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::collections::HashSet;

use super::href::Href;
use crate::git::FileEntry;
use crate::path;

/// Membership sets derived from a tree listing.
///
/// Built once per (ref, tree) snapshot and read only afterwards, so a single
/// instance can be shared by every page rendered from that snapshot.
#[derive(Debug, Clone, Default)]
pub struct PathSets {
    files: HashSet<String>,
    dirs: HashSet<String>,
}

impl PathSets {
    /// Builds both sets from repository relative paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = build_file_set(paths);
        let dirs = build_dir_set(&files);
        Self { files, dirs }
    }

    /// Builds both sets from a tree listing.
    ///
    /// Entries whose path is not valid UTF8 cannot be linked to and are
    /// left out.
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        Self::from_paths(entries.iter().filter_map(FileEntry::path_str))
    }

    /// Exact file paths.
    pub fn files(&self) -> &HashSet<String> {
        &self.files
    }

    /// Every strict ancestor directory of a tracked file, root excluded.
    pub fn dirs(&self) -> &HashSet<String> {
        &self.dirs
    }

    /// Maps a repository path to the rendered page that represents it.
    ///
    /// Precedence: an exact file, then the same path with `.md` appended,
    /// then a directory index. Unknown paths yield `None`.
    fn page_for(&self, repo_path: &str) -> Option<String> {
        if self.files.contains(repo_path) {
            return Some(format!("{}.html", repo_path));
        }
        if self.files.contains(&format!("{}.md", repo_path)) {
            return Some(format!("{}.md.html", repo_path));
        }
        if self.dirs.contains(repo_path) {
            return Some(path::join(&[repo_path, "index.html"]));
        }
        None
    }
}

/// Collects file paths, collapsing duplicates.
pub fn build_file_set<I, S>(paths: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| path.as_ref().to_string())
        .collect()
}

/// Collects every strict ancestor directory of the given file paths.
///
/// Walks up from each file's directory and stops early at the first
/// ancestor already recorded, since that ancestor's own ancestors were
/// recorded together with it. The repository root is never included.
pub fn build_dir_set<I, S>(paths: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut dirs = HashSet::new();

    for file in paths {
        let parent = path::dir(file.as_ref());
        let mut dir = parent.as_str();

        while !matches!(dir, "" | "." | "/") {
            if !dirs.insert(dir.to_string()) {
                break;
            }
            match dir.rfind('/') {
                Some(idx) => dir = &dir[..idx],
                None => break,
            }
        }
    }

    dirs
}

/// Rewrites links inside rendered HTML so they resolve within the site.
///
/// Holds the per page context: the snapshot's [`PathSets`], the relative
/// href from the page back to the site root, and the ref whose pages are
/// being generated.
///
/// # Examples
///
/// ```
/// use gitshelf::{LinkResolver, PathSets};
///
/// let paths = PathSets::from_paths(["README.md", "docs/intro.md", "docs/faq.md"]);
/// let resolver = LinkResolver::new(&paths, "../../", "main");
///
/// let html = resolver.resolve(r#"<a href="faq">FAQ</a>"#, "docs/intro.md");
/// assert_eq!(html, r#"<a href="../../blob/main/docs/faq.md.html">FAQ</a>"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    paths: &'a PathSets,
    root_href: &'a str,
    ref_name: &'a str,
}

impl<'a> LinkResolver<'a> {
    /// Creates a resolver for pages of one ref.
    ///
    /// # Arguments
    ///
    /// * `paths`: Path sets of the ref's tree
    /// * `root_href`: Relative href from the current page to the site root,
    ///   used verbatim
    /// * `ref_name`: Branch, tag or commit used in `blob/` and `raw/` URLs
    pub fn new(paths: &'a PathSets, root_href: &'a str, ref_name: &'a str) -> Self {
        Self {
            paths,
            root_href,
            ref_name,
        }
    }

    /// Rewrites every `<a href>` and `<img src>` in `content`.
    ///
    /// Attribute values are entity decoded before they are classified, so
    /// `a&amp;b.md` resolves against the tracked file `a&b.md`.
    ///
    /// `current_path` is the repository path of the document the content
    /// was rendered from; relative links resolve against its directory.
    /// Only the first occurrence of the attribute on an element is
    /// considered. Everything else passes through untouched. If the
    /// document cannot be rewritten the original content is returned.
    pub fn resolve(&self, content: &str, current_path: &str) -> String {
        let base_dir = path::dir(current_path);

        let element_content_handlers = vec![
            element!("a[href]", |el| {
                if let Some(raw) = el.get_attribute("href") {
                    let href = decode_html_entities(&raw);
                    let rewritten = self.rewrite_href(&href, &base_dir);
                    if rewritten != href {
                        el.set_attribute("href", &rewritten)?;
                    }
                }
                Ok(())
            }),
            element!("img[src]", |el| {
                if let Some(raw) = el.get_attribute("src") {
                    let src = decode_html_entities(&raw);
                    let rewritten = self.rewrite_src(&src, &base_dir);
                    if rewritten != src {
                        el.set_attribute("src", &rewritten)?;
                    }
                }
                Ok(())
            }),
        ];

        let settings = RewriteStrSettings {
            element_content_handlers,
            ..RewriteStrSettings::default()
        };

        match rewrite_str(content, settings) {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(path = current_path, error = %err, "Link rewriting skipped");
                content.to_string()
            }
        }
    }

    /// Rewrites a single anchor href.
    ///
    /// Empty values, fragments, URLs with a scheme or authority, malformed
    /// values and paths that match nothing in the tree come back unchanged.
    /// Known targets become `root/blob/ref/<page>` with the original query
    /// and fragment re-attached.
    ///
    /// # Arguments
    ///
    /// * `href`: Attribute value as authored
    /// * `base_dir`: Repository directory of the current document
    pub fn rewrite_href(&self, href: &str, base_dir: &str) -> String {
        if href.is_empty() || href.starts_with('#') {
            return href.to_string();
        }

        let Some(parsed) = Href::parse(href) else {
            return href.to_string();
        };
        if parsed.is_external() || parsed.path().is_empty() {
            return href.to_string();
        }

        let repo_path = repo_path(parsed.path(), base_dir);
        match self.paths.page_for(&repo_path) {
            Some(page) => {
                parsed.with_path(&path::join(&[self.root_href, "blob", self.ref_name, &page]))
            }
            None => href.to_string(),
        }
    }

    /// Rewrites a single image src to the raw copy of the blob.
    ///
    /// Images are always served verbatim, so no tree lookup happens: every
    /// relative or root relative path maps to `root/raw/ref/<path>`.
    pub fn rewrite_src(&self, src: &str, base_dir: &str) -> String {
        let Some(parsed) = Href::parse(src) else {
            return src.to_string();
        };
        // An empty path names no blob; `src=""` and `src="?v=1"` stay as authored.
        if parsed.is_external() || parsed.path().is_empty() {
            return src.to_string();
        }

        let repo_path = repo_path(parsed.path(), base_dir);
        parsed.with_path(&path::join(&[self.root_href, "raw", self.ref_name, &repo_path]))
    }
}

/// Resolves a link path to a repository path.
///
/// A leading `/` anchors the path at the repository root; anything else is
/// relative to `base_dir`.
fn repo_path(link_path: &str, base_dir: &str) -> String {
    match link_path.strip_prefix('/') {
        Some(rooted) => path::clean(rooted),
        None => path::join(&[base_dir, link_path]),
    }
}

/// Rewrites links in `content` for one page.
///
/// Convenience wrapper around [`LinkResolver::resolve`].
pub fn resolve(
    content: &str,
    current_path: &str,
    root_href: &str,
    ref_name: &str,
    paths: &PathSets,
) -> String {
    LinkResolver::new(paths, root_href, ref_name).resolve(content, current_path)
}
