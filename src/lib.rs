//! Static site generator for Git repositories.
//!
//! Renders one ref of a repository into plain HTML: a page per tracked
//! file, a page per directory, the commit log with ref badges, the tag list
//! and a landing page. Markdown documents have their repository links
//! rewritten so they keep working inside the generated site.

mod assets;
pub mod components;
mod config;
mod git;
mod highlight;
mod logging;
mod markdown;
pub mod pages;
pub mod path;
mod refs;
mod site;
mod tree;
mod util;

pub use assets::write_css_assets;
pub use config::Config;
pub use git::{
    CommitInfo, FileEntry, RepoInfo, TagInfo, analyze_repository, list_commits, list_files,
    list_tags, open_shared, read_blob_by_id, ref_decorations,
};
pub use highlight::{Highlighter, ThemeTone, theme_css, theme_names, theme_tone};
pub use logging::init_logging;
pub use markdown::{
    LinkResolver, MarkdownRenderer, PathSets, build_dir_set, build_file_set, is_markdown, resolve,
};
pub use refs::{RefKind, RefName, parse_ref_names};
pub use site::{SiteStats, generate_site};
pub use tree::FileTree;
pub use util::{format_file_size, format_relative_time, is_binary};
