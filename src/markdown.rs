//! Markdown rendering and link rewriting.
//!
//! Markdown is rendered with comrak using GitHub Flavored Markdown
//! extensions. The resulting HTML then goes through the link resolver so
//! repository internal references point at generated pages.

mod href;
mod links;
mod renderer;

pub use links::{LinkResolver, PathSets, build_dir_set, build_file_set, resolve};
pub use renderer::{MarkdownRenderer, is_markdown};
