//! In-memory directory tree for directory page listings.

use crate::FileEntry;
use std::collections::BTreeMap;

/// Repository directory tree built from a flat tree listing.
///
/// Directory pages need the immediate children of each directory; this
/// answers that in O(depth) instead of scanning the whole listing per page.
///
/// # Examples
///
/// ```no_run
/// use gitshelf::{FileTree, list_files};
/// use std::path::Path;
///
/// let files = list_files(Path::new("."), None)?;
/// let tree = FileTree::from_files(&files);
///
/// let root_files = tree.files_at("");
/// let src_subdirs = tree.subdirs_at("src");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    root: DirNode,
}

#[derive(Debug, Clone, Default)]
struct DirNode {
    files: Vec<FileEntry>,
    subdirs: BTreeMap<String, DirNode>,
}

impl FileTree {
    /// Builds tree from flat file list in single pass.
    ///
    /// Entries with non UTF8 paths are skipped. Files within a directory
    /// keep listing order sorted by name.
    pub fn from_files(files: &[FileEntry]) -> Self {
        let mut root = DirNode::default();

        for file in files {
            let Some(path) = file.path_str() else {
                continue;
            };

            let mut current = &mut root;
            let mut components = path.split('/').peekable();
            while let Some(component) = components.next() {
                if components.peek().is_none() {
                    current.files.push(file.clone());
                } else {
                    current = current.subdirs.entry(component.to_string()).or_default();
                }
            }
        }

        root.sort_files();
        Self { root }
    }

    /// Files directly inside `dir_path` (empty string for root).
    pub fn files_at(&self, dir_path: &str) -> &[FileEntry] {
        self.get_node(dir_path)
            .map(|node| node.files.as_slice())
            .unwrap_or(&[])
    }

    /// Names of immediate subdirectories, sorted.
    pub fn subdirs_at(&self, dir_path: &str) -> Vec<&str> {
        self.get_node(dir_path)
            .map(|node| node.subdirs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All directory paths including the root (`""`), sorted.
    pub fn all_dirs(&self) -> Vec<String> {
        let mut dirs = Vec::new();
        Self::collect_dirs(&self.root, String::new(), &mut dirs);
        dirs.sort();
        dirs
    }

    fn get_node(&self, dir_path: &str) -> Option<&DirNode> {
        if dir_path.is_empty() {
            return Some(&self.root);
        }

        let mut current = &self.root;
        for component in dir_path.split('/') {
            current = current.subdirs.get(component)?;
        }
        Some(current)
    }

    fn collect_dirs(node: &DirNode, path: String, dirs: &mut Vec<String>) {
        for (name, subdir) in &node.subdirs {
            let subpath = if path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", path, name)
            };
            Self::collect_dirs(subdir, subpath, dirs);
        }
        dirs.push(path);
    }
}

impl DirNode {
    fn sort_files(&mut self) {
        self.files.sort_by(|a, b| a.path_str().cmp(&b.path_str()));
        for subdir in self.subdirs.values_mut() {
            subdir.sort_files();
        }
    }
}
