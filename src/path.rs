//! Lexical path helpers for repository paths and generated page locations.
//!
//! All functions operate on `/` separated strings and never touch the
//! filesystem. Repository paths from git and generated hrefs both use
//! forward slashes on every platform.

/// Lexically cleans a slash separated path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. A rooted path stays rooted and cannot
/// climb above `/`; a relative path keeps leading `..` segments it cannot
/// resolve. The empty path cleans to `"."`.
///
/// # Examples
///
/// ```
/// use gitshelf::path::clean;
///
/// assert_eq!(clean("docs/./guide/../intro.md"), "docs/intro.md");
/// assert_eq!(clean("../../blob//main/"), "../../blob/main");
/// assert_eq!(clean(""), ".");
/// ```
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Returns the directory portion of a path, cleaned.
///
/// A path without any separator lives in `"."`.
pub fn dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean(&path[..=idx]),
        None => ".".to_string(),
    }
}

/// Joins path elements with `/` and cleans the result.
///
/// Empty elements are ignored. Joining nothing but empty elements yields
/// the empty string, which lets an empty root href disappear from links
/// emitted on pages that sit at the site root.
pub fn join(parts: &[&str]) -> String {
    let non_empty: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if non_empty.is_empty() {
        return String::new();
    }
    clean(&non_empty.join("/"))
}

/// Counts how many directory levels an output page sits below the site root.
///
/// Accounts for slashes in reference names (e.g. `fix/bug`) because the
/// reference is embedded verbatim in `blob/<ref>/...` output paths.
///
/// # Arguments
///
/// * `output_path`: Page location relative to the site root
pub fn depth(output_path: &str) -> usize {
    output_path.matches('/').count()
}

/// Relative href from a generated page back to the site root.
///
/// # Examples
///
/// ```
/// use gitshelf::path::root_href;
///
/// assert_eq!(root_href("index.html"), "");
/// assert_eq!(root_href("blob/main/docs/intro.md.html"), "../../../");
/// ```
pub fn root_href(output_path: &str) -> String {
    "../".repeat(depth(output_path))
}
