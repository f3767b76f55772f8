//! Git repository operations.

use anyhow::{Context, Result};
use gix::bstr::{BString, ByteSlice};
use std::collections::HashMap;
use std::path::Path;

use crate::refs::{RefName, parse_ref_names};

/// File entry in repository tree.
#[derive(Debug, Clone)]
pub struct FileEntry {
    path: BString,
    oid: gix::ObjectId,
}

impl FileEntry {
    /// File path relative to repository root as UTF8, forward slash separated.
    pub fn path_str(&self) -> Option<&str> {
        self.path.to_str().ok()
    }

    /// Git object ID.
    pub fn oid(&self) -> &gix::ObjectId {
        &self.oid
    }

    /// Git object ID as hexadecimal string.
    pub fn oid_hex(&self) -> String {
        self.oid.to_hex().to_string()
    }
}

/// Repository metadata.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    default_branch: String,
    owner: Option<String>,
}

impl RepoInfo {
    /// Branch HEAD points at, `main` for detached or unborn heads.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Repository owner.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Commit metadata.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    oid: String,
    short_oid: String,
    author: String,
    author_email: String,
    committer: String,
    date: i64,
    message: String,
    message_full: String,
    ref_names: Vec<RefName>,
}

impl CommitInfo {
    /// Full commit hash.
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// Short commit hash (7 characters).
    pub fn short_oid(&self) -> &str {
        &self.short_oid
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Author email.
    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Committer name.
    pub fn committer(&self) -> &str {
        &self.committer
    }

    /// Commit timestamp (Unix seconds).
    pub fn date(&self) -> i64 {
        self.date
    }

    /// First line of commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full commit message.
    pub fn message_full(&self) -> &str {
        &self.message_full
    }

    /// References pointing at this commit, in decoration order.
    pub fn ref_names(&self) -> &[RefName] {
        &self.ref_names
    }
}

/// Tag metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub commit_hash: String,
    pub short_oid: String,
    /// Committer time of the tagged commit (Unix seconds).
    pub date: i64,
}

fn open_repository(path: &Path) -> Result<gix::Repository> {
    gix::open(path).with_context(|| format!("Failed to open repository at {}", path.display()))
}

/// Opens a repository handle that can be shared across threads.
///
/// Each worker turns it into a thread local handle with
/// `to_thread_local`, which keeps object caches per thread.
///
/// # Errors
///
/// Returns error if the path is not a git repository.
pub fn open_shared(path: impl AsRef<Path>) -> Result<gix::ThreadSafeRepository> {
    Ok(open_repository(path.as_ref())?.into_sync())
}

/// Reads the branch HEAD points at.
///
/// # Arguments
///
/// * `path`: Repository path
/// * `owner`: Optional owner name
///
/// # Errors
///
/// Returns error if repository cannot be opened or read.
pub fn analyze_repository(path: impl AsRef<Path>, owner: Option<String>) -> Result<RepoInfo> {
    let repo = open_repository(path.as_ref())?;

    let default_branch = repo
        .head_name()
        .context("Failed to read HEAD reference")?
        .and_then(|name| name.shorten().to_str().ok().map(|s| s.to_string()))
        .unwrap_or_else(|| "main".to_string());

    Ok(RepoInfo {
        default_branch,
        owner,
    })
}

/// Resolves reference to commit object.
fn resolve_commit<'a>(
    repo: &'a gix::Repository,
    ref_name: Option<&str>,
) -> Result<gix::Commit<'a>> {
    match ref_name {
        Some(ref_str) => repo
            .find_reference(ref_str)
            .with_context(|| format!("Failed to find reference: {}", ref_str))?
            .into_fully_peeled_id()
            .with_context(|| format!("Failed to peel reference '{}'", ref_str))?
            .object()
            .context("Failed to resolve object")?
            .try_into_commit()
            .map_err(|_| anyhow::anyhow!("Reference '{}' does not point to a commit", ref_str)),
        None => repo.head_commit().context("Failed to read HEAD commit"),
    }
}

/// Reads blob content by object ID.
///
/// Used during site generation where the tree listing already carries the
/// object IDs and the repository handle is reused across files.
///
/// # Errors
///
/// Returns error if the object is missing or is not a blob.
pub fn read_blob_by_id(repo: &gix::Repository, oid: gix::ObjectId) -> Result<Vec<u8>> {
    let object = repo
        .find_object(oid)
        .with_context(|| format!("Failed to read object {}", oid))?;

    let blob = object
        .try_into_blob()
        .map_err(|_| anyhow::anyhow!("Object is not a blob: {}", oid))?;

    Ok(blob.data.to_vec())
}

/// Lists all files in repository at given reference.
///
/// Traverses the tree breadth first and returns regular and executable
/// files. Directories, symlinks and submodule entries are skipped.
///
/// # Arguments
///
/// * `repo_path`: Path to git repository
/// * `ref_name`: Reference name (branch/tag/commit), defaults to HEAD if None
///
/// # Errors
///
/// Returns error if:
/// - Repository cannot be opened
/// - Reference cannot be resolved
/// - Tree cannot be traversed
///
/// # Examples
///
/// ```no_run
/// use gitshelf::list_files;
/// use std::path::Path;
///
/// let files = list_files(Path::new("."), None)?;
/// for entry in files {
///     if let Some(path) = entry.path_str() {
///         println!("{}: {}", path, entry.oid_hex());
///     }
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn list_files(repo_path: impl AsRef<Path>, ref_name: Option<&str>) -> Result<Vec<FileEntry>> {
    let repo = open_repository(repo_path.as_ref())?;
    let commit = resolve_commit(&repo, ref_name)?;
    let tree = commit.tree().context("Failed to read commit tree")?;

    let files = tree
        .traverse()
        .breadthfirst
        .files()
        .context("Failed to traverse tree")?
        .into_iter()
        .filter(|entry| entry.mode.is_blob())
        .map(|entry| FileEntry {
            path: entry.filepath,
            oid: entry.oid,
        })
        .collect();

    Ok(files)
}

/// Builds ref decoration strings keyed by the commit they decorate.
///
/// Produces the same shape `git log --format=%D` prints: `HEAD -> branch`
/// (or a bare `HEAD` when detached) first, then local branches, remote
/// tracking refs with symbolic remote heads written as
/// `origin/HEAD -> origin/main`, then `tag: name` entries. Annotated tags
/// decorate the commit they point to.
///
/// # Errors
///
/// Returns error if HEAD or the reference store cannot be read.
pub fn ref_decorations(repo: &gix::Repository) -> Result<HashMap<gix::ObjectId, String>> {
    let mut tokens: HashMap<gix::ObjectId, Vec<String>> = HashMap::new();

    let head = repo.head().context("Failed to read HEAD")?;
    let head_branch = head
        .referent_name()
        .map(|name| name.shorten().to_str_lossy().into_owned());

    if let Some(id) = head.id() {
        let token = match &head_branch {
            Some(branch) if !head.is_detached() => format!("HEAD -> {}", branch),
            _ => "HEAD".to_string(),
        };
        tokens.entry(id.detach()).or_default().push(token);
    }

    let references = repo.references().context("Failed to read references")?;

    for mut reference in references
        .local_branches()
        .context("Failed to get local branches")?
        .filter_map(Result::ok)
    {
        let name = reference.name().shorten().to_str_lossy().into_owned();
        if head_branch.as_deref() == Some(name.as_str()) {
            continue;
        }
        if let Ok(id) = reference.peel_to_id_in_place() {
            tokens.entry(id.detach()).or_default().push(name);
        }
    }

    for mut reference in references
        .remote_branches()
        .context("Failed to get remote branches")?
        .filter_map(Result::ok)
    {
        let name = reference.name().shorten().to_str_lossy().into_owned();
        let token = match reference.target() {
            gix::refs::TargetRef::Symbolic(target) => {
                format!("{} -> {}", name, target.shorten().to_str_lossy())
            }
            gix::refs::TargetRef::Peeled(_) => name,
        };
        if let Ok(id) = reference.peel_to_id_in_place() {
            tokens.entry(id.detach()).or_default().push(token);
        }
    }

    for mut reference in references
        .tags()
        .context("Failed to get tags")?
        .filter_map(Result::ok)
    {
        let name = reference.name().shorten().to_str_lossy().into_owned();
        if let Ok(id) = reference.peel_to_id_in_place() {
            tokens
                .entry(id.detach())
                .or_default()
                .push(format!("tag: {}", name));
        }
    }

    Ok(tokens
        .into_iter()
        .map(|(id, tokens)| (id, tokens.join(", ")))
        .collect())
}

/// Lists commits for a given reference in reverse chronological order.
///
/// Each commit carries the references decorating it, parsed from the same
/// decoration format git prints.
///
/// # Arguments
///
/// * `repo_path`: Path to git repository
/// * `ref_name`: Reference name (branch/tag/commit), defaults to HEAD if None
/// * `limit`: Optional limit on number of commits to retrieve
///
/// # Errors
///
/// Returns error if:
/// - Repository cannot be opened
/// - Reference cannot be resolved
/// - Commit traversal fails
///
/// # Examples
///
/// ```no_run
/// use gitshelf::list_commits;
/// use std::path::Path;
///
/// let commits = list_commits(Path::new("."), None, Some(10))?;
/// for commit in commits {
///     println!("{}: {}", commit.short_oid(), commit.message());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn list_commits(
    repo_path: impl AsRef<Path>,
    ref_name: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<CommitInfo>> {
    let repo = open_repository(repo_path.as_ref())?;
    let commit = resolve_commit(&repo, ref_name)?;
    let decorations = ref_decorations(&repo)?;

    let mut commits = Vec::new();
    let walker = commit
        .ancestors()
        .all()
        .context("Failed to create commit ancestor iterator")?;

    for (idx, result) in walker.enumerate() {
        if let Some(max) = limit
            && idx >= max
        {
            break;
        }

        let commit_info = result.context("Failed to traverse commit ancestor")?;
        let commit_obj = commit_info
            .object()
            .context("Failed to read commit object")?;

        let author = commit_obj.author().context("Failed to read author")?;
        let committer = commit_obj.committer().context("Failed to read committer")?;
        let message_bytes = commit_obj
            .message_raw()
            .context("Failed to read commit message")?;
        let message_full = message_bytes.to_str_lossy().to_string();
        let first_line = message_full.lines().next().unwrap_or("").to_string();

        let ref_names = decorations
            .get(&commit_obj.id)
            .map(|decoration| parse_ref_names(decoration))
            .unwrap_or_default();

        commits.push(CommitInfo {
            oid: commit_obj.id.to_hex().to_string(),
            short_oid: commit_obj.id.to_hex_with_len(7).to_string(),
            author: author.name.to_str_lossy().to_string(),
            author_email: author.email.to_str_lossy().to_string(),
            committer: committer.name.to_str_lossy().to_string(),
            date: author.time.seconds,
            message: first_line,
            message_full,
            ref_names,
        });
    }

    Ok(commits)
}

/// Lists tags, newest tagged commit first.
///
/// Tags that do not peel to a commit (e.g. tagged trees) are skipped.
///
/// # Errors
///
/// Returns error if the repository or its references cannot be read.
pub fn list_tags(repo_path: impl AsRef<Path>) -> Result<Vec<TagInfo>> {
    let repo = open_repository(repo_path.as_ref())?;
    let references = repo.references().context("Failed to read references")?;

    let mut tags = Vec::new();
    for mut reference in references
        .tags()
        .context("Failed to get tags")?
        .filter_map(Result::ok)
    {
        let name = reference.name().shorten().to_str_lossy().into_owned();
        let Ok(id) = reference.peel_to_id_in_place() else {
            continue;
        };
        let Ok(commit) = id
            .object()
            .context("Failed to resolve tag target")?
            .try_into_commit()
        else {
            continue;
        };
        let committer = commit.committer().context("Failed to read committer")?;

        tags.push(TagInfo {
            name,
            commit_hash: commit.id.to_hex().to_string(),
            short_oid: commit.id.to_hex_with_len(7).to_string(),
            date: committer.time.seconds,
        });
    }

    tags.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));
    Ok(tags)
}

#[cfg(test)]
impl FileEntry {
    /// Creates an entry with a null object ID for testing.
    pub(crate) fn new_for_test(path: &str) -> Self {
        Self {
            path: path.into(),
            oid: gix::ObjectId::null(gix::hash::Kind::Sha1),
        }
    }
}

#[cfg(test)]
impl CommitInfo {
    /// Creates a new CommitInfo instance for testing.
    pub(crate) fn new_for_test(
        oid: &str,
        author: &str,
        date: i64,
        message: &str,
        decoration: &str,
    ) -> Self {
        Self {
            oid: oid.to_string(),
            short_oid: oid.chars().take(7).collect(),
            author: author.to_string(),
            author_email: format!("{}@example.com", author.to_lowercase()),
            committer: author.to_string(),
            date,
            message: message.lines().next().unwrap_or("").to_string(),
            message_full: message.to_string(),
            ref_names: parse_ref_names(decoration),
        }
    }
}
