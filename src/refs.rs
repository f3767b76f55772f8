//! Ref decoration parsing for commit display.
//!
//! Git describes every name pointing at a commit with a compact decoration
//! string such as `HEAD -> main, tag: v1.0.0, origin/main`. This module
//! turns that string into typed [`RefName`] values in display order.

/// Kind of reference shown next to a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// `HEAD -> main`: the checked out branch.
    Head,
    /// `origin/HEAD -> origin/main`: a remote's default branch pointer.
    RemoteHead,
    /// Local branch.
    Branch,
    /// Remote tracking branch.
    Remote,
    /// Tag.
    Tag,
}

impl RefKind {
    /// CSS class used for ref badges.
    pub fn css_class(self) -> &'static str {
        match self {
            RefKind::Head => "ref-head",
            RefKind::RemoteHead => "ref-remote-head",
            RefKind::Branch => "ref-branch",
            RefKind::Remote => "ref-remote",
            RefKind::Tag => "ref-tag",
        }
    }

    /// Whether this kind points at another ref.
    pub fn is_pointer(self) -> bool {
        matches!(self, RefKind::Head | RefKind::RemoteHead)
    }
}

/// Single reference parsed from a commit decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefName {
    kind: RefKind,
    name: String,
    target: String,
}

impl RefName {
    fn new(kind: RefKind, name: &str, target: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            target: target.to_string(),
        }
    }

    /// Reference kind.
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Primary name; the left side for pointers. Never empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pointer target, empty unless [`RefKind::is_pointer`].
    pub fn target(&self) -> &str {
        &self.target
    }
}

const TAG_PREFIX: &str = "tag: ";
const POINTER: &str = " -> ";

type Classifier = fn(&str) -> Option<RefName>;

/// Classifiers in precedence order. The first one returning `Some` wins and
/// tokens nobody claims become branches.
const CLASSIFIERS: [Classifier; 3] = [classify_tag, classify_pointer, classify_remote];

fn classify_tag(token: &str) -> Option<RefName> {
    let name = token.strip_prefix(TAG_PREFIX)?;
    Some(RefName::new(RefKind::Tag, name, ""))
}

fn classify_pointer(token: &str) -> Option<RefName> {
    let (left, right) = token.split_once(POINTER)?;
    let parsed = if left == "HEAD" {
        RefName::new(RefKind::Head, left, right)
    } else if left.contains('/') {
        RefName::new(RefKind::RemoteHead, left, right)
    } else {
        // Unconfirmed pointer shape: keep it visible, verbatim.
        RefName::new(RefKind::Branch, token, "")
    };
    Some(parsed)
}

fn classify_remote(token: &str) -> Option<RefName> {
    token
        .contains('/')
        .then(|| RefName::new(RefKind::Remote, token, ""))
}

fn classify(token: &str) -> RefName {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(token))
        .unwrap_or_else(|| RefName::new(RefKind::Branch, token, ""))
}

/// Parses a commit's ref decoration string.
///
/// Tokens are comma separated and trimmed; empty tokens are dropped. The
/// returned order matches the input order. Parsing never fails: names are
/// accepted verbatim and unexpected shapes end up as [`RefKind::Branch`].
///
/// # Examples
///
/// ```
/// use gitshelf::{RefKind, parse_ref_names};
///
/// let refs = parse_ref_names("HEAD -> main, tag: v1.0.0");
/// assert_eq!(refs[0].kind(), RefKind::Head);
/// assert_eq!(refs[0].target(), "main");
/// assert_eq!(refs[1].kind(), RefKind::Tag);
/// assert_eq!(refs[1].name(), "v1.0.0");
/// ```
pub fn parse_ref_names(decoration: &str) -> Vec<RefName> {
    decoration
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(classify)
        .collect()
}
