//! Commits page generation for commit history viewing

use maud::{Markup, html};

use super::commits_page_path;
use crate::components::layout::page_wrapper;
use crate::components::nav::section_header;
use crate::components::refs::ref_badges;
use crate::git::CommitInfo;
use crate::path::root_href;
use crate::util::{format_relative_time, now_seconds};

/// Generates HTML page displaying commit log for a reference
///
/// Commits are listed in the order given (newest first from
/// `list_commits`), each with the refs decorating it as badges.
///
/// # Arguments
///
/// * `commits`: Commits to display
/// * `ref_name`: Reference name (branch/tag) the log was walked from
/// * `repo_name`: Repository name for navigation
///
/// # Examples
///
/// ```no_run
/// use gitshelf::pages::commits::generate;
/// use gitshelf::list_commits;
/// use std::path::Path;
///
/// let commits = list_commits(Path::new("."), None, Some(100))?;
/// let html = generate(&commits, "main", "my-repo");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(commits: &[CommitInfo], ref_name: &str, repo_name: &str) -> Markup {
    let root = root_href(&commits_page_path(ref_name));
    let now = now_seconds();

    page_wrapper(
        &format!("Commits - {}", repo_name),
        &root,
        &["commits.css"],
        html! {
            (section_header(repo_name, &root, "Commits"))
            main {
                h1 { "Commit History" }
                div class="commit-count" {
                    "Showing " (commits.len()) " commits on "
                    span class="ref-name" { (ref_name) }
                }
                @if commits.is_empty() {
                    p class="empty-state" { "No commits found" }
                } @else {
                    ol class="commit-list" {
                        @for commit in commits {
                            li class="commit-entry" id=(commit.oid()) {
                                div class="commit-header" {
                                    code class="commit-hash" title=(commit.oid()) { (commit.short_oid()) }
                                    span class="commit-message" title=(commit.message_full()) {
                                        (commit.message())
                                    }
                                    (ref_badges(commit.ref_names()))
                                }
                                div class="commit-meta" {
                                    span class="commit-author" title=(commit.author_email()) {
                                        (commit.author())
                                    }
                                    @if commit.committer() != commit.author() {
                                        span class="commit-committer" {
                                            "committed by " (commit.committer())
                                        }
                                    }
                                    span class="commit-date" {
                                        (format_relative_time(commit.date(), now))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_page_lists_commits_with_badges() {
        // Arrange
        let commits = vec![
            CommitInfo::new_for_test(
                "abc123456789",
                "Alice",
                1_234_567_890,
                "Add feature X\n\nDetailed description.",
                "HEAD -> main, origin/main, tag: v1.0",
            ),
            CommitInfo::new_for_test("def456789012", "Bob", 1_234_567_800, "Fix bug Y", ""),
        ];

        // Act
        let html = generate(&commits, "main", "test-repo").into_string();

        // Assert
        assert!(html.contains("Commit History"));
        assert!(html.contains("Showing 2 commits"));
        assert!(html.contains("Add feature X"));
        assert!(html.contains("abc1234"));
        assert!(html.contains("Alice"));
        assert!(html.contains("ref-badge ref-head"));
        assert!(html.contains("HEAD → main"));
        assert!(html.contains("ref-badge ref-tag"));
        assert_eq!(html.matches(r#"class="ref-badges""#).count(), 1);
    }

    #[test]
    fn test_commits_page_assets_relative_to_ref_depth() {
        let html = generate(&[], "feature/ui", "test-repo").into_string();

        assert!(html.contains(r#"href="../../../assets/commits.css""#));
        assert!(html.contains(r#"href="../../../index.html""#));
        assert!(html.contains("No commits found"));
    }
}
