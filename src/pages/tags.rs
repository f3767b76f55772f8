//! Tag listing page generation

use maud::{Markup, html};

use super::TAGS_PAGE;
use crate::components::layout::page_wrapper;
use crate::components::nav::section_header;
use crate::git::TagInfo;
use crate::path::root_href;
use crate::util::{format_relative_time, now_seconds};

/// Generates the tags listing page
///
/// Tags are shown in the order given; `list_tags` returns them newest
/// first. Each row shows the tag name, the short hash of the tagged
/// commit and the commit's date.
pub fn generate(repo_name: &str, tags: &[TagInfo]) -> Markup {
    let root = root_href(TAGS_PAGE);
    let now = now_seconds();

    page_wrapper(
        &format!("{}: tags", repo_name),
        &root,
        &["tags.css"],
        html! {
            (section_header(repo_name, &root, "Tags"))

            main.repo-card {
                div.repo-controls {
                    h1.page-title {
                        i.ph.ph-tag {}
                        "Tags"
                    }
                    span.badge { (tags.len()) " tags" }
                }

                @if tags.is_empty() {
                    div.empty-state {
                        p { "No tags found in this repository." }
                    }
                } @else {
                    div.file-table {
                        @for tag in tags {
                            div.file-row id=(format!("tag-{}", tag.name)) {
                                div.cell-name {
                                    i.ph.ph-tag {}
                                    span.name-text { (tag.name) }
                                }
                                div.cell-meta {
                                    code.oid title=(tag.commit_hash) { (tag.short_oid) }
                                    span.date { (format_relative_time(tag.date, now)) }
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

    fn tag(name: &str, hash: &str, date: i64) -> TagInfo {
        TagInfo {
            name: name.to_string(),
            commit_hash: hash.to_string(),
            short_oid: hash.chars().take(7).collect(),
            date,
        }
    }

    #[test]
    fn test_generate_empty() {
        // Arrange & Act
        let html = generate("test-repo", &[]).into_string();

        // Assert
        assert!(html.contains("No tags found"), "Should show empty state");
        assert!(html.contains(r#"href="../assets/tags.css""#));
        assert!(html.contains(r#"href="../index.html""#));
    }

    #[test]
    fn test_generate_keeps_given_order() {
        // Arrange
        let tags = vec![
            tag("v2.0.0", "def456abc1230000", 2_000),
            tag("v1.0.0", "abc123def4560000", 1_000),
        ];

        // Act
        let html = generate("test-repo", &tags).into_string();

        // Assert
        let v2 = html.find("v2.0.0").expect("v2 listed");
        let v1 = html.find("v1.0.0").expect("v1 listed");
        assert!(v2 < v1, "Newest tag first");
        assert!(html.contains(">def456a<"), "Short hash shown");
        assert!(html.contains(r#"title="abc123def4560000""#), "Full hash in title");
        assert!(html.contains("2 tags"));
    }
}
