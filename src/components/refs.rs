//! Ref decoration badges for the commit log

use maud::{Markup, html};

use crate::refs::RefName;

/// Renders one badge per ref decorating a commit, in decoration order.
///
/// Each badge carries the CSS class of its kind. Pointer refs
/// (`HEAD -> main`, `origin/HEAD -> origin/main`) show their target after
/// an arrow.
pub fn ref_badges(ref_names: &[RefName]) -> Markup {
    html! {
        @if !ref_names.is_empty() {
            span class="ref-badges" {
                @for ref_name in ref_names {
                    span class=(format!("ref-badge {}", ref_name.kind().css_class())) {
                        @if ref_name.kind().is_pointer() {
                            (ref_name.name()) " → " (ref_name.target())
                        } @else {
                            (ref_name.name())
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::parse_ref_names;

    #[test]
    fn test_ref_badges_classes_and_order() {
        // Arrange
        let refs = parse_ref_names("HEAD -> main, origin/main, tag: v1.0");

        // Act
        let html = ref_badges(&refs).into_string();

        // Assert
        let head = html.find("ref-badge ref-head").expect("HEAD badge");
        let remote = html.find("ref-badge ref-remote").expect("remote badge");
        let tag = html.find("ref-badge ref-tag").expect("tag badge");
        assert!(head < remote && remote < tag, "Badges keep decoration order");
        assert!(html.contains("HEAD → main"));
        assert!(html.contains(">v1.0<"));
    }

    #[test]
    fn test_ref_badges_empty() {
        assert_eq!(ref_badges(&[]).into_string(), "");
    }

    #[test]
    fn test_ref_badges_escape_names() {
        let refs = parse_ref_names("feat/<b>");

        let html = ref_badges(&refs).into_string();

        assert!(html.contains("feat/&lt;b&gt;"));
    }
}
