//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

/// Stylesheet shared by every page: the syntect theme classes.
const HIGHLIGHT_CSS: &str = "highlight.css";

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, head and container structure across all
/// page types. Stylesheets are asset file names resolved against
/// `root_href`, so the same call works for pages at any depth.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `root_href`: Relative href from the page to the site root
/// * `stylesheets`: Asset file names under `assets/`
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, root_href: &str, stylesheets: &[&str], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - gitshelf" }
                script src="https://unpkg.com/@phosphor-icons/web" {}
                @for stylesheet in stylesheets.iter().chain(std::iter::once(&HIGHLIGHT_CSS)) {
                    link rel="stylesheet" href=(format!("{}assets/{}", root_href, stylesheet));
                }
            }
            body {
                div class="container" {
                    (body)
                }
                footer class="site-footer" {
                    "Generated by gitshelf"
                }
            }
        }
    }
}
