//! Header navigation: root-link rewrite, active-entry highlight, relabeling.

use crate::config::PageContext;
use crate::page::dom::Page;
use scraper::Selector;
use std::sync::LazyLock;

static HEADER_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("header > a").unwrap());

pub const HIGHLIGHT_STYLE: &str = "border-bottom: 2px solid #2d8cf0";

/// Directories whose pages belong to the "identifiers" (reference) entry.
const REFERENCE_DIRS: &[&str] = &["variable", "function", "typedef", "class"];

/// Rewrite every anchor directly inside a `<header>`.
pub fn rewrite(page: &mut Page, page_path: &str, ctx: &PageContext) {
    for link in page.select(&HEADER_LINKS) {
        // "./" has no directory index on static asset hosts.
        if page.attr(link, "href").as_deref() == Some("./") {
            page.set_attr(link, "href", "index.html");
        }

        let href = page.attr(link, "href").unwrap_or_default();
        if is_active(&href, page_path) {
            page.set_attr(link, "style", HIGHLIGHT_STYLE);
        }

        let label = page.text(link);
        if let Some(replacement) = ctx.alias_for(&label) {
            page.set_text(link, replacement);
        }
    }
}

/// Whether the navigation entry pointing at `href` is the current section
/// for the page at `page_path` (site-relative).
pub fn is_active(href: &str, page_path: &str) -> bool {
    match href {
        "identifiers.html" => {
            page_path == "identifiers.html"
                || REFERENCE_DIRS.iter().any(|dir| is_under(page_path, dir))
        }
        "index.html" => page_path == "index.html" || is_under(page_path, "manual"),
        "test.html" | "source.html" => {
            page_path == href || page_path.ends_with(&format!("/{}", href))
        }
        _ => false,
    }
}

fn is_under(page_path: &str, dir: &str) -> bool {
    page_path
        .strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}
