//! Page transformer — post-processes rendered documentation pages.
//!
//! Steps, each enabled only by its configuration:
//!
//! 1. **Coverage** — the test page's content region becomes an iframe of the coverage report
//! 2. **Navigation** — header links are fixed up, highlighted and relabeled (needs aliases)
//! 3. **Branding** — logo and title are prepended to the header
//! 4. **Declare blocks** — example headings of typedef details read "Declare:" (always)

pub mod dom;
pub mod nav;

use crate::config::PageContext;
use dom::{escape, Page};
use scraper::Selector;
use std::sync::LazyLock;

static HEADER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("header").unwrap());

static CONTENT: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".content").unwrap());

static TYPEDEF_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#".detail h3[id*="static-typedef-"]"#).unwrap());

static EXAMPLE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[data-ice="example"]"#).unwrap());

static EXAMPLE_LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4").unwrap());

/// Site-relative path of the page that hosts the coverage report.
pub const TEST_PAGE: &str = "test.html";

pub const DECLARE_LABEL: &str = "Declare:";

const BRAND_STYLE: &str = "display: inline-block; width:calc(16% - 10px);";
const LOGO_STYLE: &str = "width: 34px; height: 34px; margin: 8px 16px 8px 0;";
const TITLE_STYLE: &str = "font-weight: 500; line-height: 50px; vertical-align: top;";
const COVERAGE_STYLE: &str = "width: 100%; height: calc(100vh - 126px); border: none";

/// Transform one rendered page. `page_path` is the page's path relative to
/// the site root, e.g. `typedef/index.html`.
pub fn transform_page(markup: &str, page_path: &str, ctx: &PageContext) -> String {
    let page_path = normalize_path(page_path);
    let mut page = Page::parse(markup);

    if let Some(url) = ctx.coverage_url.as_deref() {
        if page_path == TEST_PAGE {
            embed_coverage(&mut page, url);
        }
    }

    if ctx.nav_alias.is_some() {
        nav::rewrite(&mut page, &page_path, ctx);
    }

    if ctx.title.is_some() || ctx.logo_url.is_some() {
        inject_branding(&mut page, ctx);
    }

    relabel_declarations(&mut page);

    page.to_html()
}

/// Whether a path names a rendered page. Everything else is emitted unchanged.
pub fn is_page(path: &str) -> bool {
    path.ends_with(".html")
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}

fn embed_coverage(page: &mut Page, url: &str) {
    let frame = format!(
        r#"<iframe src="{}" style="{}"></iframe>"#,
        escape(url),
        COVERAGE_STYLE
    );
    for content in page.select(&CONTENT) {
        page.set_inner_html(content, &frame);
    }
}

fn inject_branding(page: &mut Page, ctx: &PageContext) {
    let mut markup = format!(r#"<div class="brand-info" style="{}">"#, BRAND_STYLE);
    if let Some(ref logo) = ctx.logo_url {
        markup.push_str(&format!(r#"<img src="{}" style="{}">"#, escape(logo), LOGO_STYLE));
    }
    if let Some(ref title) = ctx.title {
        markup.push_str(&format!(r#"<span style="{}">{}</span>"#, TITLE_STYLE, escape(title)));
    }
    markup.push_str("</div>");

    for header in page.select(&HEADER) {
        page.prepend_html(header, &markup);
    }
}

/// Typedef code samples are declarations, not usage examples.
fn relabel_declarations(page: &mut Page) {
    for heading in page.select(&TYPEDEF_HEADINGS) {
        let Some(section) = page.parent(heading) else {
            continue;
        };
        for example in page.select_within(section, &EXAMPLE_BLOCK) {
            for label in page.select_within(example, &EXAMPLE_LABEL) {
                page.set_text(label, DECLARE_LABEL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;
    use std::collections::BTreeMap;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>demo</title></head>
<body>
<header>
  <a href="./">Home</a>
  <a href="identifiers.html">Reference</a>
  <a href="source.html">Source</a>
  <a href="test.html">Test</a>
  <a style="position:relative; top:3px;" href="https://github.com/demo"><img width="20px" src="./image/github.png"></a>
</header>
<div class="content" data-ice="content">
  <div class="detail" data-ice="detail">
    <h3 data-ice="anchor" id="static-typedef-IMessageProps">IMessageProps</h3>
    <div data-ice="example"><h4>Example:</h4><pre>export interface IMessageProps {}</pre></div>
  </div>
  <div class="detail" data-ice="detail">
    <h3 data-ice="anchor" id="static-function-merge">merge</h3>
    <div data-ice="example"><h4>Example:</h4><pre>merge(a, b)</pre></div>
  </div>
</div>
</body>
</html>"#;

    fn texts(html: &str, selector: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel).map(|e| e.text().collect()).collect()
    }

    fn attrs(html: &str, selector: &str, name: &str) -> Vec<Option<String>> {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel)
            .map(|e| e.value().attr(name).map(str::to_string))
            .collect()
    }

    fn aliases(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn empty_context_only_relabels() {
        let out = transform_page(PAGE, "typedef/index.html", &PageContext::default());
        assert!(texts(&out, ".brand-info").is_empty());
        assert!(texts(&out, "iframe").is_empty());
        assert_eq!(attrs(&out, "header > a", "href")[0].as_deref(), Some("./"));
        assert_eq!(texts(&out, "header > a")[0], "Home");
        assert_eq!(texts(&out, "h4"), vec!["Declare:", "Example:"]);
    }

    #[test]
    fn alias_rewrites_only_matching_text() {
        let ctx = PageContext {
            nav_alias: aliases(&[("Home", "首页")]),
            ..Default::default()
        };
        let out = transform_page(PAGE, "index.html", &ctx);
        let labels = texts(&out, "header > a");
        assert_eq!(labels[0], "首页");
        assert_eq!(labels[1], "Reference");
        assert_eq!(labels[2], "Source");
        assert_eq!(labels[3], "Test");
    }

    #[test]
    fn root_link_rewritten_and_highlighted() {
        let ctx = PageContext {
            nav_alias: aliases(&[]),
            ..Default::default()
        };
        let out = transform_page(PAGE, "manual/usage.html", &ctx);
        let hrefs = attrs(&out, "header > a", "href");
        assert_eq!(hrefs[0].as_deref(), Some("index.html"));
        let styles = attrs(&out, "header > a", "style");
        assert_eq!(styles[0].as_deref(), Some(nav::HIGHLIGHT_STYLE));
        assert_eq!(styles[1], None);
        assert_eq!(styles[2], None);
        assert_eq!(styles[3], None);
        assert_eq!(styles[4].as_deref(), Some("position:relative; top:3px;"));
    }

    #[test]
    fn reference_entry_highlighted_on_typedef_pages() {
        let ctx = PageContext {
            nav_alias: aliases(&[("Reference", "API")]),
            ..Default::default()
        };
        let out = transform_page(PAGE, "./typedef/index.html", &ctx);
        let styles = attrs(&out, "header > a", "style");
        assert_eq!(styles[0], None);
        assert_eq!(styles[1].as_deref(), Some(nav::HIGHLIGHT_STYLE));
        assert_eq!(texts(&out, "header > a")[1], "API");
    }

    #[test]
    fn navigation_untouched_without_aliases() {
        let out = transform_page(PAGE, "source.html", &PageContext::default());
        assert!(attrs(&out, "header > a", "style")[2].is_none());
    }

    #[test]
    fn coverage_embedded_on_test_page_only() {
        let ctx = PageContext {
            coverage_url: Some("coverage/lcov-report/index.html".into()),
            ..Default::default()
        };
        let out = transform_page(PAGE, "test.html", &ctx);
        let frames = attrs(&out, ".content iframe", "src");
        assert_eq!(frames, vec![Some("coverage/lcov-report/index.html".to_string())]);
        assert!(texts(&out, ".content .detail").is_empty());

        let out = transform_page(PAGE, "index.html", &ctx);
        assert!(attrs(&out, "iframe", "src").is_empty());
    }

    #[test]
    fn branding_with_logo_and_title() {
        let ctx = PageContext {
            logo_url: Some("https://example.com/logo.svg".into()),
            title: Some("esdoc <demo>".into()),
            ..Default::default()
        };
        let out = transform_page(PAGE, "index.html", &ctx);
        let first = attrs(&out, "header > :first-child", "class");
        assert_eq!(first, vec![Some("brand-info".to_string())]);
        assert_eq!(
            attrs(&out, "header .brand-info img", "src"),
            vec![Some("https://example.com/logo.svg".to_string())]
        );
        assert_eq!(texts(&out, "header .brand-info span"), vec!["esdoc <demo>"]);
        assert_eq!(texts(&out, "header > a").len(), 5);
    }

    #[test]
    fn branding_title_only() {
        let ctx = PageContext {
            title: Some("demo".into()),
            ..Default::default()
        };
        let out = transform_page(PAGE, "index.html", &ctx);
        assert!(attrs(&out, "header .brand-info img", "src").is_empty());
        assert_eq!(texts(&out, "header .brand-info span"), vec!["demo"]);
    }

    #[test]
    fn page_without_header_or_details() {
        let ctx = PageContext {
            logo_url: Some("l.png".into()),
            nav_alias: aliases(&[("Home", "首页")]),
            coverage_url: Some("c.html".into()),
            ..Default::default()
        };
        let out = transform_page("<p>bare</p>", "test.html", &ctx);
        assert_eq!(texts(&out, "p"), vec!["bare"]);
        assert!(texts(&out, ".brand-info").is_empty());
    }

    #[test]
    fn html_pages() {
        assert!(is_page("docs/index.html"));
        assert!(!is_page("docs/css/style.css"));
        assert!(!is_page("docs/script/search_index.js"));
    }

    #[test]
    fn path_normalization() {
        assert_eq!(normalize_path("./typedef/index.html"), "typedef/index.html");
        assert_eq!(normalize_path("/test.html"), "test.html");
        assert_eq!(normalize_path("class\\a.html"), "class/a.html");
    }
}
