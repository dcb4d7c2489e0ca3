//! Best-effort article extraction from raw HTML.
//!
//! The content region is the first `<article>`, else `<main>`, else `<body>`,
//! else the whole document. Title, hero image and body text are read relative
//! to that region. Nothing here validates that the result is meaningful prose.

use scraper::{ElementRef, Html, Selector};

/// Regions tried in order when looking for the main content.
const CONTENT_REGIONS: [&str; 3] = ["article", "main", "body"];

/// Elements whose text never counts as body text. `noscript` holds raw markup
/// because the parser runs with scripting enabled.
const SKIPPED_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicExtract {
    pub title: Option<String>,
    pub hero_image: Option<String>,
    pub text: String,
}

pub fn extract(html: &str) -> HeuristicExtract {
    let doc = Html::parse_document(html);

    let title = first(&doc, "title")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let region = CONTENT_REGIONS
        .iter()
        .find_map(|tag| first(&doc, tag))
        .unwrap_or_else(|| doc.root_element());

    let hero_image = match first_within(region, "img") {
        Some(img) => src_of(img),
        None => noscript_image(region).or_else(|| match first(&doc, "img") {
            Some(img) => src_of(img),
            None => noscript_image(doc.root_element()),
        }),
    };

    HeuristicExtract {
        title,
        hero_image,
        text: collect_text(region),
    }
}

/// Plain text of an HTML fragment, using the same collapsing rule as [`extract`].
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    collect_text(fragment.root_element())
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

fn first_within<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn src_of(img: ElementRef<'_>) -> Option<String> {
    img.value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
}

/// Source of the first `<img>` written inside a `<noscript>` under `scope`.
fn noscript_image(scope: ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("noscript").ok()?;
    scope.select(&selector).find_map(|noscript| {
        let inner = Html::parse_fragment(&noscript.text().collect::<String>());
        first_within(inner.root_element(), "img").and_then(src_of)
    })
}

/// Every text node under `scope`, trimmed, empties dropped, one per line.
fn collect_text(scope: ElementRef<'_>) -> String {
    scope
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|parent| {
                parent
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_with_title_and_image() {
        let got = extract(
            r#"<html><head><title> T </title></head><body><article><img src="/h.png"><p>Hello</p></article></body></html>"#,
        );
        assert_eq!(got.title.as_deref(), Some("T"));
        assert_eq!(got.hero_image.as_deref(), Some("/h.png"));
        assert!(got.text.contains("Hello"));
    }

    #[test]
    fn falls_back_to_body_without_landmarks() {
        let got = extract("<html><body><div><p>Just text</p></div></body></html>");
        assert_eq!(got.title, None);
        assert_eq!(got.hero_image, None);
        assert_eq!(got.text, "Just text");
    }

    #[test]
    fn bare_text_still_yields_text() {
        let got = extract("plain words, no markup");
        assert_eq!(got.text, "plain words, no markup");
        assert_eq!(got.hero_image, None);
    }

    #[test]
    fn article_wins_over_main() {
        let got = extract(
            "<body><main><p>main body</p><article><p>the post</p></article></main></body>",
        );
        assert_eq!(got.text, "the post");
    }

    #[test]
    fn main_used_when_no_article() {
        let got = extract("<body><nav>menu</nav><main><h1>Head</h1><p>One</p><p>Two</p></main></body>");
        assert_eq!(got.text, "Head\nOne\nTwo");
    }

    #[test]
    fn hero_falls_back_to_first_image_in_document() {
        let got = extract(
            r#"<body><header><img src="/logo.png"></header><article><p>x</p></article></body>"#,
        );
        assert_eq!(got.hero_image.as_deref(), Some("/logo.png"));
    }

    #[test]
    fn img_without_src_yields_no_hero() {
        let got = extract(r#"<body><article><img alt="x"><p>x</p></article><img src="/late.png"></body>"#);
        assert_eq!(got.hero_image, None);
    }

    #[test]
    fn blank_title_is_absent() {
        let got = extract("<html><head><title>   </title></head><body>x</body></html>");
        assert_eq!(got.title, None);
    }

    #[test]
    fn scripts_and_styles_are_not_text() {
        let got = extract(
            "<body><article><style>p{color:red}</style><p>Visible</p><script>var x = 1;</script></article></body>",
        );
        assert_eq!(got.text, "Visible");
    }

    #[test]
    fn templates_are_not_text() {
        let got = extract("<body><article><template><p>Hidden row</p></template><p>Shown</p></article></body>");
        assert_eq!(got.text, "Shown");
    }

    #[test]
    fn noscript_image_is_hero_and_not_text() {
        let got = extract(r#"<body><article><noscript><img src="/n.png"></noscript><p>Hi</p></article></body>"#);
        assert_eq!(got.text, "Hi");
        assert_eq!(got.hero_image.as_deref(), Some("/n.png"));
    }

    #[test]
    fn real_image_beats_noscript_image() {
        let got = extract(
            r#"<body><article><noscript><img src="/n.png"></noscript><img src="/lazy.png"><p>Hi</p></article></body>"#,
        );
        assert_eq!(got.hero_image.as_deref(), Some("/lazy.png"));
    }

    #[test]
    fn malformed_markup_does_not_panic() {
        let got = extract("<html><body><article><p>Unclosed <b>bold<div></article></span>");
        assert!(got.text.contains("Unclosed"));
        assert!(got.text.contains("bold"));
    }

    #[test]
    fn fragment_text() {
        assert_eq!(html_to_text("<p>One</p>\n<p> Two </p>"), "One\nTwo");
        assert_eq!(html_to_text(""), "");
    }
}
