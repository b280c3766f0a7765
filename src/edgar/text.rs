use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style.*?</style>").unwrap());
static BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</tr>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Render an HTML document as plain text: scripts and styles dropped, block
/// boundaries turned into newlines, remaining tags stripped, entities
/// decoded. Whitespace and layout noise inside text nodes is left alone.
pub fn render_plain_text(html: &str) -> String {
    let mut text = SCRIPT_RE.replace_all(html, "").to_string();
    text = STYLE_RE.replace_all(&text, "").to_string();
    text = BREAK_RE.replace_all(&text, "\n").to_string();
    text = TAG_RE.replace_all(&text, "").to_string();

    // Decode entities only once the tags are gone, so stray &lt;s cannot
    // resurrect markup
    decode_html_entities(&text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_entities() {
        let html = "<html><body><p>Apple&#8217;s board approved &amp; announced</p></body></html>";
        assert_eq!(render_plain_text(html), "Apple\u{2019}s board approved & announced");
    }

    #[test]
    fn scripts_and_styles_are_dropped() {
        let html = "<script>var x = 1;</script><style>p { color: red }</style><p>kept</p>";
        assert_eq!(render_plain_text(html), "kept");
    }

    #[test]
    fn block_ends_become_newlines() {
        let html = "<div>Item 8.01</div><div>Other Events</div>";
        assert_eq!(render_plain_text(html), "Item 8.01\nOther Events");
    }

    #[test]
    fn tag_only_page_renders_empty() {
        assert_eq!(render_plain_text("<html><body><table><tr></tr></table></body></html>"), "");
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let html = "<p>a    b\n   c</p>";
        assert_eq!(render_plain_text(html), "a    b\n   c");
    }
}
