//! HTML Rendering
//!
//! Turns lesson content into HTML fragments for the browser: markdown for
//! the lesson body, and a standalone document that renders the mermaid
//! diagram inside an isolated frame.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Where the diagram document loads mermaid from.
pub const MERMAID_MODULE_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    !(lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || lower.starts_with("data:"))
}

/// Renders lesson markdown to HTML.
///
/// Model output is untrusted: raw HTML in the markdown is shown as text and
/// script-capable link targets are neutralized.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Builds the standalone HTML document that renders a mermaid diagram.
///
/// Meant for an `iframe` `srcdoc` so the diagram library runs apart from
/// the page. Mermaid reads the element's text content, so the escaped
/// source renders as written.
pub fn mermaid_document(source: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body>
<div class="mermaid">
{source}
</div>
<script type="module">
  import mermaid from "{MERMAID_MODULE_URL}";
  mermaid.initialize({{ startOnLoad: true, theme: "default" }});
</script>
</body>
</html>
"#,
        source = escape_html(source),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_markdown_renders_common_blocks() {
        let html = markdown_to_html("## Idea\n\nUse **joins**.\n\n- one\n- two\n\n```sql\nSELECT 1;\n```\n");
        assert!(html.contains("<h2>Idea</h2>"));
        assert!(html.contains("<strong>joins</strong>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("SELECT 1;"));
    }

    #[test]
    fn test_markdown_renders_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("Hello <script>alert(1)</script>\n\n<div onclick=\"x\">hi</div>\n");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = markdown_to_html("[click](javascript:alert(1)) and [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_mermaid_document_loads_library_and_escapes_source() {
        let doc = mermaid_document("flowchart LR\n  A[\"<b>x</b>\"] --> B");
        assert!(doc.contains(MERMAID_MODULE_URL));
        assert!(doc.contains("mermaid.initialize({ startOnLoad: true, theme: \"default\" });"));
        assert!(doc.contains("flowchart LR\n  A[&quot;&lt;b&gt;x&lt;/b&gt;&quot;] --&gt; B"));
        assert!(!doc.contains("<b>x</b>"));
    }
}
