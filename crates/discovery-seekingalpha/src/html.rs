//! Minimal HTML-to-text conversion for article bodies.

/// Tags whose closing form ends a line of text.
const LINE_BREAKING_TAGS: &[&str] = &["</li>", "</p>", "<br>", "<br/>", "<br />"];

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Strips markup from an HTML fragment, keeping list items and paragraphs on
/// their own lines and decoding the common character entities.
pub(crate) fn to_text(html: &str) -> String {
    let mut marked = html.to_string();
    for tag in LINE_BREAKING_TAGS {
        marked = marked.replace(tag, &format!("{tag}\n"));
    }

    let mut text = String::with_capacity(marked.len());
    let mut in_tag = false;
    for ch in marked.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    // `&amp;` last so "&amp;lt;" decodes to "&lt;", not "<".
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text.trim().to_string()
}
