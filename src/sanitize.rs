//! Input sanitization applied to career payloads before they are stored.
//!
//! Rich-text fields go through an HTML allow-list. Everything else is
//! treated as plain text and entity-escaped, except keys that look like
//! emails or links (including image links), which are normalised and
//! blanked when malformed.

use scraper::{ElementRef, Html, Node};
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateUrl};

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "a",
    "div", "span", "blockquote", "code", "pre",
];

const ALLOWED_ATTRS: &[&str] = &["href", "target", "rel", "class"];

/// Elements whose content is dropped along with the tag
const DROP_CONTENT_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "textarea", "title",
    "svg", "math",
];

const VOID_TAGS: &[&str] = &["br"];

/// Key fragments marking a string as a link
const URL_KEY_HINTS: &[&str] = &["url", "link", "image"];

/// Reduce an HTML fragment to the allow-listed tags and attributes.
///
/// Tags outside the allow-list are unwrapped (their text survives) unless
/// they are script-like, in which case the whole subtree goes.
pub fn sanitize_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                out.push_str(&escape_html_text(text));
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, out);
                }
            }
            // comments, doctypes, processing instructions
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROP_CONTENT_TAGS.contains(&name) {
        return;
    }
    if !ALLOWED_TAGS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        if !ALLOWED_ATTRS.contains(&attr) {
            continue;
        }
        if attr == "href" && !is_safe_href(value) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&escape_html_attr(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&name) {
        return;
    }

    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_safe_href(href: &str) -> bool {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !(normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || normalized.starts_with("data:"))
}

fn escape_html_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_html_attr(value: &str) -> String {
    escape_html_text(value).replace('"', "&quot;")
}

/// Escape a plain-text value so it can never be interpreted as markup
pub fn sanitize_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Trimmed, lowercased email, or an empty string when it is not an email
pub fn sanitize_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    if normalized.validate_email() {
        normalized
    } else {
        String::new()
    }
}

/// Trimmed absolute URL, or an empty string when it does not parse
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim().to_string();
    if trimmed.validate_url() {
        trimmed
    } else {
        String::new()
    }
}

/// Sanitize every string in a JSON document according to the key it sits under.
///
/// Strings inside arrays are treated as if they belonged to the array's key.
pub fn sanitize_value(value: Value, html_fields: &[&str]) -> Value {
    sanitize_with_key(value, None, html_fields)
}

fn sanitize_with_key(value: Value, key: Option<&str>, html_fields: &[&str]) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_string(&s, key, html_fields)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| sanitize_with_key(item, key, html_fields))
                .collect(),
        ),
        Value::Object(map) => {
            let sanitized: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| {
                    let v = sanitize_with_key(v, Some(&k), html_fields);
                    (k, v)
                })
                .collect();
            Value::Object(sanitized)
        }
        other => other,
    }
}

fn sanitize_string(s: &str, key: Option<&str>, html_fields: &[&str]) -> String {
    let Some(key) = key else {
        return sanitize_text(s);
    };
    let lowered = key.to_lowercase();

    if html_fields.contains(&key) {
        sanitize_html(s)
    } else if lowered.contains("email") {
        sanitize_email(s)
    } else if URL_KEY_HINTS.iter().any(|hint| lowered.contains(hint)) {
        sanitize_url(s)
    } else {
        sanitize_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn html_keeps_allowed_formatting() {
        let html = "<p>We are <strong>hiring</strong><br>now</p><ul><li>Rust</li></ul>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn html_drops_scripts_and_event_handlers() {
        let html = r#"<p onclick="steal()">Hi<script>alert(1)</script></p>"#;
        assert_eq!(sanitize_html(html), "<p>Hi</p>");
    }

    #[test]
    fn html_unwraps_unknown_tags_but_keeps_text() {
        let html = "<section><p>Team</p><img src=x onerror=alert(1)>tail</section>";
        assert_eq!(sanitize_html(html), "<p>Team</p>tail");
    }

    #[test]
    fn html_rejects_javascript_links() {
        let html = r#"<a href="javascript:alert(1)" class="cta">apply</a><a href="https://jobs.example.com">site</a>"#;
        assert_eq!(
            sanitize_html(html),
            r#"<a class="cta">apply</a><a href="https://jobs.example.com">site</a>"#
        );
    }

    #[test]
    fn text_is_entity_escaped() {
        assert_eq!(
            sanitize_text(r#"<b>"R&D" / 'ops'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#x2F; &#x27;ops&#x27;&lt;&#x2F;b&gt;"
        );
        assert_eq!(sanitize_text("Senior Engineer"), "Senior Engineer");
    }

    #[test]
    fn email_is_normalised_or_blanked() {
        assert_eq!(sanitize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
        assert_eq!(sanitize_email("not-an-email"), "");
    }

    #[test]
    fn url_requires_a_scheme() {
        assert_eq!(sanitize_url(" https://example.com/jobs "), "https://example.com/jobs");
        assert_eq!(sanitize_url("example.com"), "");
    }

    #[test]
    fn value_sanitization_follows_key_names() {
        let input = json!({
            "jobTitle": "<i>Dev</i>",
            "description": "<p>Build <em>things</em></p><script>x()</script>",
            "minimumSalary": 1000,
            "createdBy": { "email": "BOSS@EXAMPLE.COM", "name": "Boss" },
            "portfolioUrl": "www.example.com/me",
            "preScreeningQuestions": [
                { "question": "Notice?", "options": ["< 30 days", "Immediately"] }
            ]
        });

        let output = sanitize_value(input, &["description"]);

        assert_eq!(output["jobTitle"], "&lt;i&gt;Dev&lt;&#x2F;i&gt;");
        assert_eq!(output["description"], "<p>Build <em>things</em></p>");
        assert_eq!(output["minimumSalary"], 1000);
        assert_eq!(output["createdBy"]["email"], "boss@example.com");
        assert_eq!(output["portfolioUrl"], "");
        assert_eq!(
            output["preScreeningQuestions"][0]["options"][0],
            "&lt; 30 days"
        );
    }
}
