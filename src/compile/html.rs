//! Typed HTML builder and the shared sanitizers every render rule goes
//! through.
//!
//! Text nodes are escaped on output, attribute values are quoted and escaped,
//! and style values pass through [`css_value`]. Only [`Node::Raw`] bypasses
//! escaping; it is reserved for fixed markup such as conditional comments.

use html_escape::{encode_double_quoted_attribute, encode_text};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Raw(raw) => out.push_str(raw),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    styles: Vec<(&'static str, String)>,
    children: Vec<Node>,
    void: bool,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// An element without children or closing tag, such as `img`.
    pub fn void(tag: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Adds a declaration to the inline `style`. Empty values after
    /// sanitizing are dropped.
    pub fn style(mut self, property: &'static str, value: impl AsRef<str>) -> Self {
        let value = css_value(value.as_ref());
        if !value.is_empty() {
            self.styles.push((property, value));
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub(crate) fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }
        if !self.styles.is_empty() {
            let css = self
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            push_attr(out, "style", &css);
        }
        if self.void {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}

const CSS_BREAKOUT: &[char] = &[';', '{', '}', '<', '>', '"', '\\'];

/// Whether `value` can be placed in a declaration without escaping it.
pub fn is_safe_css(value: &str) -> bool {
    !value.chars().any(|c| CSS_BREAKOUT.contains(&c) || c.is_control())
}

/// Strips characters that would end the declaration or the attribute.
pub fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !CSS_BREAKOUT.contains(c) && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalizes a link target to an absolute, scheme-qualified URL.
///
/// Returns `None` for values that must not become a link: empty, `#`,
/// script and data schemes, values with whitespace, and unrecognized schemes.
pub fn normalize_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() || url == "#" || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let lower = url.to_ascii_lowercase();
    for scheme in ["http://", "https://"] {
        if let Some(rest) = lower.strip_prefix(scheme) {
            return (!rest.is_empty()).then(|| url.to_string());
        }
    }
    if let Some(rest) = url.strip_prefix("//") {
        return (!rest.is_empty()).then(|| format!("https://{rest}"));
    }
    for scheme in ["mailto:", "tel:"] {
        if let Some(rest) = lower.strip_prefix(scheme) {
            return (!rest.is_empty()).then(|| url.to_string());
        }
    }
    if has_scheme(url) {
        return None;
    }
    Some(format!("https://{url}"))
}

fn has_scheme(url: &str) -> bool {
    match url.find(':') {
        Some(colon) => {
            let scheme = &url[..colon];
            let after = &url[colon + 1..];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                && !after.starts_with(|c: char| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Builds a profile URL for a social platform from a handle or URL.
pub fn social_url(platform: &str, handle: &str) -> Option<String> {
    let handle = handle.trim();
    if handle.is_empty() {
        return None;
    }
    let platform = platform.to_ascii_lowercase();
    match platform.as_str() {
        "email" | "mail" => {
            let address = handle.strip_prefix("mailto:").unwrap_or(handle);
            return (address.contains('@') && !address.contains(char::is_whitespace))
                .then(|| format!("mailto:{address}"));
        }
        "whatsapp" if !handle.contains('/') => {
            let digits: String = handle.chars().filter(char::is_ascii_digit).collect();
            return (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"));
        }
        "phone" | "tel" => {
            let digits: String = handle
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            return (!digits.is_empty()).then(|| format!("tel:{digits}"));
        }
        _ => {}
    }
    if handle.contains('/') || handle.contains(':') {
        return normalize_url(handle);
    }
    let name = handle.trim_start_matches('@');
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let name = urlencoding::encode(name);
    let url = match platform.as_str() {
        "instagram" => format!("https://instagram.com/{name}"),
        "tiktok" => format!("https://tiktok.com/@{name}"),
        "twitter" | "x" => format!("https://x.com/{name}"),
        "youtube" => format!("https://youtube.com/@{name}"),
        "facebook" => format!("https://facebook.com/{name}"),
        "linkedin" => format!("https://linkedin.com/in/{name}"),
        "github" => format!("https://github.com/{name}"),
        "threads" => format!("https://threads.net/@{name}"),
        "twitch" => format!("https://twitch.tv/{name}"),
        "pinterest" => format!("https://pinterest.com/{name}"),
        "snapchat" => format!("https://snapchat.com/add/{name}"),
        _ => return normalize_url(handle),
    };
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attributes_are_escaped() {
        let html = Element::new("a")
            .attr("href", "https://x.test/?a=1&b=\"2\"")
            .text("<b>bold</b> & co")
            .render();
        assert_eq!(
            html,
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;bold&lt;/b&gt; &amp; co</a>"
        );
    }

    #[test]
    fn style_values_cannot_break_out() {
        let html = Element::new("div")
            .style("color", "red;} body{display:none")
            .style("padding", ";;")
            .render();
        assert_eq!(html, "<div style=\"color: red bodydisplay:none;\"></div>");
    }

    #[test]
    fn void_elements_self_close() {
        let html = Element::void("img").attr("src", "https://x.test/a.png").render();
        assert_eq!(html, "<img src=\"https://x.test/a.png\" />");
    }

    #[test]
    fn url_normalization() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("#"), None);
        assert_eq!(normalize_url("https://"), None);
        assert_eq!(normalize_url("javascript:alert(1)"), None);
        assert_eq!(normalize_url("JavaScript:alert(1)"), None);
        assert_eq!(normalize_url("data:text/html,hi"), None);
        assert_eq!(normalize_url("bad url"), None);
        assert_eq!(normalize_url("https://a.test"), Some("https://a.test".into()));
        assert_eq!(normalize_url("HTTP://a.test"), Some("HTTP://a.test".into()));
        assert_eq!(normalize_url("//cdn.test/x"), Some("https://cdn.test/x".into()));
        assert_eq!(normalize_url("mailto:me@a.test"), Some("mailto:me@a.test".into()));
        assert_eq!(normalize_url("tel:+15550100"), Some("tel:+15550100".into()));
        assert_eq!(normalize_url("a.test/page"), Some("https://a.test/page".into()));
        assert_eq!(normalize_url("localhost:8080"), Some("https://localhost:8080".into()));
    }

    #[test]
    fn social_handles_become_profile_urls() {
        assert_eq!(
            social_url("instagram", "@portyo"),
            Some("https://instagram.com/portyo".into())
        );
        assert_eq!(
            social_url("whatsapp", "+55 (11) 99999-0000"),
            Some("https://wa.me/5511999990000".into())
        );
        assert_eq!(social_url("email", "hi@portyo.me"), Some("mailto:hi@portyo.me".into()));
        assert_eq!(social_url("email", "not-an-email"), None);
        assert_eq!(
            social_url("twitter", "https://x.com/portyo"),
            Some("https://x.com/portyo".into())
        );
        assert_eq!(social_url("website", "portyo.me"), Some("https://portyo.me".into()));
        assert_eq!(social_url("instagram", "   "), None);
        assert_eq!(social_url("instagram", "two words"), None);
    }
}
