//! Small helpers for building HTML by hand.

/// Escape text for use in element content and quoted attribute values.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A link to a page path plus its query parameters.
///
/// Empty values are dropped, so a link never carries `?q=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Href {
    path: String,
    params: Vec<(&'static str, String)>,
}

impl Href {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Set `key`, replacing any earlier value. `None` or `""` removes it.
    #[must_use]
    pub fn set(mut self, key: &'static str, value: Option<&str>) -> Self {
        self.params.retain(|(k, _)| *k != key);
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.params.push((key, value.to_owned()));
        }
        self
    }

    /// The same query string on a different path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Raw URL, e.g. for a `Location` header.
    #[must_use]
    pub fn url(&self) -> String {
        let mut url = self.path.clone();
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// URL escaped for an `href` or `action` attribute.
    #[must_use]
    pub fn attr(&self) -> String {
        escape(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn href_encodes_values_and_skips_empty() {
        let href = Href::new("/environments")
            .set("tab", Some("dev"))
            .set("q", Some(""))
            .set("reveal", Some("a b"));
        assert_eq!(href.url(), "/environments?tab=dev&reveal=a%20b");
        assert_eq!(href.attr(), "/environments?tab=dev&amp;reveal=a%20b");
    }

    #[test]
    fn href_set_replaces_and_removes() {
        let href = Href::new("/users")
            .set("sort", Some("name"))
            .set("sort", Some("updated"))
            .set("tab", Some("admin"))
            .set("tab", None);
        assert_eq!(href.url(), "/users?sort=updated");
    }
}
