// Archive link extraction and URL resolution

use crate::error::{Result, ScanError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Directory the extracted `../` links are re-rooted under.
pub const ARCHIVE_ROOT: &str = "pages/";

static ARCHIVE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="(\.\./conferences/archives/[^"]+\.html)""#).unwrap()
});

/// Find every archive href in the page, in document order.
///
/// Duplicates are kept; each occurrence is checked separately.
pub fn extract_archive_links(content: &str) -> Vec<String> {
    ARCHIVE_LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Turn an extracted `../conferences/...` reference into an absolute URL.
///
/// The leading parent segment is replaced by [`ARCHIVE_ROOT`] and the result
/// is joined onto `base`. Spaces come out as `%20`.
pub fn resolve_link(base: &Url, link: &str) -> Result<Url> {
    let relative = link.strip_prefix("../").unwrap_or(link);
    let rooted = format!("{}{}", ARCHIVE_ROOT, relative);

    base.join(&rooted)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", rooted, e)))
}

/// Parse the configured base URL, making sure it behaves as a directory
/// when joined.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    Url::parse(&with_slash).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base, e)))
}

/// URL of the page under test.
pub fn resolve_page(base: &Url, page: &str) -> Result<Url> {
    base.join(page)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", page, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_document_order() {
        let html = r#"
            <a href="../conferences/archives/2019/techmun.html">2019</a>
            <a href="../about/leadership.html">Leadership</a>
            <a href="../conferences/archives/2018/techmun.html">2018</a>
        "#;
        let links = extract_archive_links(html);
        assert_eq!(
            links,
            vec![
                "../conferences/archives/2019/techmun.html",
                "../conferences/archives/2018/techmun.html",
            ]
        );
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let html = r#"<a href="../conferences/archives/a.html"></a><a href="../conferences/archives/a.html"></a>"#;
        assert_eq!(extract_archive_links(html).len(), 2);
    }

    #[test]
    fn test_extract_ignores_other_shapes() {
        let html = r#"
            <a href="conferences/archives/a.html"></a>
            <a href="../conferences/archives/a.pdf"></a>
            <a href="../../conferences/archives/a.html"></a>
        "#;
        assert!(extract_archive_links(html).is_empty());
    }

    #[test]
    fn test_resolve_link_reroots_under_pages() {
        let base = parse_base_url("http://localhost:8000/").unwrap();
        let url = resolve_link(&base, "../conferences/archives/2019/techmun.html").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/pages/conferences/archives/2019/techmun.html"
        );
    }

    #[test]
    fn test_resolve_link_encodes_spaces() {
        let base = parse_base_url("http://localhost:8000").unwrap();
        let url = resolve_link(&base, "../conferences/archives/Fall 2019/Best Delegate.html").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/pages/conferences/archives/Fall%202019/Best%20Delegate.html"
        );
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ScanError::InvalidUrl(_))
        ));
    }
}
