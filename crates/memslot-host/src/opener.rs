//! Opening external links in the user's browser.

/// Opens a URL outside the panel.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs with the system default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Only absolute http(s) URLs are handed to the browser.
pub fn is_openable(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
        && !url.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(is_openable("https://github.com/memslot/memslot"));
        assert!(is_openable("http://localhost:8080/"));
    }

    #[test]
    fn rejects_other_schemes_and_junk() {
        assert!(!is_openable("file:///etc/passwd"));
        assert!(!is_openable("javascript:alert(1)"));
        assert!(!is_openable("https://"));
        assert!(!is_openable("https:///path"));
        assert!(!is_openable("https://exa mple.com"));
        assert!(!is_openable("https://example.com\n"));
        assert!(!is_openable(""));
    }
}
