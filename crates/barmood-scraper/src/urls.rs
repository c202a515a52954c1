//! URL helpers: detail-link resolution and host extraction.

use reqwest::Url;

/// Resolves a listing's `href` into an absolute detail-page URL on
/// `site_origin`.
///
/// Relative links are joined onto `site_origin`; absolute and
/// protocol-relative links are accepted only when they land on the same
/// origin. Returns `None` for empty, fragment-only, `javascript:`/`mailto:`
/// and off-site links, or when the origin itself is not a valid base URL.
#[must_use]
pub fn resolve_detail_url(href: &str, site_origin: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    let base = Url::parse(&format!("{}/", site_origin.trim_end_matches('/'))).ok()?;
    let resolved = base.join(href).ok()?;
    (resolved.origin() == base.origin()).then(|| resolved.to_string())
}

/// Returns the host portion of `url`, or the input unchanged when it does
/// not parse.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
