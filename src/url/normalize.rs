use crate::{UrlError, UrlResult};
use url::Url;

/// Tracking query parameters removed during canonicalization, besides `utm_*`
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "mc_cid", "igshid"];

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

/// Canonicalizes an absolute URL so it can serve as an article key
///
/// # Canonicalization Steps
///
/// 1. Remove the fragment (everything after #)
/// 2. Remove tracking query parameters (`utm_*`, `fbclid`, `gclid`, ...)
/// 3. Remove the query string entirely if nothing is left
///
/// Host lowercasing, default-port removal and dot-segment removal are already
/// done by [`Url`] parsing. The remaining query parameters keep their order and
/// encoding; the query is only re-serialized when a parameter was dropped.
///
/// # Examples
///
/// ```
/// use prensa::url::canonicalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://Example.com/nota?id=3&utm_source=x#comentarios").unwrap();
/// assert_eq!(canonicalize_url(url).as_str(), "https://example.com/nota?id=3");
/// ```
pub fn canonicalize_url(mut url: Url) -> Url {
    url.set_fragment(None);

    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let kept: Vec<&(String, String)> =
            pairs.iter().filter(|(k, _)| !is_tracking_param(k)).collect();

        if kept.is_empty() {
            url.set_query(None);
        } else if kept.len() != pairs.len() {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    url
}

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - empty hrefs and fragment-only links (same page anchors)
/// - javascript:, mailto:, tel: and data: links
/// - hrefs that cannot be joined onto `base_url`
/// - non-HTTP(S) URLs after resolution
///
/// The returned URL is canonicalized with [`canonicalize_url`].
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    Some(canonicalize_url(absolute))
}

/// Parses an absolute HTTP(S) URL, as required for seed listing pages
pub fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
