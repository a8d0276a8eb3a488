//! URL construction helpers for the log endpoint.

use tailsync_core::PageSize;
use url::Url;

use crate::error::{HttpResult, HttpSourceError};

/// Split a configured endpoint path into its non-empty segments.
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the URL for one page of a service's logs.
///
/// The service id is percent-encoded as a single path segment, so ids
/// containing `/` or spaces cannot escape the endpoint.
pub fn build_logs_url(
    base_url: &Url,
    logs_path: &[String],
    service_id: &str,
    page_size: PageSize,
) -> HttpResult<Url> {
    if service_id.trim().is_empty() {
        return Err(HttpSourceError::EmptyServiceId);
    }

    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    let limit = page_size.as_raw().to_string();
    url.path_segments_mut()
        .map_err(|()| HttpSourceError::UnusableBaseUrl {
            url: base_url.to_string(),
        })?
        .pop_if_empty()
        .extend(logs_path)
        .push(service_id)
        .push(&limit);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_path() -> Vec<String> {
        path_segments("x-api/service/logs")
    }

    #[test]
    fn test_recent_page_url() {
        let base = Url::parse("http://127.0.0.1:8090").unwrap();
        let url = build_logs_url(&base, &default_path(), "svc_1", PageSize::recent(10).unwrap())
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8090/x-api/service/logs/svc_1/10");
    }

    #[test]
    fn test_all_page_url_uses_sentinel() {
        let base = Url::parse("http://127.0.0.1:8090/").unwrap();
        let url = build_logs_url(&base, &default_path(), "svc_1", PageSize::All).unwrap();
        assert_eq!(url.path(), "/x-api/service/logs/svc_1/-1");
    }

    #[test]
    fn test_base_url_with_prefix_path() {
        let base = Url::parse("https://host.example/launcher/?x=1#frag").unwrap();
        let url = build_logs_url(&base, &default_path(), "svc", PageSize::All).unwrap();
        assert_eq!(
            url.as_str(),
            "https://host.example/launcher/x-api/service/logs/svc/-1"
        );
    }

    #[test]
    fn test_service_id_is_encoded_as_one_segment() {
        let base = Url::parse("http://localhost").unwrap();
        let url = build_logs_url(&base, &default_path(), "a/b c", PageSize::All).unwrap();
        assert_eq!(url.path(), "/x-api/service/logs/a%2Fb%20c/-1");
    }

    #[test]
    fn test_empty_service_id_is_rejected() {
        let base = Url::parse("http://localhost").unwrap();
        let result = build_logs_url(&base, &default_path(), "  ", PageSize::All);
        assert!(matches!(result, Err(HttpSourceError::EmptyServiceId)));
    }

    #[test]
    fn test_cannot_be_a_base_url_is_rejected() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        let result = build_logs_url(&base, &default_path(), "svc", PageSize::All);
        assert!(matches!(result, Err(HttpSourceError::UnusableBaseUrl { .. })));
    }

    #[test]
    fn test_path_segments_ignores_slashes() {
        assert_eq!(path_segments("/api//logs/"), vec!["api", "logs"]);
        assert!(path_segments("").is_empty());
    }
}
