//! Backend URL handling
//!
//! Configured origins may arrive with trailing slashes from the environment,
//! the config file or the command line; everything is normalized here before
//! endpoint paths are appended.

/// Remove every trailing slash from a base URL.
///
/// # Examples
///
/// ```
/// use medibot::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("https://medibot.example.org"), "https://medibot.example.org");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash.
///
/// # Examples
///
/// ```
/// use medibot::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/api/chat"),
///     "http://localhost:8000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}
