use crate::config::get_config;

/// Absolute URL for a stored media path. Paths that are already
/// absolute (mirrored remote avatars) pass through untouched.
pub fn media_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = get_config().media_base_url.trim_end_matches('/');
    format!("{}/media/{}", base, path.trim_start_matches('/'))
}

pub fn media_url_opt(path: Option<&str>) -> Option<String> {
    path.map(media_url)
}
