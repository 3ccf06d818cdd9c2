//! URL joining as the host's URL service performs it.

/// Join a base with path segments using single slashes.
///
/// The base keeps any trailing-slash-free form; each segment is stripped of
/// surrounding slashes and empty segments are skipped, so
/// `url_join("h", &["article", "/foo"])` yields `h/article/foo`.
pub fn url_join(base: &str, segments: &[&str]) -> String {
    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments {
        let trimmed = segment.trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        joined.push('/');
        joined.push_str(trimmed);
    }
    joined
}
