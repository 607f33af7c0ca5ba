//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve URL to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    // This prevents traversal via symlinks or encoded sequences
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        // Path escapes serve_root - reject
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_resolves_file_directly() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sitemap-seo.xml");

        let resolved = resolve_path("/sitemap-seo.xml", dir.path()).unwrap();
        assert!(resolved.ends_with("sitemap-seo.xml"));
    }

    #[test]
    fn test_resolves_directory_index() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "brands/acme/index.html");

        let resolved = resolve_path("/brands/acme/", dir.path()).unwrap();
        assert!(resolved.ends_with("brands/acme/index.html"));
    }

    #[test]
    fn test_strips_query_string() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "brands/acme/index.html");

        assert!(resolve_path("/brands/acme/?ref=home", dir.path()).is_some());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_path("/brands/ghost/", dir.path()).is_none());
    }

    #[test]
    fn test_directory_without_index_is_none() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "brands/acme/data.json");

        assert!(resolve_path("/brands/acme/", dir.path()).is_none());
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");

        assert!(resolve_path("/../secret", dir.path()).is_none());
        assert!(resolve_path("/%2e%2e/secret", dir.path()).is_none());
    }
}
