//! Static output enumeration.
//!
//! Walks the static build's output tree and records the URL path of every
//! directory holding an index document. Reserved artifact prefixes (asset
//! and logo output) are filtered out before the result is returned - they
//! are build artifacts, not pages.
//!
//! A missing output root is a legitimate from-scratch state and yields the
//! empty set. A read failure mid-traversal aborts the scan instead: a
//! partial page set would silently produce an incomplete sitemap.

use crate::core::UrlPath;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// File names that mark a directory as a reachable page.
///
/// Static exporters emit `index.html`; extensionless `index` documents
/// show up in pre-rendered trees and count the same.
const INDEX_DOCUMENTS: [&str; 2] = ["index.html", "index"];

/// Collect the URL paths of all statically generated pages under `output_root`.
///
/// The result is deduplicated and, being a `BTreeSet`, iterates in
/// lexicographic order. Scanning an unchanged tree twice yields the
/// identical set.
pub fn collect_pages(output_root: &Path, exclude: &[String]) -> Result<BTreeSet<UrlPath>> {
    let mut pages = BTreeSet::new();
    if !output_root.exists() {
        return Ok(pages);
    }

    walk(output_root, output_root, &mut pages)?;

    let excluded = normalize_excludes(exclude);
    pages.retain(|url| !is_excluded(url, &excluded));
    Ok(pages)
}

/// Depth-first synchronous traversal. Errors propagate; nothing is skipped.
fn walk(dir: &Path, root: &Path, pages: &mut BTreeSet<UrlPath>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, root, pages)?;
        } else if is_index_document(&path) {
            pages.insert(page_url(dir, root));
        }
    }
    Ok(())
}

fn is_index_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| INDEX_DOCUMENTS.contains(&name))
}

/// URL path of the directory holding an index document (`/` for the root).
fn page_url(dir: &Path, root: &Path) -> UrlPath {
    match dir.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => {
            UrlPath::from_page(&format!("/{}", rel.display()))
        }
        _ => UrlPath::from_page("/"),
    }
}

/// Normalize excluded prefixes to `/prefix/` form for comparison.
fn normalize_excludes(exclude: &[String]) -> Vec<String> {
    exclude
        .iter()
        .map(|p| format!("/{}/", p.trim_matches('/')))
        .filter(|p| p != "//")
        .collect()
}

fn is_excluded(url: &UrlPath, excluded: &[String]) -> bool {
    excluded.iter().any(|prefix| url.starts_with(prefix))
}
