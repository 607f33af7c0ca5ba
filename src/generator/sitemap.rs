//! Sitemap generation.
//!
//! Turns the scanned page set into a `sitemap-seo.xml` for search engine
//! indexing. Every entry carries the same build-date `lastmod` and the
//! configured constant `changefreq`/`priority`.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://dopaya.com/brands/acme/</loc>
//!     <lastmod>2025-01-15</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig, core::UrlPath, generator::minify_xml, log, scan, utils::date::DateTimeUtc,
};
use anyhow::{Context, Result, bail};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Per-file entry ceiling imposed by the sitemap format.
pub const MAX_URLS: usize = 50_000;

/// Scan the output tree and write the sitemap.
pub fn build_sitemap(config: &SiteConfig, date: DateTimeUtc) -> Result<()> {
    let pages = scan::collect_pages(&config.build.output, &config.sitemap.exclude)?;
    log!("scan"; "{} page(s) under {}", pages.len(), config.build.output.display());

    let sitemap = Sitemap::build(&pages, config, date)?;
    sitemap.write(config)
}

#[derive(Debug)]
struct Sitemap {
    urls: Vec<UrlEntry>,
    changefreq: String,
    priority: f32,
}

#[derive(Debug)]
struct UrlEntry {
    loc: String,
    lastmod: String,
}

impl Sitemap {
    /// Assemble entries from the collected page set.
    ///
    /// Past [`MAX_URLS`] the file is invalid to crawlers, so the build has
    /// to fail rather than emit it. The path forward at that scale is a set
    /// of split sitemaps behind a sitemap index file.
    fn build(pages: &BTreeSet<UrlPath>, config: &SiteConfig, date: DateTimeUtc) -> Result<Self> {
        if pages.len() > MAX_URLS {
            bail!(
                "sitemap would contain {} entries, exceeding the {} per-file ceiling; \
                 split the output into multiple sitemaps referenced by an index file",
                pages.len(),
                MAX_URLS
            );
        }

        let origin = config.site.origin.trim_end_matches('/');
        let lastmod = date.to_ymd();

        let urls: Vec<UrlEntry> = pages
            .iter()
            .map(|page| UrlEntry {
                loc: format!("{}{}", origin, page.to_encoded()),
                lastmod: lastmod.clone(),
            })
            .collect();

        Ok(Self {
            urls,
            changefreq: config.sitemap.changefreq.clone(),
            priority: config.sitemap.priority,
        })
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod);
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(&escape_xml(&self.changefreq));
            xml.push_str("</changefreq>\n    <priority>");
            xml.push_str(&format!("{}", self.priority));
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.build.output.join(&config.sitemap.path);
        let xml = self.into_xml();
        let xml = minify_xml(xml.as_bytes(), config.build.minify);

        // A from-scratch run may not have an output tree yet; the sitemap
        // still has to land somewhere deterministic.
        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn sitemap_for(paths: &[&str], origin: &str, date: DateTimeUtc) -> Sitemap {
        let mut config = test_parse_config("");
        config.site.origin = origin.to_string();
        let pages: BTreeSet<UrlPath> = paths.iter().map(|p| UrlPath::from_page(p)).collect();
        Sitemap::build(&pages, &config, date).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty() {
        let sitemap = sitemap_for(&[], "https://dopaya.com", DateTimeUtc::from_ymd(2025, 1, 15));
        let xml = sitemap.into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_two_pages_exact_fields() {
        let sitemap = sitemap_for(
            &["/", "/about/"],
            "https://dopaya.com",
            DateTimeUtc::from_ymd(2025, 1, 15),
        );
        let xml = sitemap.into_xml();

        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://dopaya.com/</loc>"));
        assert!(xml.contains("<loc>https://dopaya.com/about/</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-01-15</lastmod>").count(), 2);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 2);
    }

    #[test]
    fn test_sitemap_entries_sorted() {
        let sitemap = sitemap_for(
            &["/brands/zeta/", "/", "/about/"],
            "https://dopaya.com",
            DateTimeUtc::from_ymd(2025, 1, 15),
        );
        let xml = sitemap.into_xml();

        let root = xml.find("<loc>https://dopaya.com/</loc>").unwrap();
        let about = xml.find("<loc>https://dopaya.com/about/</loc>").unwrap();
        let zeta = xml.find("<loc>https://dopaya.com/brands/zeta/</loc>").unwrap();
        assert!(root < about && about < zeta);
    }

    #[test]
    fn test_sitemap_escapes_loc() {
        let mut config = test_parse_config("");
        config.site.origin = "https://dopaya.com".to_string();
        let pages: BTreeSet<UrlPath> = [UrlPath::from_page("/brands/a&b/")].into();
        let sitemap =
            Sitemap::build(&pages, &config, DateTimeUtc::from_ymd(2025, 1, 15)).unwrap();
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://dopaya.com/brands/a&amp;b/</loc>"));
        assert!(!xml.contains("a&b"));
    }

    #[test]
    fn test_sitemap_percent_encodes_non_ascii() {
        let sitemap = sitemap_for(
            &["/de/brands/café/"],
            "https://dopaya.com",
            DateTimeUtc::from_ymd(2025, 1, 15),
        );
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://dopaya.com/de/brands/caf%C3%A9/</loc>"));
    }

    #[test]
    fn test_sitemap_origin_trailing_slash_normalized() {
        let sitemap = sitemap_for(
            &["/about/"],
            "https://dopaya.com/",
            DateTimeUtc::from_ymd(2025, 1, 15),
        );
        let xml = sitemap.into_xml();

        assert!(xml.contains("<loc>https://dopaya.com/about/</loc>"));
    }

    #[test]
    fn test_sitemap_ceiling_enforced() {
        let config = test_parse_config("");
        let pages: BTreeSet<UrlPath> = (0..=MAX_URLS)
            .map(|i| UrlPath::from_page(&format!("/brands/{i:05}/")))
            .collect();

        let result = Sitemap::build(&pages, &config, DateTimeUtc::from_ymd(2025, 1, 15));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ceiling"));
    }

    #[test]
    fn test_sitemap_at_ceiling_is_ok() {
        let config = test_parse_config("");
        let pages: BTreeSet<UrlPath> = (0..MAX_URLS)
            .map(|i| UrlPath::from_page(&format!("/brands/{i:05}/")))
            .collect();

        assert!(Sitemap::build(&pages, &config, DateTimeUtc::from_ymd(2025, 1, 15)).is_ok());
    }

    #[test]
    fn test_xml_structure() {
        let sitemap = sitemap_for(
            &["/"],
            "https://dopaya.com",
            DateTimeUtc::from_ymd(2025, 1, 15),
        );
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
    }
}
