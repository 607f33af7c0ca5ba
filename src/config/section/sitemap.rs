//! `[sitemap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sitemap]
//! path = "sitemap-seo.xml"        # relative to the build output directory
//! changefreq = "weekly"
//! priority = 0.8
//! exclude = ["_assets", "logos"]  # artifact prefixes, never pages
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Valid `changefreq` values per the sitemap protocol.
pub const CHANGE_FREQUENCIES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Sitemap generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Output file name, relative to the build output directory.
    pub path: PathBuf,
    /// Constant change frequency stamped on every entry.
    pub changefreq: String,
    /// Constant priority stamped on every entry.
    pub priority: f32,
    /// Output prefixes excluded from the page set.
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            path: "sitemap-seo.xml".into(),
            changefreq: "weekly".to_string(),
            priority: 0.8,
            exclude: vec!["_assets".to_string(), "logos".to_string()],
        }
    }
}

impl SitemapConfig {
    /// Collect validation errors into `errors`.
    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.path.as_os_str().is_empty() {
            errors.push("[sitemap.path] must not be empty".to_string());
        } else if self.path.is_absolute() {
            errors.push(format!(
                "[sitemap.path] must be relative to the output directory: {}",
                self.path.display()
            ));
        }

        if !CHANGE_FREQUENCIES.contains(&self.changefreq.as_str()) {
            errors.push(format!(
                "[sitemap.changefreq] must be one of {}: got '{}'",
                CHANGE_FREQUENCIES.join(", "),
                self.changefreq
            ));
        }

        if !(0.0..=1.0).contains(&self.priority) {
            errors.push(format!(
                "[sitemap.priority] must be between 0.0 and 1.0: got {}",
                self.priority
            ));
        }
    }
}
