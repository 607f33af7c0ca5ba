//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! origin = "https://dopaya.com"   # canonical origin for sitemap entries
//! ```

use serde::{Deserialize, Serialize};

/// Primary site metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Canonical origin prepended to every sitemap `loc`.
    /// Must be a bare origin: scheme + host, no path.
    pub origin: String,
}
