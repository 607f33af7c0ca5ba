//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "out"     # static export root the enumerator walks
//! minify = false     # strip whitespace from the generated sitemap
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Static export output root (relative to the project root).
    pub output: PathBuf,
    /// Minify the generated sitemap.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "out".into(),
            minify: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert!(!config.build.minify);
    }

    #[test]
    fn test_build_config_override() {
        let config = test_parse_config("[build]\noutput = \"dist\"\nminify = true");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
    }
}
