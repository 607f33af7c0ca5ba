//! `[router]` section configuration.
//!
//! The path-matcher list itself is compiled into the binary (see
//! `crate::router::SECONDARY_ROUTES`); only the rewrite target origin is
//! deploy-specific, so staging and production can point at different
//! secondary deployments from their respective config files.
//!
//! # Example
//!
//! ```toml
//! [router]
//! secondary_origin = "https://seo.dopaya.com"
//! ```

use serde::{Deserialize, Serialize};

/// Edge router settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Absolute origin of the secondary static deployment.
    /// Rewrite targets are `secondary_origin` + original path-and-query.
    pub secondary_origin: String,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_router_config() {
        let config =
            test_parse_config("[router]\nsecondary_origin = \"https://seo.dopaya.com\"");
        assert_eq!(config.router.secondary_origin, "https://seo.dopaya.com");
    }

    #[test]
    fn test_router_config_default_empty() {
        let config = test_parse_config("");
        assert!(config.router.secondary_origin.is_empty());
    }
}
