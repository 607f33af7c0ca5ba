//! Configuration section definitions.

mod build;
mod router;
mod serve;
mod site;
mod sitemap;

pub use build::BuildConfig;
pub use router::RouterConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use sitemap::{CHANGE_FREQUENCIES, SitemapConfig};
