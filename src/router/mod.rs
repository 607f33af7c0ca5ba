//! Edge routing rules for the split deployment.
//!
//! A fixed set of path prefixes belongs to the secondary static deployment;
//! every other path stays with the primary application. The classifier is a
//! total function over the request target: it never fails, it only decides.
//! The actual proxy fetch is the hosting platform's job - this module emits
//! the rewrite target and nothing else.

/// How a matcher compares against a request pathname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Pathname starts with the given prefix.
    Prefix(&'static str),
    /// Pathname equals the given value exactly.
    Exact(&'static str),
}

/// A single routing rule.
#[derive(Debug)]
pub struct Matcher {
    /// Stable name used in diagnostics and `route --json` output.
    pub name: &'static str,
    pub pattern: Pattern,
}

impl Matcher {
    fn matches(&self, pathname: &str) -> bool {
        match self.pattern {
            Pattern::Prefix(prefix) => pathname.starts_with(prefix),
            Pattern::Exact(exact) => pathname == exact,
        }
    }
}

/// Paths owned by the secondary deployment, evaluated in order.
///
/// Exact `/brands` (no trailing segment) is reserved for the primary
/// application, so the brands rules match on the slash-terminated prefix.
/// The list is fixed at compile time; only the target origin is
/// deploy-specific configuration.
pub const SECONDARY_ROUTES: [Matcher; 4] = [
    Matcher {
        name: "brands",
        pattern: Pattern::Prefix("/brands/"),
    },
    Matcher {
        name: "brands-de",
        pattern: Pattern::Prefix("/de/brands/"),
    },
    Matcher {
        name: "assets",
        pattern: Pattern::Prefix("/_assets/"),
    },
    Matcher {
        name: "sitemap",
        pattern: Pattern::Exact("/sitemap-seo.xml"),
    },
];

/// Routing decision for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Continue normal handling by the primary application.
    PassThrough,
    /// Rewrite to an absolute URL on the secondary deployment.
    Rewrite { target: String },
}

impl RouteAction {
    /// Whether this decision is a rewrite.
    pub fn is_rewrite(&self) -> bool {
        matches!(self, Self::Rewrite { .. })
    }
}

/// Find the first rule matching a pathname, if any.
pub fn classify(pathname: &str) -> Option<&'static Matcher> {
    SECONDARY_ROUTES.iter().find(|m| m.matches(pathname))
}

/// Decide how to route a request target.
///
/// Matching is performed on the pathname only; query string and fragment
/// are carried into the rewrite target byte-for-byte. The request body is
/// never touched.
pub fn decide(target: &str, secondary_origin: &str) -> RouteAction {
    match classify(pathname_of(target)) {
        Some(_) => RouteAction::Rewrite {
            target: format!("{}{}", secondary_origin.trim_end_matches('/'), target),
        },
        None => RouteAction::PassThrough,
    }
}

/// Pathname component of a request target (everything before `?` or `#`).
pub fn pathname_of(target: &str) -> &str {
    target.split(['?', '#']).next().unwrap_or(target)
}
