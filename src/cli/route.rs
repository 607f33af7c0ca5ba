//! Route classification command.
//!
//! Classifies request paths against the compiled-in routing rules and
//! prints the decision for each, either as plain text or JSON for use in
//! deploy smoke tests.

use crate::{
    cli::RouteArgs,
    config::SiteConfig,
    log,
    router::{self, RouteAction},
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::{BufRead, Write, stdout};

/// One classified path, as emitted by `route --json`.
#[derive(Debug, Serialize)]
struct Decision {
    path: String,
    matched: Option<&'static str>,
    target: Option<String>,
}

impl Decision {
    fn new(path: &str, config: &SiteConfig) -> Self {
        let matched = router::classify(router::pathname_of(path)).map(|m| m.name);
        let target = match router::decide(path, &config.router.secondary_origin) {
            RouteAction::Rewrite { target } => Some(target),
            RouteAction::PassThrough => None,
        };
        Self {
            path: path.to_string(),
            matched,
            target,
        }
    }
}

/// Classify paths from arguments (or stdin) and print the decisions.
pub fn run_route(args: &RouteArgs, config: &SiteConfig) -> Result<()> {
    let paths = collect_paths(args)?;
    if paths.is_empty() {
        bail!("no paths given; pass paths as arguments or `-` to read stdin");
    }

    let decisions: Vec<Decision> = paths.iter().map(|p| Decision::new(p, config)).collect();

    if args.json {
        print_json(&decisions, args.pretty)?;
    } else {
        print_plain(&decisions);
    }

    let rewrites = decisions.iter().filter(|d| d.target.is_some()).count();
    log!("route"; "{} path(s): {} rewrite(s), {} pass-through",
        decisions.len(), rewrites, decisions.len() - rewrites);
    Ok(())
}

/// Paths from CLI arguments, or stdin when the sole argument is `-`.
fn collect_paths(args: &RouteArgs) -> Result<Vec<String>> {
    if args.paths.len() == 1 && args.paths[0] == "-" {
        let stdin = std::io::stdin();
        let mut paths = Vec::new();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read path from stdin")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                paths.push(trimmed.to_string());
            }
        }
        Ok(paths)
    } else {
        Ok(args.paths.clone())
    }
}

fn print_json(decisions: &[Decision], pretty: bool) -> Result<()> {
    let mut out = stdout().lock();
    let json = if pretty {
        serde_json::to_string_pretty(decisions)?
    } else {
        serde_json::to_string(decisions)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn print_plain(decisions: &[Decision]) {
    let mut out = stdout().lock();
    for decision in decisions {
        let line = match &decision.target {
            Some(target) => format!("{} -> {}", decision.path, target),
            None => format!("{} (pass-through)", decision.path),
        };
        writeln!(out, "{line}").ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn config() -> SiteConfig {
        let mut config = test_parse_config("");
        config.router.secondary_origin = "https://seo.dopaya.com".to_string();
        config
    }

    #[test]
    fn test_decision_rewrite() {
        let decision = Decision::new("/brands/acme", &config());
        assert_eq!(decision.matched, Some("brands"));
        assert_eq!(
            decision.target.as_deref(),
            Some("https://seo.dopaya.com/brands/acme")
        );
    }

    #[test]
    fn test_decision_pass_through() {
        let decision = Decision::new("/projects", &config());
        assert_eq!(decision.matched, None);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn test_decision_query_ignored_for_matching() {
        let decision = Decision::new("/brands/acme?ref=home", &config());
        assert_eq!(decision.matched, Some("brands"));
        assert_eq!(
            decision.target.as_deref(),
            Some("https://seo.dopaya.com/brands/acme?ref=home")
        );
    }

    #[test]
    fn test_decision_serializes() {
        let decision = Decision::new("/sitemap-seo.xml", &config());
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("\"matched\":\"sitemap\""));
        assert!(json.contains("https://seo.dopaya.com/sitemap-seo.xml"));
    }
}
