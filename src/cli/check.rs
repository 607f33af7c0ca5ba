//! Sitemap consistency check.
//!
//! Re-runs the output enumerator and compares it with the sitemap on disk.
//! Drift in either direction means the deployed sitemap is lying to
//! crawlers: stale entries point at pages that no longer exist, missing
//! entries leave generated pages undiscoverable.

use crate::{cli::CheckArgs, config::SiteConfig, log, scan};
use anyhow::{Context, Result, bail};
use percent_encoding::percent_decode_str;
use quick_xml::Reader;
use quick_xml::events::Event;
use rustc_hash::FxHashSet;
use std::fs;

/// Compare the sitemap on disk against the scanned output tree.
pub fn run_check(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let sitemap_path = config.build.output.join(&config.sitemap.path);
    let xml = fs::read_to_string(&sitemap_path).with_context(|| {
        format!(
            "Failed to read sitemap {}; run `edgemap build` first",
            sitemap_path.display()
        )
    })?;

    let locs = extract_locs(&xml)?;
    let pages = scan::collect_pages(&config.build.output, &config.sitemap.exclude)?;

    // Split sitemap entries into paths under the configured origin and
    // foreign URLs that do not belong in this sitemap at all.
    let mut entries: Vec<String> = Vec::new();
    let mut foreign: Vec<&String> = Vec::new();
    for loc in &locs {
        match loc_to_path(loc, &config.site.origin) {
            Some(path) => entries.push(path),
            None => foreign.push(loc),
        }
    }

    let page_set: FxHashSet<&str> = pages.iter().map(|p| p.as_str()).collect();
    let entry_set: FxHashSet<&str> = entries.iter().map(String::as_str).collect();

    let stale: Vec<&str> = entries
        .iter()
        .map(String::as_str)
        .filter(|p| !page_set.contains(p))
        .collect();
    let missing: Vec<&str> = pages
        .iter()
        .map(|p| p.as_str())
        .filter(|p| !entry_set.contains(p))
        .collect();

    let drift = stale.len() + missing.len() + foreign.len();
    if drift == 0 {
        log!("check"; "sitemap matches output: {} entr{}", entries.len(),
            if entries.len() == 1 { "y" } else { "ies" });
        return Ok(());
    }

    if !stale.is_empty() {
        log!("check"; "{} stale entr{} (no backing output file):", stale.len(),
            if stale.len() == 1 { "y" } else { "ies" });
        for path in &stale {
            eprintln!("- {path}");
        }
    }
    if !missing.is_empty() {
        log!("check"; "{} page(s) missing from sitemap:", missing.len());
        for path in &missing {
            eprintln!("- {path}");
        }
    }
    if !foreign.is_empty() {
        log!("check"; "{} entr{} outside {}:", foreign.len(),
            if foreign.len() == 1 { "y" } else { "ies" }, config.site.origin);
        for loc in &foreign {
            eprintln!("- {loc}");
        }
    }

    if args.warn_only {
        log!("warning"; "sitemap drift ignored (--warn-only)");
        Ok(())
    } else {
        bail!(
            "sitemap drift: {} stale, {} missing, {} foreign",
            stale.len(),
            missing.len(),
            foreign.len()
        );
    }
}

/// Extract every `<loc>` text value from a sitemap document.
fn extract_locs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut locs = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(e)) if in_loc => {
                let text = e.unescape().context("Failed to unescape <loc> value")?;
                locs.push(text.into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("failed to parse sitemap XML: {e}"),
        }
    }

    Ok(locs)
}

/// Strip the origin from a `loc` URL and percent-decode the remainder.
///
/// Returns `None` for URLs outside the origin.
fn loc_to_path(loc: &str, origin: &str) -> Option<String> {
    let path = loc.strip_prefix(origin.trim_end_matches('/'))?;
    if !path.starts_with('/') {
        return None;
    }
    percent_decode_str(path)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}
