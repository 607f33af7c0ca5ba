//! Sitemap build command.

use crate::{
    cli::BuildArgs,
    config::SiteConfig,
    generator::sitemap::build_sitemap,
    utils::date::DateTimeUtc,
};
use anyhow::{Result, anyhow};

/// Scan the output tree and write the sitemap.
///
/// A missing output directory is a legitimate from-scratch state and
/// produces an empty sitemap; read or write failures abort the build with
/// a non-zero exit so a broken sitemap never ships silently.
pub fn run_build(args: &BuildArgs, config: &SiteConfig) -> Result<()> {
    let date = build_date(args)?;
    crate::debug!("build"; "stamping entries with lastmod {}", date.to_ymd());
    build_sitemap(config, date)
}

/// Build date for `lastmod`: the `--date` override or today.
fn build_date(args: &BuildArgs) -> Result<DateTimeUtc> {
    match &args.date {
        Some(raw) => DateTimeUtc::parse(raw)
            .ok_or_else(|| anyhow!("invalid --date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(DateTimeUtc::today_utc()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_date(date: Option<&str>) -> BuildArgs {
        BuildArgs {
            minify: None,
            date: date.map(str::to_string),
            verbose: false,
        }
    }

    #[test]
    fn test_build_date_override() {
        let date = build_date(&args_with_date(Some("2025-01-15"))).unwrap();
        assert_eq!(date, DateTimeUtc::from_ymd(2025, 1, 15));
    }

    #[test]
    fn test_build_date_invalid_override() {
        let result = build_date(&args_with_date(Some("15.01.2025")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_build_date_defaults_to_today() {
        let date = build_date(&args_with_date(None)).unwrap();
        assert!(date.validate().is_ok());
    }
}
