//! CLI argument definitions using clap derive macros.

use clap::Parser;

use pdf_crawler::DEFAULT_MAX_ATTEMPTS;

/// Directory PDFs are saved into when `--output-dir` is not given.
pub const DEFAULT_SAVE_DIR: &str = "download/pdf_downloads";

/// Download every PDF linked from a listing page.
#[derive(Parser, Debug)]
#[command(name = "pdf-crawler")]
#[command(author, version, about)]
pub struct Args {
    /// Listing page to scan for PDF links
    pub base_url: Option<String>,

    /// Directory to save PDFs into (created if missing)
    #[arg(short, long, default_value = DEFAULT_SAVE_DIR)]
    pub output_dir: String,

    /// Attempts per PDF before giving up (1-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ATTEMPTS as u8, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_retries: u8,

    /// Extra request header as NAME:VALUE (repeatable, overrides defaults)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["pdf-crawler"]).unwrap();
        assert_eq!(args.base_url, None);
        assert_eq!(args.output_dir, DEFAULT_SAVE_DIR);
        assert_eq!(args.max_retries, 3);
        assert!(args.headers.is_empty());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_positional_url_and_output_dir() {
        let args =
            Args::try_parse_from(["pdf-crawler", "https://x.org/list/", "-o", "/tmp/pdfs"]).unwrap();
        assert_eq!(args.base_url.as_deref(), Some("https://x.org/list/"));
        assert_eq!(args.output_dir, "/tmp/pdfs");
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["pdf-crawler", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_max_retries_out_of_range_rejected() {
        assert!(Args::try_parse_from(["pdf-crawler", "-r", "0"]).is_err());
        assert!(Args::try_parse_from(["pdf-crawler", "-r", "11"]).is_err());
        let args = Args::try_parse_from(["pdf-crawler", "-r", "5"]).unwrap();
        assert_eq!(args.max_retries, 5);
    }

    #[test]
    fn test_cli_headers_are_repeatable() {
        let args = Args::try_parse_from([
            "pdf-crawler",
            "-H",
            "Referer: https://x.org/",
            "--header",
            "Accept:application/pdf",
        ])
        .unwrap();
        assert_eq!(
            args.headers,
            vec![
                ("Referer".to_string(), "https://x.org/".to_string()),
                ("Accept".to_string(), "application/pdf".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_header_rejects_missing_colon_and_empty_name() {
        assert!(parse_header("NoColon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["pdf-crawler", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
