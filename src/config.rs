use crate::error::{AppError, Result};
use crate::types::{Category, Platform};

/// Entries kept per board after merging pages (TOP_N).
pub const TOP_N: usize = 20;

/// HTTP request timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Politeness delay between page fetches (milliseconds).
pub const PAGE_DELAY_MS: u64 = 1000;

/// Default directory for both daily workbooks.
pub const OUTPUT_DIR: &str = "gamerank";

/// Filename prefixes; the date and `.xlsx` extension are appended.
pub const RANKINGS_PREFIX: &str = "game_rankings";
pub const COMPARISON_PREFIX: &str = "comparison_results";

/// One country/platform combination on the ranking site: a label (the sheet
/// name) plus the page URLs for each of the three boards. The second URL of
/// each board is the `?start=20` continuation page.
#[derive(Debug)]
pub struct BoardGroup {
    pub country: &'static str,
    pub platform: Platform,
    pub free: &'static [&'static str],
    pub paid: &'static [&'static str],
    pub grossing: &'static [&'static str],
}

impl BoardGroup {
    pub fn urls(&self, category: Category) -> &'static [&'static str] {
        match category {
            Category::Free => self.free,
            Category::Paid => self.paid,
            Category::Grossing => self.grossing,
        }
    }
}

/// The fixed set of boards scraped each day (applion.jp, game genre 6014).
pub const BOARD_GROUPS: &[BoardGroup] = &[
    BoardGroup {
        country: "Korea Android",
        platform: Platform::Android,
        free: &[
            "https://applion.jp/android/rank/kr/6014/",
            "https://applion.jp/android/rank/kr/6014/?start=20",
        ],
        paid: &[
            "https://applion.jp/android/rank/kr/6014/paid/",
            "https://applion.jp/android/rank/kr/6014/paid/?start=20",
        ],
        grossing: &[
            "https://applion.jp/android/rank/kr/6014/gross/",
            "https://applion.jp/android/rank/kr/6014/gross/?start=20",
        ],
    },
    BoardGroup {
        country: "Japan iOS",
        platform: Platform::Ios,
        free: &[
            "https://applion.jp/iphone/rank/jp/6014/",
            "https://applion.jp/iphone/rank/jp/6014/?start=20",
        ],
        paid: &[
            "https://applion.jp/iphone/rank/jp/6014/paid/",
            "https://applion.jp/iphone/rank/jp/6014/paid/?start=20",
        ],
        grossing: &[
            "https://applion.jp/iphone/rank/jp/6014/gross/",
            "https://applion.jp/iphone/rank/jp/6014/gross/?start=20",
        ],
    },
    BoardGroup {
        country: "US Android",
        platform: Platform::Android,
        free: &[
            "https://applion.jp/android/rank/us/6014/",
            "https://applion.jp/android/rank/us/6014/?start=20",
        ],
        paid: &[
            "https://applion.jp/android/rank/us/6014/paid/",
            "https://applion.jp/android/rank/us/6014/paid/?start=20",
        ],
        grossing: &[
            "https://applion.jp/android/rank/us/6014/gross/",
            "https://applion.jp/android/rank/us/6014/gross/?start=20",
        ],
    },
    BoardGroup {
        country: "US iOS",
        platform: Platform::Ios,
        free: &[
            "https://applion.jp/iphone/rank/us/6014/",
            "https://applion.jp/iphone/rank/us/6014/?start=20",
        ],
        paid: &[
            "https://applion.jp/iphone/rank/us/6014/paid/",
            "https://applion.jp/iphone/rank/us/6014/paid/?start=20",
        ],
        grossing: &[
            "https://applion.jp/iphone/rank/us/6014/gross/",
            "https://applion.jp/iphone/rank/us/6014/gross/?start=20",
        ],
    },
];

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory both workbooks are written to (OUTPUT_DIR)
    pub output_dir: String,
    /// Entries kept per board (TOP_N)
    pub top_n: usize,
    /// HTTP request timeout in seconds (REQUEST_TIMEOUT_SECS)
    pub request_timeout_secs: u64,
    /// Delay between page fetches in milliseconds (PAGE_DELAY_MS)
    pub page_delay_ms: u64,
}

impl Config {
    /// A malformed env override is a configuration error, not a silent
    /// fallback to the default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| OUTPUT_DIR.to_string()),
            top_n: parse_top_n(&std::env::var("TOP_N").unwrap_or_else(|_| TOP_N.to_string()))?,
            request_timeout_secs: parse_u64(
                "REQUEST_TIMEOUT_SECS",
                &std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string()),
            )?,
            page_delay_ms: parse_u64(
                "PAGE_DELAY_MS",
                &std::env::var("PAGE_DELAY_MS").unwrap_or_else(|_| PAGE_DELAY_MS.to_string()),
            )?,
        })
    }
}

fn parse_top_n(raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| AppError::Config("TOP_N must be a positive integer".to_string()))
}

fn parse_u64(name: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| AppError::Config(format!("{name} must be an unsigned integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_must_be_positive() {
        assert_eq!(parse_top_n("20").unwrap(), 20);
        assert!(parse_top_n("0").is_err());
        assert!(parse_top_n("twenty").is_err());
        assert!(parse_top_n("-1").is_err());
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert_eq!(parse_u64("PAGE_DELAY_MS", "250").unwrap(), 250);
        assert!(parse_u64("PAGE_DELAY_MS", "fast").is_err());
        assert!(parse_u64("REQUEST_TIMEOUT_SECS", "1.5").is_err());
    }
}
