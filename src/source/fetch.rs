use std::time::Duration;

use reqwest::header::USER_AGENT;
use tracing::{debug, warn};

use crate::config::{BoardGroup, Config};
use crate::error::Result;
use crate::source::extract;
use crate::types::{Category, CategorySnapshot, CountrySheet, RankEntry};

/// The site serves a stripped page to unknown clients; present a plain
/// desktop browser.
const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Default)]
pub struct FetchStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub items_parsed: usize,
    pub dropped_no_rank: usize,
    pub dropped_no_name: usize,
    pub empty_boards: usize,
}

/// Black-box ranking source: yields today's ordered `(rank, name)` list per
/// board over plain HTTP. Fetches are strictly sequential with a fixed
/// politeness delay; a failed page degrades to missing data, never an error.
pub struct RankingSource {
    client: reqwest::Client,
    page_delay: Duration,
}

impl RankingSource {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            page_delay: Duration::from_millis(cfg.page_delay_ms),
        })
    }

    /// Fetch all three boards for one country. Boards that yield nothing
    /// come back empty (EmptyFetch) — the sheet is still produced.
    pub async fn fetch_board_group(
        &self,
        group: &BoardGroup,
        top_n: usize,
        stats: &mut FetchStats,
    ) -> CountrySheet {
        let free = self.fetch_category(group, Category::Free, top_n, stats).await;
        let paid = self.fetch_category(group, Category::Paid, top_n, stats).await;
        let grossing = self
            .fetch_category(group, Category::Grossing, top_n, stats)
            .await;

        CountrySheet {
            country: group.country.to_string(),
            free,
            paid,
            grossing,
        }
    }

    async fn fetch_category(
        &self,
        group: &BoardGroup,
        category: Category,
        top_n: usize,
        stats: &mut FetchStats,
    ) -> CategorySnapshot {
        let mut combined: Vec<RankEntry> = Vec::new();

        for (i, url) in group.urls(category).iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.page_delay).await;
            }

            let html = match self.fetch_page(url).await {
                Ok(html) => {
                    stats.pages_fetched += 1;
                    html
                }
                Err(e) => {
                    stats.pages_failed += 1;
                    warn!("{}/{category}: failed to fetch {url}: {e}", group.country);
                    continue;
                }
            };

            let (entries, page_stats) = extract::rank_entries(&html, group.platform);
            debug!(
                "{}/{category}: {url} → {} entries (selector={:?}, no_rank={}, no_name={})",
                group.country,
                entries.len(),
                page_stats.matched_selector,
                page_stats.dropped_no_rank,
                page_stats.dropped_no_name,
            );
            stats.items_parsed += entries.len();
            stats.dropped_no_rank += page_stats.dropped_no_rank;
            stats.dropped_no_name += page_stats.dropped_no_name;
            combined.extend(entries);
        }

        let snapshot = CategorySnapshot::from_scraped(combined, top_n);
        if snapshot.is_empty() {
            stats.empty_boards += 1;
            warn!("{}/{category}: no entries extracted", group.country);
        }
        snapshot
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let text = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_UA)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}
