//! Pure extraction over a parsed ranking page.
//!
//! The site's markup varies between boards and redesigns, so every field is
//! located through an ordered selector fallback chain: selectors are tried
//! in order until one yields data. Items missing a rank or a name are
//! dropped silently and counted, never reported as errors.

use scraper::{ElementRef, Html, Selector};

use crate::types::{Platform, RankEntry};

/// List-item containers, in priority order. The first selector that matches
/// anything wins for the whole page.
const ITEM_SELECTORS: &[&str] = &[
    "li.item",
    "div.item",
    "ul.itemList li",
    "div.name.wrap",
    "div.list-item",
];

/// Rank badge chains. The colored badge class differs per platform.
const ANDROID_RANK_SELECTORS: &[&str] = &["span.icon_rank.android_color", "div.rank", "span.rank"];
const IOS_RANK_SELECTORS: &[&str] = &["span.icon_rank.iphone_color", "div.rank", "span.rank"];

const NAME_SELECTORS: &[&str] = &["p.blog", "h2.title", "div.title"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    /// Item selector that matched, if any.
    pub matched_selector: Option<&'static str>,
    pub items_seen: usize,
    pub dropped_no_rank: usize,
    pub dropped_no_name: usize,
}

/// Extract `(rank, name)` pairs from one ranking page. Returns raw site
/// ranks; ordering, dedup, and truncation happen in
/// `CategorySnapshot::from_scraped`.
pub fn rank_entries(html: &str, platform: Platform) -> (Vec<RankEntry>, ExtractStats) {
    let document = Html::parse_document(html);
    let mut stats = ExtractStats::default();

    let rank_selectors = match platform {
        Platform::Android => ANDROID_RANK_SELECTORS,
        Platform::Ios => IOS_RANK_SELECTORS,
    };

    let mut entries = Vec::new();
    for &selector_str in ITEM_SELECTORS {
        let Ok(item_selector) = Selector::parse(selector_str) else {
            continue;
        };
        let items: Vec<ElementRef> = document.select(&item_selector).collect();
        if items.is_empty() {
            continue;
        }

        stats.matched_selector = Some(selector_str);
        stats.items_seen = items.len();

        for item in items {
            let rank = match first_text(&item, rank_selectors).and_then(|t| t.parse::<u32>().ok())
            {
                Some(r) => r,
                None => {
                    stats.dropped_no_rank += 1;
                    continue;
                }
            };
            let name = match first_text(&item, NAME_SELECTORS) {
                Some(n) => n,
                None => {
                    stats.dropped_no_name += 1;
                    continue;
                }
            };
            entries.push(RankEntry { rank, name });
        }
        break;
    }

    (entries, stats)
}

/// First non-empty, whitespace-normalized text found by the selector chain.
fn first_text(item: &ElementRef, selectors: &[&str]) -> Option<String> {
    for &selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = item.select(&selector).next() {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANDROID_PAGE: &str = r#"
        <ul class="itemList">
          <li class="item">
            <span class="icon_rank android_color">1</span>
            <p class="blog">Alpha Quest</p>
          </li>
          <li class="item">
            <span class="icon_rank android_color">2</span>
            <p class="blog">Beta Blitz</p>
          </li>
        </ul>
    "#;

    #[test]
    fn extracts_rank_and_name() {
        let (entries, stats) = rank_entries(ANDROID_PAGE, Platform::Android);
        assert_eq!(stats.matched_selector, Some("li.item"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], RankEntry { rank: 1, name: "Alpha Quest".to_string() });
        assert_eq!(entries[1], RankEntry { rank: 2, name: "Beta Blitz".to_string() });
    }

    #[test]
    fn falls_back_to_alternate_item_selector() {
        let html = r#"
            <div class="list-item">
              <div class="rank">7</div>
              <h2 class="title">Gamma Go</h2>
            </div>
        "#;
        let (entries, stats) = rank_entries(html, Platform::Ios);
        assert_eq!(stats.matched_selector, Some("div.list-item"));
        assert_eq!(entries, vec![RankEntry { rank: 7, name: "Gamma Go".to_string() }]);
    }

    #[test]
    fn platform_selects_rank_badge() {
        let html = r#"
            <li class="item">
              <span class="icon_rank iphone_color">3</span>
              <p class="blog">Delta Dash</p>
            </li>
        "#;
        // iOS chain hits the badge directly.
        let (ios, _) = rank_entries(html, Platform::Ios);
        assert_eq!(ios[0].rank, 3);
        // Android chain misses the iPhone badge but still lands on the
        // generic fallbacks — here there are none, so the item is dropped.
        let (android, stats) = rank_entries(html, Platform::Android);
        assert!(android.is_empty());
        assert_eq!(stats.dropped_no_rank, 1);
    }

    #[test]
    fn drops_items_missing_fields() {
        let html = r#"
            <li class="item">
              <span class="icon_rank android_color">1</span>
            </li>
            <li class="item">
              <p class="blog">No Rank Game</p>
            </li>
            <li class="item">
              <span class="icon_rank android_color">3</span>
              <p class="blog">Kept Game</p>
            </li>
        "#;
        let (entries, stats) = rank_entries(html, Platform::Android);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Kept Game");
        assert_eq!(stats.items_seen, 3);
        assert_eq!(stats.dropped_no_name, 1);
        assert_eq!(stats.dropped_no_rank, 1);
    }

    #[test]
    fn non_numeric_rank_is_dropped() {
        let html = r#"
            <li class="item">
              <span class="icon_rank android_color">AD</span>
              <p class="blog">Sponsored Slot</p>
            </li>
        "#;
        let (entries, stats) = rank_entries(html, Platform::Android);
        assert!(entries.is_empty());
        assert_eq!(stats.dropped_no_rank, 1);
    }

    #[test]
    fn empty_page_yields_empty() {
        let (entries, stats) = rank_entries("<html><body></body></html>", Platform::Android);
        assert!(entries.is_empty());
        assert_eq!(stats.matched_selector, None);
    }
}
