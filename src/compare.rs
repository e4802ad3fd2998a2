use std::collections::HashMap;

use tracing::info;

use crate::types::{Category, CategorySnapshot, DailySnapshot};

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// Day-over-day movement of one game on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// Did not appear anywhere in yesterday's board.
    New,
    /// `previous_rank - current_rank`: positive climbed, negative fell.
    Shift(i32),
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delta::New => write!(f, "NEW"),
            Delta::Shift(0) => write!(f, "0"),
            Delta::Shift(n) => write!(f, "{n:+}"),
        }
    }
}

/// One of today's entries with its movement. Ordered by today's rank.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRow {
    pub rank: u32,
    pub name: String,
    pub delta: Delta,
}

// ---------------------------------------------------------------------------
// Board comparison — the core
// ---------------------------------------------------------------------------

/// Align today's board against yesterday's by game name and compute signed
/// rank deltas. One row per entry in today's board, in today's rank order.
/// Names present only yesterday (fell out of the top-N) produce no row.
pub fn compare_boards(today: &CategorySnapshot, yesterday: &CategorySnapshot) -> Vec<DeltaRow> {
    let previous_rank: HashMap<&str, u32> = yesterday
        .entries()
        .iter()
        .map(|e| (e.name.as_str(), e.rank))
        .collect();

    today
        .entries()
        .iter()
        .map(|entry| {
            let delta = match previous_rank.get(entry.name.as_str()) {
                Some(&prev) => Delta::Shift(prev as i32 - entry.rank as i32),
                None => Delta::New,
            };
            DeltaRow {
                rank: entry.rank,
                name: entry.name.clone(),
                delta,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Snapshot comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub category: Category,
    pub rows: Vec<DeltaRow>,
}

/// All comparable boards for one country, assembled into one sheet by the
/// workbook writer: rows keyed by rank, one (name, delta) column pair per
/// category. Ragged boards leave trailing cells empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryComparison {
    pub country: String,
    pub categories: Vec<CategoryComparison>,
}

impl CountryComparison {
    pub fn category(&self, category: Category) -> Option<&CategoryComparison> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Row count of the country's sheet — the longest compared board.
    pub fn max_rows(&self) -> usize {
        self.categories.iter().map(|c| c.rows.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    pub countries: Vec<CountryComparison>,
}

impl ComparisonReport {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn board_count(&self) -> usize {
        self.countries.iter().map(|c| c.categories.len()).sum()
    }

    pub fn row_count(&self) -> usize {
        self.countries
            .iter()
            .flat_map(|c| c.categories.iter())
            .map(|c| c.rows.len())
            .sum()
    }
}

/// Compare today's snapshot against yesterday's. Countries missing from
/// yesterday's file and boards empty on either side are skipped with an
/// informational notice — no rows, no error.
pub fn compare_snapshots(today: &DailySnapshot, yesterday: &DailySnapshot) -> ComparisonReport {
    let mut report = ComparisonReport::default();

    for sheet in &today.sheets {
        let Some(prev_sheet) = yesterday.sheet(&sheet.country) else {
            info!("{}: not in yesterday's snapshot, skipping", sheet.country);
            continue;
        };

        let mut categories = Vec::new();
        for category in Category::ALL {
            let current = sheet.board(category);
            let previous = prev_sheet.board(category);
            if current.is_empty() || previous.is_empty() {
                info!(
                    "{}/{category}: empty on one side (today={}, yesterday={}), skipping",
                    sheet.country,
                    current.len(),
                    previous.len(),
                );
                continue;
            }
            categories.push(CategoryComparison {
                category,
                rows: compare_boards(current, previous),
            });
        }

        if !categories.is_empty() {
            report.countries.push(CountryComparison {
                country: sheet.country.clone(),
                categories,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CountrySheet, RankEntry};

    fn board(names: &[&str]) -> CategorySnapshot {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, n)| RankEntry { rank: i as u32 + 1, name: n.to_string() })
            .collect();
        CategorySnapshot::from_entries(entries)
    }

    #[test]
    fn swap_and_new_entry() {
        // Yesterday: A=1 B=2 C=3. Today: B=1 A=2 D=3.
        let rows = compare_boards(&board(&["B", "A", "D"]), &board(&["A", "B", "C"]));
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].rank, rows[0].name.as_str(), rows[0].delta), (1, "B", Delta::Shift(1)));
        assert_eq!((rows[1].rank, rows[1].name.as_str(), rows[1].delta), (2, "A", Delta::Shift(-1)));
        assert_eq!((rows[2].rank, rows[2].name.as_str(), rows[2].delta), (3, "D", Delta::New));
    }

    #[test]
    fn delta_is_previous_minus_current() {
        // prev=5, cur=2 → +3; prev=2, cur=5 → -3.
        let yesterday = board(&["V", "B", "W", "X", "A"]);
        let today = board(&["V", "A", "W", "X", "B"]);
        let rows = compare_boards(&today, &yesterday);
        assert_eq!(rows[1].delta, Delta::Shift(3));
        assert_eq!(rows[4].delta, Delta::Shift(-3));
    }

    #[test]
    fn unchanged_rank_is_zero() {
        let rows = compare_boards(&board(&["A", "B"]), &board(&["A", "B"]));
        assert_eq!(rows[0].delta, Delta::Shift(0));
        assert_eq!(rows[1].delta, Delta::Shift(0));
    }

    #[test]
    fn vanished_name_produces_no_row() {
        let rows = compare_boards(&board(&["A"]), &board(&["A", "B"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
    }

    #[test]
    fn deterministic() {
        let today = board(&["B", "A", "D"]);
        let yesterday = board(&["A", "B", "C"]);
        let first = compare_boards(&today, &yesterday);
        let second = compare_boards(&today, &yesterday);
        assert_eq!(first, second);
    }

    #[test]
    fn delta_display() {
        assert_eq!(Delta::New.to_string(), "NEW");
        assert_eq!(Delta::Shift(3).to_string(), "+3");
        assert_eq!(Delta::Shift(-3).to_string(), "-3");
        assert_eq!(Delta::Shift(0).to_string(), "0");
    }

    fn sheet(country: &str, free: &[&str], paid: &[&str], grossing: &[&str]) -> CountrySheet {
        CountrySheet {
            country: country.to_string(),
            free: board(free),
            paid: board(paid),
            grossing: board(grossing),
        }
    }

    #[test]
    fn skips_countries_missing_yesterday() {
        let today = DailySnapshot {
            sheets: vec![
                sheet("Korea Android", &["A"], &["B"], &["C"]),
                sheet("US iOS", &["D"], &["E"], &["F"]),
            ],
        };
        let yesterday = DailySnapshot {
            sheets: vec![sheet("Korea Android", &["A"], &["B"], &["C"])],
        };
        let report = compare_snapshots(&today, &yesterday);
        assert_eq!(report.countries.len(), 1);
        assert_eq!(report.countries[0].country, "Korea Android");
        assert_eq!(report.board_count(), 3);
    }

    #[test]
    fn skips_boards_empty_on_either_side() {
        let today = DailySnapshot {
            sheets: vec![sheet("Japan iOS", &["A", "B"], &[], &["C"])],
        };
        let yesterday = DailySnapshot {
            sheets: vec![sheet("Japan iOS", &["A", "B"], &["X"], &[])],
        };
        let report = compare_snapshots(&today, &yesterday);
        // paid empty today, grossing empty yesterday — only free survives.
        assert_eq!(report.board_count(), 1);
        assert_eq!(report.countries[0].categories[0].category, Category::Free);
    }

    #[test]
    fn empty_report_when_nothing_comparable() {
        let today = DailySnapshot { sheets: vec![sheet("US Android", &["A"], &[], &[])] };
        let yesterday = DailySnapshot { sheets: vec![sheet("US iOS", &["A"], &[], &[])] };
        assert!(compare_snapshots(&today, &yesterday).is_empty());
    }
}
