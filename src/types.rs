use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

/// The three ranking boards published per country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Free,
    Paid,
    Grossing,
}

impl Category {
    /// Fixed board order — column order in both workbooks.
    pub const ALL: [Category; 3] = [Category::Free, Category::Paid, Category::Grossing];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Free => "free",
            Category::Paid => "paid",
            Category::Grossing => "grossing",
        };
        write!(f, "{s}")
    }
}

/// Store platform — selects the rank badge selector chain on the ranking site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// One ranked game. Rank is 1-based and unique within a board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub rank: u32,
    pub name: String,
}

/// Ordered top-N capture of one (country, category) board for one day.
///
/// Invariant: entries are ascending by rank and ranks are contiguous
/// `1..=len`. Only `from_scraped` and `from_entries` construct non-empty
/// snapshots, and both enforce it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySnapshot {
    entries: Vec<RankEntry>,
}

impl CategorySnapshot {
    /// Normalize raw scraped entries: sort by the rank printed on the site,
    /// keep the best rank per name, truncate to `top_n`, then renumber
    /// `1..=len` so gaps left by dropped items disappear.
    pub fn from_scraped(mut entries: Vec<RankEntry>, top_n: usize) -> Self {
        entries.sort_by_key(|e| e.rank);

        let mut seen: HashSet<String> = HashSet::new();
        entries.retain(|e| seen.insert(e.name.clone()));
        entries.truncate(top_n);

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
        Self { entries }
    }

    /// Build from entries already in final rank order (workbook reads).
    /// Ranks are reassigned `1..=len` regardless of input values.
    pub fn from_entries(entries: Vec<RankEntry>) -> Self {
        Self::from_scraped(entries, usize::MAX)
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All three boards for one country, one workbook sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySheet {
    pub country: String,
    pub free: CategorySnapshot,
    pub paid: CategorySnapshot,
    pub grossing: CategorySnapshot,
}

impl CountrySheet {
    pub fn board(&self, category: Category) -> &CategorySnapshot {
        match category {
            Category::Free => &self.free,
            Category::Paid => &self.paid,
            Category::Grossing => &self.grossing,
        }
    }

    /// Longest board — row count of the country's sheet.
    pub fn max_len(&self) -> usize {
        Category::ALL
            .iter()
            .map(|&c| self.board(c).len())
            .max()
            .unwrap_or(0)
    }
}

/// One day's capture across all configured countries. Immutable after
/// creation; a new day produces a new workbook, never mutates a prior one.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySnapshot {
    /// Configured country order, which is also sheet order in the workbook.
    pub sheets: Vec<CountrySheet>,
}

impl DailySnapshot {
    pub fn sheet(&self, country: &str) -> Option<&CountrySheet> {
        self.sheets.iter().find(|s| s.country == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u32, name: &str) -> RankEntry {
        RankEntry { rank, name: name.to_string() }
    }

    #[test]
    fn from_scraped_sorts_and_renumbers() {
        let snap = CategorySnapshot::from_scraped(
            vec![entry(3, "C"), entry(1, "A"), entry(2, "B")],
            20,
        );
        let names: Vec<&str> = snap.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        let ranks: Vec<u32> = snap.entries().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn from_scraped_closes_gaps() {
        // Items dropped during extraction leave holes in the site ranks.
        let snap = CategorySnapshot::from_scraped(
            vec![entry(1, "A"), entry(4, "D"), entry(9, "I")],
            20,
        );
        let ranks: Vec<u32> = snap.entries().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn from_scraped_dedups_names_keeping_best_rank() {
        // The same game can appear on both the base page and the
        // continuation page.
        let snap = CategorySnapshot::from_scraped(
            vec![entry(5, "A"), entry(1, "A"), entry(2, "B")],
            20,
        );
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.entries()[0], entry(1, "A"));
        assert_eq!(snap.entries()[1], entry(2, "B"));
    }

    #[test]
    fn from_scraped_truncates_to_top_n() {
        let entries: Vec<RankEntry> =
            (1..=40).map(|r| entry(r, &format!("G{r}"))).collect();
        let snap = CategorySnapshot::from_scraped(entries, 20);
        assert_eq!(snap.len(), 20);
        assert_eq!(snap.entries().last().unwrap().rank, 20);
    }

    #[test]
    fn ranks_unique_and_contiguous() {
        let entries: Vec<RankEntry> =
            [7, 7, 2, 30, 11].iter().enumerate()
                .map(|(i, &r)| entry(r, &format!("G{i}")))
                .collect();
        let snap = CategorySnapshot::from_scraped(entries, 20);
        let ranks: Vec<u32> = snap.entries().iter().map(|e| e.rank).collect();
        let expected: Vec<u32> = (1..=snap.len() as u32).collect();
        assert_eq!(ranks, expected);
    }
}
