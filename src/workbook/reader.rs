use std::path::Path;

use umya_spreadsheet::Worksheet;

use crate::error::{AppError, Result};
use crate::types::{CategorySnapshot, CountrySheet, DailySnapshot, RankEntry};

/// Inverse of `write_rankings`. Returns `Ok(None)` when the file does not
/// exist — an absent prior snapshot is an informational condition for the
/// caller, not an error. A blank name cell ends that board's column
/// (boards are ragged, rows are contiguous from rank 1).
pub fn read_rankings(path: &Path) -> Result<Option<DailySnapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| AppError::Workbook(e.to_string()))?;

    let mut sheets = Vec::new();
    for sheet in book.get_sheet_collection() {
        let highest_row = sheet.get_highest_row();
        sheets.push(CountrySheet {
            country: sheet.get_name().to_string(),
            free: read_board(sheet, 2, highest_row),
            paid: read_board(sheet, 3, highest_row),
            grossing: read_board(sheet, 4, highest_row),
        });
    }

    Ok(Some(DailySnapshot { sheets }))
}

/// Read one board column downward from the first data row.
fn read_board(sheet: &Worksheet, col: u32, highest_row: u32) -> CategorySnapshot {
    let mut entries = Vec::new();
    for row in 2..=highest_row {
        let name = sheet.get_value((col, row));
        if name.is_empty() {
            break;
        }
        entries.push(RankEntry { rank: row - 1, name });
    }
    CategorySnapshot::from_entries(entries)
}
