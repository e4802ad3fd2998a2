use std::path::Path;

use crate::compare::{ComparisonReport, Delta};
use crate::error::{AppError, Result};
use crate::types::{Category, DailySnapshot};

/// Serialize today's boards: one sheet per country, header row
/// `rank, free name, paid name, grossing name`, rows indexed by rank.
/// Shorter boards leave trailing cells empty.
pub fn write_rankings(snapshot: &DailySnapshot, path: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    book.remove_sheet_by_name("Sheet1")
        .map_err(|e| AppError::Workbook(e.to_string()))?;

    for country_sheet in &snapshot.sheets {
        let sheet = book
            .new_sheet(&country_sheet.country)
            .map_err(|e| AppError::Workbook(e.to_string()))?;

        sheet.get_cell_mut((1, 1)).set_value("rank");
        for (i, category) in Category::ALL.iter().enumerate() {
            let col = i as u32 + 2;
            sheet
                .get_cell_mut((col, 1))
                .set_value(format!("{category} name"));
        }

        for rank in 1..=country_sheet.max_len() as u32 {
            let row = rank + 1;
            sheet.get_cell_mut((1, row)).set_value_number(rank);
            for (i, &category) in Category::ALL.iter().enumerate() {
                let col = i as u32 + 2;
                if let Some(entry) = country_sheet.board(category).entries().get(rank as usize - 1)
                {
                    sheet.get_cell_mut((col, row)).set_value(entry.name.clone());
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| AppError::Workbook(e.to_string()))
}

/// Serialize the comparison report: one sheet per country, a two-level
/// header (category label over a `name`/`delta` column pair), rows keyed by
/// today's rank. Deltas are written as numbers, NEW as text. Boards that
/// were skipped leave their column pair blank.
pub fn write_comparison(report: &ComparisonReport, path: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    book.remove_sheet_by_name("Sheet1")
        .map_err(|e| AppError::Workbook(e.to_string()))?;

    for country in &report.countries {
        let sheet = book
            .new_sheet(&country.country)
            .map_err(|e| AppError::Workbook(e.to_string()))?;

        sheet.get_cell_mut((1, 1)).set_value("rank");
        for (i, category) in Category::ALL.iter().enumerate() {
            let name_col = i as u32 * 2 + 2;
            sheet
                .get_cell_mut((name_col, 1))
                .set_value(category.to_string());
            sheet.get_cell_mut((name_col, 2)).set_value("name");
            sheet.get_cell_mut((name_col + 1, 2)).set_value("delta");
        }

        for rank in 1..=country.max_rows() as u32 {
            let row = rank + 2;
            sheet.get_cell_mut((1, row)).set_value_number(rank);
            for (i, &category) in Category::ALL.iter().enumerate() {
                let name_col = i as u32 * 2 + 2;
                let Some(comparison) = country.category(category) else {
                    continue;
                };
                let Some(delta_row) = comparison.rows.get(rank as usize - 1) else {
                    continue;
                };
                sheet
                    .get_cell_mut((name_col, row))
                    .set_value(delta_row.name.clone());
                match delta_row.delta {
                    // Shifts are numeric cells; the NEW sentinel is text,
                    // spelled by Delta's Display.
                    Delta::Shift(n) => {
                        sheet.get_cell_mut((name_col + 1, row)).set_value_number(n);
                    }
                    Delta::New => {
                        sheet
                            .get_cell_mut((name_col + 1, row))
                            .set_value(delta_row.delta.to_string());
                    }
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| AppError::Workbook(e.to_string()))
}
