//! Spreadsheet report of accepted articles.

use crate::error::Result;
use crate::models::ArticleRecord;
use rust_xlsxwriter::{Format, Image, Workbook};
use std::path::{Path, PathBuf};

/// Column headers, in column order
pub const HEADERS: [&str; 6] = [
    "Title",
    "Date",
    "Description",
    "Image Filename",
    "Search Phrase Count",
    "Contains Money",
];

const SHEET_NAME: &str = "News";

/// One worksheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// Header row followed by one row per record, in record order
pub fn rows(records: &[ArticleRecord]) -> Vec<Vec<Cell>> {
    let header: Vec<Cell> = HEADERS.iter().map(|h| Cell::Text(h.to_string())).collect();

    std::iter::once(header)
        .chain(records.iter().map(|r| {
            vec![
                Cell::Text(r.title.clone()),
                Cell::Text(r.date_label()),
                Cell::Text(r.description.clone()),
                Cell::Text(r.image_path.to_string_lossy().into_owned()),
                Cell::Number(r.search_phrase_count as f64),
                Cell::Flag(r.contains_money),
            ]
        }))
        .collect()
}

/// Write the report to `path`, then delete the embedded image files.
///
/// Each image is anchored at `image_column` on its record's row. Returns
/// the absolute path of the saved file. Images are only removed after a
/// successful save; a failed save leaves them in place.
pub fn build_report(records: &[ArticleRecord], path: &Path, image_column: u16) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row, cells) in rows(records).iter().enumerate() {
        let row = row as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) if row == 0 => {
                    worksheet.write_string_with_format(row, col, text, &header_format)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Cell::Flag(flag) => {
                    worksheet.write_boolean(row, col, *flag)?;
                }
            }
        }
    }

    for (i, record) in records.iter().enumerate() {
        let image = Image::new(&record.image_path)?;
        worksheet.insert_image(i as u32 + 1, image_column, &image)?;
    }

    workbook.save(path)?;
    let saved = std::fs::canonicalize(path)?;
    ::log::info!(
        "Saved report with {} rows to {}",
        records.len(),
        saved.display()
    );

    remove_images(records);
    Ok(saved)
}

fn remove_images(records: &[ArticleRecord]) {
    for record in records {
        match std::fs::remove_file(&record.image_path) {
            Ok(()) => ::log::debug!("Removed {}", record.image_path.display()),
            Err(e) => ::log::warn!(
                "Failed to remove image {}: {}",
                record.image_path.display(),
                e
            ),
        }
    }
}
