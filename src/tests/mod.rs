mod pipeline_tests;

use std::io::Read;
use std::path::Path;

/// Text of one XML part inside a saved `.xlsx` archive
pub(crate) fn xlsx_part(path: &Path, name: &str) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

pub(crate) fn sheet_xml(path: &Path) -> String {
    xlsx_part(path, "xl/worksheets/sheet1.xml")
}

pub(crate) fn drawing_xml(path: &Path) -> String {
    xlsx_part(path, "xl/drawings/drawing1.xml")
}

/// Number of `<row>` elements in a worksheet
pub(crate) fn row_count(sheet: &str) -> usize {
    sheet.matches("<row ").count()
}

/// The `<c>` element for `cell` (e.g. `F2`), up to its closing tag
pub(crate) fn cell_xml<'a>(sheet: &'a str, cell: &str) -> &'a str {
    let start = sheet
        .find(&format!("<c r=\"{}\"", cell))
        .unwrap_or_else(|| panic!("cell {} not written", cell));
    let end = sheet[start..].find("</c>").map(|i| start + i + 4).unwrap();
    &sheet[start..end]
}

/// Number of images anchored with their top-left corner at (`row`, `col`), zero-based
pub(crate) fn anchors_at(drawing: &str, row: u32, col: u16) -> usize {
    let compact: String = drawing.split_whitespace().collect();
    compact
        .matches(&format!(
            "<xdr:from><xdr:col>{}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{}</xdr:row>",
            col, row
        ))
        .count()
}
