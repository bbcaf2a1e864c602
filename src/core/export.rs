//! Spreadsheet serialization of the reshaped rows.

use crate::domain::model::ExportRow;
use crate::utils::error::{Result, ScrapeError};
use rust_xlsxwriter::{Format, Workbook};

pub const HEADERS: [&str; 4] = [
    "Company Link",
    "Company Name",
    "Company Name + Review",
    "Contact Details",
];

/// Render the rows as an XLSX workbook in memory.
pub fn to_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        worksheet.write_string(sheet_row, 0, row.link.as_deref().unwrap_or(""))?;
        worksheet.write_string(sheet_row, 1, &row.name)?;
        worksheet.write_string(sheet_row, 2, &row.name_review)?;
        // Contact digits go in as a number when they parse as one.
        if let Ok(contact) = row.contact.parse::<f64>() {
            worksheet.write_number(sheet_row, 3, contact)?;
        } else {
            worksheet.write_string(sheet_row, 3, &row.contact)?;
        }
    }

    worksheet.autofit();

    let bytes = workbook.save_to_buffer()?;
    Ok(bytes)
}

/// Render the rows as CSV with the same columns.
pub fn to_csv(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record([
            row.link.as_deref().unwrap_or(""),
            row.name.as_str(),
            row.name_review.as_str(),
            row.contact.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))?;
    Ok(bytes)
}
