//! `SpreadsheetCodec` backed by calamine (read) and rust_xlsxwriter (write)

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use opsboard_core::SpreadsheetCodec;
use opsboard_domain::{Cell, OpsBoardError, Result, Sheet, Workbook};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use tracing::debug;

use crate::errors::InfraError;

/// Longest worksheet name Excel accepts
const MAX_SHEET_NAME: usize = 31;

/// Reads any format calamine detects; always writes `.xlsx`
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

impl XlsxCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Excel serial day number (1900 date system) to a timestamp.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round();
    if !millis.is_finite() || millis.abs() > 1e15 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    epoch.checked_add_signed(TimeDelta::milliseconds(millis as i64))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            serial_to_datetime(dt.as_f64()).map_or(Cell::Number(dt.as_f64()), Cell::DateTime)
        }
    }
}

fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { ' ' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let trimmed = cleaned.trim().trim_matches('\'');
    if trimmed.is_empty() {
        "Hoja1".to_string()
    } else {
        trimmed.to_string()
    }
}

fn write_sheet(sheet: &Sheet, header: &Format) -> Result<Worksheet> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(sheet_name(&sheet.name)).map_err(InfraError::from)?;

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = u32::try_from(r)
            .map_err(|_| OpsBoardError::Spreadsheet("too many rows for one sheet".into()))?;
        for (c, cell) in row.iter().enumerate() {
            let c = u16::try_from(c)
                .map_err(|_| OpsBoardError::Spreadsheet("too many columns for one sheet".into()))?;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Text(s) if r == 0 => worksheet.write_string_with_format(r, c, s, header),
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(n) => worksheet.write_number(r, c, *n),
                Cell::Bool(b) => worksheet.write_boolean(r, c, *b),
                Cell::DateTime(dt) => {
                    worksheet.write_string(r, c, dt.format("%Y-%m-%d %H:%M:%S").to_string())
                }
            };
            written.map_err(InfraError::from)?;
        }
    }
    worksheet.autofit();
    Ok(worksheet)
}

impl SpreadsheetCodec for XlsxCodec {
    fn read_first_sheet(&self, bytes: &[u8]) -> Result<Sheet> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(InfraError::from)?;
        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| OpsBoardError::MalformedInput("the workbook has no sheets".into()))?;
        let range = workbook.worksheet_range(&name).map_err(InfraError::from)?;

        // Keep columns aligned with the sheet when the used range starts
        // right of column A.
        let leading = range.start().map_or(0, |(_, col)| col as usize);
        let rows: Vec<Vec<Cell>> = range
            .rows()
            .map(|row| {
                std::iter::repeat(Cell::Empty)
                    .take(leading)
                    .chain(row.iter().map(to_cell))
                    .collect()
            })
            .collect();

        debug!(sheet = %name, rows = rows.len(), "Read worksheet");
        Ok(Sheet { name, rows })
    }

    fn write(&self, workbook: &Workbook) -> Result<Vec<u8>> {
        let header = Format::new().set_bold();
        let mut xlsx = XlsxWorkbook::new();
        for sheet in &workbook.sheets {
            xlsx.push_worksheet(write_sheet(sheet, &header)?);
        }
        if workbook.sheets.is_empty() {
            xlsx.add_worksheet();
        }
        let bytes = xlsx.save_to_buffer().map_err(InfraError::from)?;
        debug!(sheets = workbook.sheets.len(), bytes = bytes.len(), "Wrote workbook");
        Ok(bytes)
    }
}
