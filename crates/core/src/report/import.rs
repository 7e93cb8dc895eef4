//! Spreadsheet-to-record mapping for bulk imports
//!
//! The first row is always a header. When every non-empty header names a
//! field (by column name, label or alias) columns are mapped by header;
//! when none does, columns follow the template order. A header row that is
//! only partly recognized is rejected so a shifted sheet never lands in the
//! wrong columns.

use std::collections::HashMap;

use chrono::NaiveDate;
use opsboard_domain::constants::PREVIEW_ROWS;
use opsboard_domain::utils::text::normalize_header;
use opsboard_domain::{Cell, FieldSpec, OpsBoardError, Record, Result, Sheet};
use serde::Serialize;

use super::normalize::{coerce, RawValue};
use super::schema::Schema;
use super::validate::validate;

/// How sheet columns were matched to fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    ByHeader,
    ByPosition,
}

/// Rows ready to be written, plus what happened while preparing them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportBatch {
    pub table: String,
    pub mapping: ColumnMapping,
    pub rows: Vec<Record>,
    /// Non-blank rows dropped by the domain gate
    pub skipped: usize,
}

impl ImportBatch {
    /// The first rows shown before committing.
    pub fn preview(&self) -> &[Record] {
        &self.rows[..self.rows.len().min(PREVIEW_ROWS)]
    }
}

/// Field index per sheet column
struct Layout {
    mapping: ColumnMapping,
    columns: Vec<Option<&'static FieldSpec>>,
}

fn map_columns(schema: &Schema, header: &[Cell]) -> Result<Layout> {
    let inputs: Vec<&'static FieldSpec> = schema.input_fields().collect();

    let mut lookup: HashMap<String, &'static FieldSpec> = HashMap::new();
    for &field in &inputs {
        for name in [field.name, field.label].iter().chain(field.aliases) {
            lookup.insert(normalize_header(name), field);
        }
    }

    let headers: Vec<Option<String>> = header.iter().map(Cell::to_text).collect();
    let present: Vec<(usize, &str)> =
        headers.iter().enumerate().filter_map(|(i, h)| h.as_deref().map(|h| (i, h))).collect();
    let unknown: Vec<&str> = present
        .iter()
        .filter(|(_, h)| !lookup.contains_key(&normalize_header(h)))
        .map(|(_, h)| *h)
        .collect();

    if unknown.len() == present.len() {
        let columns = (0..header.len().max(inputs.len())).map(|i| inputs.get(i).copied()).collect();
        return Ok(Layout { mapping: ColumnMapping::ByPosition, columns });
    }
    if !unknown.is_empty() {
        return Err(OpsBoardError::MalformedInput(format!(
            "unrecognized columns: {}",
            unknown.join(", ")
        )));
    }

    let columns: Vec<Option<&'static FieldSpec>> = headers
        .iter()
        .map(|h| h.as_deref().and_then(|h| lookup.get(&normalize_header(h)).copied()))
        .collect();
    let missing: Vec<&str> = inputs
        .iter()
        .filter(|f| f.required && !columns.iter().flatten().any(|c| c.name == f.name))
        .map(|f| f.label)
        .collect();
    if !missing.is_empty() {
        return Err(OpsBoardError::MalformedInput(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }
    Ok(Layout { mapping: ColumnMapping::ByHeader, columns })
}

/// Map, coerce, gate, validate and derive every data row of `sheet`.
///
/// Creator stamping is left to the caller. Errors carry the 1-based sheet
/// row number of the first failing row.
pub fn prepare_rows(schema: &Schema, sheet: &Sheet, today: NaiveDate) -> Result<ImportBatch> {
    let Some((header, data)) = sheet.rows.split_first() else {
        return Err(OpsBoardError::MalformedInput("the sheet is empty".into()));
    };
    let layout = map_columns(schema, header)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (index, cells) in data.iter().enumerate() {
        // Header is sheet row 1.
        let row_number = index + 2;
        if cells.iter().all(Cell::is_blank) {
            continue;
        }

        let mut record = Record::new();
        for field in schema.input_fields() {
            let cell = layout
                .columns
                .iter()
                .position(|c| c.is_some_and(|c| c.name == field.name))
                .and_then(|i| cells.get(i));
            let value = coerce(field, RawValue::from_cell(cell), today)
                .map_err(|msg| OpsBoardError::malformed_row(row_number, msg))?;
            record.set(field.name, value);
        }

        if let Some(gate) = schema.import_gate {
            if !gate(&record) {
                skipped += 1;
                continue;
            }
        }
        validate(schema, &record)
            .map_err(|msg| OpsBoardError::Validation(format!("row {row_number}: {msg}")))?;
        if let Some(derive) = schema.derive {
            derive(&mut record);
        }
        rows.push(record);
    }

    Ok(ImportBatch { table: schema.table.to_string(), mapping: layout.mapping, rows, skipped })
}
