//! Workbook layout for exports and import templates

use opsboard_domain::constants::{
    EXPORT_EXTENSION, EXPORT_FROM_PLACEHOLDER, EXPORT_TO_PLACEHOLDER, TEMPLATE_DATA_SHEET,
    TEMPLATE_INSTRUCTIONS_SHEET,
};
use opsboard_domain::utils::text::filename_part;
use opsboard_domain::{Cell, FieldKind, Filter, Record, Sheet, Workbook};
use serde_json::Value;

use super::schema::Schema;

/// An encoded workbook and the name to save it under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Data rows written, excluding the header
    pub rows: usize,
}

/// `{table}[_{from}_{to}][_{prefix}{value}...].xlsx`
pub fn export_filename(schema: &Schema, filter: &Filter) -> String {
    let mut name = schema.table.to_string();

    let bound = |lower: bool| {
        schema
            .filters
            .iter()
            .filter(|f| if lower { f.op.is_lower_bound() } else { f.op.is_upper_bound() })
            .find_map(|f| filter.get(f.key))
    };
    let (from, to) = (bound(true), bound(false));
    if from.is_some() || to.is_some() {
        name.push('_');
        name.push_str(&filename_part(from.unwrap_or(EXPORT_FROM_PLACEHOLDER)));
        name.push('_');
        name.push_str(&filename_part(to.unwrap_or(EXPORT_TO_PLACEHOLDER)));
    }

    for spec in schema.filters {
        if let (Some(prefix), Some(value)) = (spec.filename_prefix, filter.get(spec.key)) {
            name.push('_');
            name.push_str(prefix);
            name.push_str(&filename_part(value));
        }
    }

    name.push('.');
    name.push_str(EXPORT_EXTENSION);
    name
}

fn export_cell(record: &Record, column: &str, kind: FieldKind) -> Cell {
    match record.get(column) {
        None | Some(Value::Null) => Cell::Empty,
        Some(value) => match kind {
            FieldKind::Integer | FieldKind::Decimal => Cell::Number(record.number(column)),
            FieldKind::Json => Cell::Text(value.to_string()),
            _ => record.text(column).map_or(Cell::Empty, Cell::Text),
        },
    }
}

/// One sheet: labelled header row, then one row per record.
pub fn records_workbook(schema: &Schema, records: &[Record]) -> Workbook {
    let columns = schema.export_columns();
    let mut sheet = Sheet::new(schema.title);
    sheet.push_row(columns.iter().map(|(_, label, _)| Cell::from(*label)).collect());
    for record in records {
        sheet.push_row(
            columns.iter().map(|(column, _, kind)| export_cell(record, column, *kind)).collect(),
        );
    }
    Workbook::new().with_sheet(sheet)
}

/// Import template: labelled header and examples on the data sheet,
/// instructions on a second sheet.
pub fn template_workbook(schema: &Schema) -> Workbook {
    let fields: Vec<_> = schema.input_fields().collect();

    let mut data = Sheet::new(TEMPLATE_DATA_SHEET);
    data.push_row(fields.iter().map(|f| Cell::from(f.label)).collect());
    for example in schema.examples {
        data.push_row(
            fields
                .iter()
                .zip(example.iter())
                .map(|(field, raw)| match raw.parse::<f64>() {
                    Ok(n) if field.kind.is_numeric() => Cell::Number(n),
                    _ => Cell::from(*raw),
                })
                .collect(),
        );
    }

    let mut instructions = Sheet::new(TEMPLATE_INSTRUCTIONS_SHEET);
    for line in schema.instructions {
        instructions.push_row(vec![Cell::from(*line)]);
    }

    Workbook::new().with_sheet(data).with_sheet(instructions)
}
