//! Required-field and cross-field checks shared by the editor and importer

use opsboard_domain::{FieldKind, FieldSpec, Record};

use super::schema::{Rule, Schema};

/// A required field is missing when it is blank, or 0 for integers.
fn is_missing(field: &FieldSpec, record: &Record) -> bool {
    record.is_blank(field.name) || (field.kind == FieldKind::Integer && record.int(field.name) == 0)
}

/// Check a normalized record against the schema's required fields and
/// rules. Returns the user-facing message of the first failure.
pub fn validate(schema: &Schema, record: &Record) -> Result<(), String> {
    let missing: Vec<&str> = schema
        .input_fields()
        .filter(|f| f.required && is_missing(f, record))
        .map(|f| f.label)
        .collect();
    if !missing.is_empty() {
        return Err(format!("required fields missing: {}", missing.join(", ")));
    }

    for rule in schema.rules {
        match rule {
            Rule::AnyOf { columns, message } => {
                if columns.iter().all(|c| record.is_blank(c)) {
                    return Err((*message).to_string());
                }
            }
            Rule::SumAtMost { parts, limit, message } => {
                let sum = |columns: &[&str]| {
                    columns.iter().map(|c| i128::from(record.int(c))).sum::<i128>()
                };
                if sum(parts) > sum(limit) {
                    return Err((*message).to_string());
                }
            }
        }
    }
    Ok(())
}
