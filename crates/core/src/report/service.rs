//! Query-and-report service - one instance per domain table

use std::sync::Arc;

use opsboard_domain::constants::{
    CREATOR_ID_COLUMN, CREATOR_NAME_COLUMN, EXPORT_EXTENSION, OWNER_COLUMN,
};
use opsboard_domain::utils::dates::{parse_date, parse_month};
use opsboard_domain::{
    Actor, FieldKind, Filter, FilterOp, OpsBoardError, Page, PageRequest, Predicate, Record,
    RecordId, ReportStats, Result,
};
use tracing::{debug, info, instrument};

use super::aggregate;
use super::export::{export_filename, records_workbook, template_workbook, ExportFile};
use super::import::{prepare_rows, ImportBatch};
use super::normalize::normalize_form;
use super::ports::{Clock, RecordStore, SpreadsheetCodec, TableQuery};
use super::schema::{CreatorStamp, Schema};
use super::validate::validate;

/// Loads, aggregates, edits, imports and exports one domain table
pub struct ReportResource {
    schema: &'static Schema,
    store: Arc<dyn RecordStore>,
    codec: Arc<dyn SpreadsheetCodec>,
    clock: Arc<dyn Clock>,
}

impl ReportResource {
    /// Create a new report resource
    pub fn new(
        schema: &'static Schema,
        store: Arc<dyn RecordStore>,
        codec: Arc<dyn SpreadsheetCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { schema, store, codec, clock }
    }

    /// Static description of the table this resource serves.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Filter a fresh view of this table starts with.
    pub fn default_filter(&self) -> Filter {
        self.schema.default_filter(self.clock.today())
    }

    /// Resolve filter values to predicates. With `period_only`, keys that
    /// do not scope aggregates are ignored.
    pub fn predicates(&self, filter: &Filter, period_only: bool) -> Result<Vec<Predicate>> {
        let mut predicates = Vec::new();
        for (key, value) in filter.active() {
            let spec = self.schema.filter(key).ok_or_else(|| {
                OpsBoardError::validation(format!(
                    "unknown filter \"{key}\" for {}",
                    self.schema.table
                ))
            })?;
            if period_only && !spec.period {
                continue;
            }
            let value = self.predicate_value(spec.column, spec.op, value)?;
            predicates.push(Predicate::new(spec.column, spec.op, value));
        }
        Ok(predicates)
    }

    fn predicate_value(&self, column: &str, op: FilterOp, value: &str) -> Result<String> {
        let kind = self.schema.field(column).map_or(FieldKind::Timestamp, |f| f.kind);
        if !(op.is_lower_bound() || op.is_upper_bound()) {
            return Ok(value.to_string());
        }
        let invalid = || OpsBoardError::validation(format!("invalid date filter: {value}"));
        match kind {
            FieldKind::Month => parse_month(value).ok_or_else(invalid),
            FieldKind::Date | FieldKind::Timestamp => {
                let date = parse_date(value).ok_or_else(invalid)?.format("%Y-%m-%d");
                Ok(if op == FilterOp::UntilEndOfDay {
                    format!("{date}T23:59:59.999")
                } else {
                    date.to_string()
                })
            }
            _ => Ok(value.to_string()),
        }
    }

    fn query(&self, predicates: Vec<Predicate>) -> TableQuery {
        TableQuery::new(self.schema.table).with_predicates(predicates).with_order(self.schema.sort)
    }

    /// One page of records matching `filter`, plus the exact total.
    #[instrument(skip(self, filter), fields(table = self.schema.table, page = page.page))]
    pub async fn load_page(&self, filter: &Filter, page: PageRequest) -> Result<Page> {
        page.validate()?;
        let query = self.query(self.predicates(filter, false)?);
        let result = self.store.select_page(&query, page).await?;
        debug!(rows = result.items.len(), total = result.total, "Loaded page");
        Ok(result)
    }

    /// Totals and breakdowns over every record in the filter's period.
    #[instrument(skip(self, filter), fields(table = self.schema.table))]
    pub async fn aggregate(&self, filter: &Filter) -> Result<ReportStats> {
        let query = self.query(self.predicates(filter, true)?);
        let records = self.store.select_all(&query).await?;
        Ok(aggregate::compute(self.schema, &records, self.clock.today()))
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.schema.read_only {
            return Err(OpsBoardError::validation(format!("{} is read-only", self.schema.table)));
        }
        Ok(())
    }

    fn stamp(&self, record: &mut Record, actor: &Actor) {
        match self.schema.stamp {
            CreatorStamp::IdAndName => {
                record.set(CREATOR_ID_COLUMN, actor.user_id.to_string());
                record.set(CREATOR_NAME_COLUMN, actor.email.clone());
            }
            CreatorStamp::Owner => record.set(OWNER_COLUMN, actor.user_id.to_string()),
        }
    }

    /// Create (`id` is `None`) or overwrite a record from a submitted form.
    ///
    /// Updates require an admin actor. The form is normalized, validated,
    /// derived and stamped before anything is sent.
    #[instrument(skip(self, actor, form), fields(table = self.schema.table, update = id.is_some()))]
    pub async fn save(&self, actor: &Actor, form: &Record, id: Option<&RecordId>) -> Result<Record> {
        self.ensure_writable()?;
        if id.is_some() {
            actor.require_admin("updating records")?;
        }

        let today = self.clock.today();
        let mut record =
            normalize_form(self.schema.input_fields(), form, today).map_err(OpsBoardError::Validation)?;
        validate(self.schema, &record).map_err(OpsBoardError::Validation)?;
        if let Some(derive) = self.schema.derive {
            derive(&mut record);
        }
        self.stamp(&mut record, actor);

        let table = self.schema.table;
        let saved = match id {
            Some(id) => self.store.update(table, id, record).await?,
            None if self.schema.upsert_on_create && !self.schema.natural_key.is_empty() => {
                first_row(self.store.upsert(table, vec![record], self.schema.natural_key).await?)?
            }
            None => first_row(self.store.insert(table, vec![record]).await?)?,
        };
        info!(table, id = ?saved.id(), "Saved record");
        Ok(saved)
    }

    /// Delete a record. Requires an admin actor.
    #[instrument(skip(self, actor), fields(table = self.schema.table))]
    pub async fn delete(&self, actor: &Actor, id: &RecordId) -> Result<()> {
        self.ensure_writable()?;
        actor.require_admin("deleting records")?;
        self.store.delete(self.schema.table, id).await?;
        info!(table = self.schema.table, %id, "Deleted record");
        Ok(())
    }

    /// Parse a spreadsheet into stamped rows ready to commit. Nothing is
    /// written.
    pub fn prepare_import(&self, actor: &Actor, bytes: &[u8]) -> Result<ImportBatch> {
        self.ensure_writable()?;
        let sheet = self.codec.read_first_sheet(bytes)?;
        let mut batch = prepare_rows(self.schema, &sheet, self.clock.today())?;
        for row in &mut batch.rows {
            self.stamp(row, actor);
        }
        info!(
            table = self.schema.table,
            rows = batch.rows.len(),
            skipped = batch.skipped,
            mapping = ?batch.mapping,
            "Prepared import"
        );
        Ok(batch)
    }

    /// Write a prepared batch; returns the number of rows written.
    #[instrument(skip(self, batch), fields(table = self.schema.table, rows = batch.rows.len()))]
    pub async fn commit_import(&self, batch: ImportBatch) -> Result<usize> {
        self.ensure_writable()?;
        if batch.table != self.schema.table {
            return Err(OpsBoardError::validation(format!(
                "batch prepared for {} cannot be written to {}",
                batch.table, self.schema.table
            )));
        }
        if batch.rows.is_empty() {
            return Ok(0);
        }
        let table = self.schema.table;
        let written = if self.schema.natural_key.is_empty() {
            self.store.insert(table, batch.rows).await?
        } else {
            self.store.upsert(table, batch.rows, self.schema.natural_key).await?
        };
        info!(table, written = written.len(), "Committed import");
        Ok(written.len())
    }

    /// Every record matching `filter`, as an `.xlsx` workbook.
    #[instrument(skip(self, filter), fields(table = self.schema.table))]
    pub async fn export(&self, filter: &Filter) -> Result<ExportFile> {
        let query = self.query(self.predicates(filter, false)?);
        let records = self.store.select_all(&query).await?;
        let bytes = self.codec.write(&records_workbook(self.schema, &records))?;
        Ok(ExportFile { filename: export_filename(self.schema, filter), bytes, rows: records.len() })
    }

    /// The import template workbook for this table.
    pub fn template(&self) -> Result<ExportFile> {
        self.ensure_writable()?;
        let bytes = self.codec.write(&template_workbook(self.schema))?;
        Ok(ExportFile {
            filename: format!("plantilla_{}.{EXPORT_EXTENSION}", self.schema.table),
            bytes,
            rows: self.schema.examples.len(),
        })
    }
}

fn first_row(rows: Vec<Record>) -> Result<Record> {
    rows.into_iter()
        .next()
        .ok_or_else(|| OpsBoardError::Remote("the backend returned no row".into()))
}
