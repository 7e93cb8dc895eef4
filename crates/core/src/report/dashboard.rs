//! Monthly per-cycle activity against fixed targets
//!
//! Field readings, reviews and deliveries are counted per cycle over one
//! calendar month of `created_at`. A cycle meets its target when its count
//! reaches the activity's `meta`. Optionally the previous month's counts
//! are attached to the same cycles.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::utils::dates::{month_bounds, month_key, parse_month};
use opsboard_domain::{FilterOp, OpsBoardError, Predicate, Record, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use super::aggregate::numeric_key_order;
use super::derive::percentage;
use super::ports::{RecordStore, TableQuery};

/// One charted activity: where its rows live and the per-cycle goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTarget {
    /// Name shown on the dashboard
    pub activity: &'static str,
    pub table: &'static str,
    pub cycle_column: &'static str,
    /// Rows a cycle needs in a month to meet the target
    pub meta: u64,
}

/// Readings, reviews and deliveries with their per-cycle targets.
pub const TARGETS: &[ActivityTarget] = &[
    ActivityTarget { activity: "lecturas", table: "lecturas", cycle_column: "ciclo", meta: 30 },
    ActivityTarget { activity: "revisiones", table: "revisiones", cycle_column: "ciclo", meta: 20 },
    ActivityTarget {
        activity: "reparto",
        table: "repartos",
        cycle_column: "ciclo_reparto",
        meta: 60,
    },
];

/// One cycle's count this month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleCount {
    pub ciclo: String,
    pub actual: u64,
    /// 0 unless the previous month was requested
    pub anterior: u64,
    pub cumple: bool,
}

/// Totals and per-cycle counts for one activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub actividad: &'static str,
    pub meta: u64,
    pub total: u64,
    pub ciclos: usize,
    pub cumplen: usize,
    /// Share of cycles meeting the target, one decimal
    pub porcentaje: f64,
    pub por_ciclo: Vec<CycleCount>,
}

/// Every activity for one month, as `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub mes: String,
    /// Set when the previous month was compared
    pub mes_anterior: Option<String>,
    pub actividades: Vec<ActivitySummary>,
}

/// Reads the activity tables and folds them into a [`Dashboard`].
pub struct CycleDashboard {
    store: Arc<dyn RecordStore>,
    targets: &'static [ActivityTarget],
}

impl CycleDashboard {
    /// Dashboard over [`TARGETS`].
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store, targets: TARGETS }
    }

    /// Replace the charted activities.
    #[must_use]
    pub fn with_targets(mut self, targets: &'static [ActivityTarget]) -> Self {
        self.targets = targets;
        self
    }

    /// Counts for `month` (`YYYY-MM` or any date inside it), plus the month
    /// before when `compare` is set. Activities are read concurrently and
    /// any failed read fails the whole dashboard.
    #[instrument(skip(self))]
    pub async fn load(&self, month: &str, compare: bool) -> Result<Dashboard> {
        let first = first_of_month(month)?;
        let previous = compare.then(|| previous_month(first)).flatten();

        let activities = futures::future::try_join_all(
            self.targets.iter().map(|target| self.activity(target, first, previous)),
        )
        .await?;

        Ok(Dashboard {
            mes: month_key(first),
            mes_anterior: previous.map(month_key),
            actividades: activities,
        })
    }

    async fn activity(
        &self,
        target: &ActivityTarget,
        month: NaiveDate,
        previous: Option<NaiveDate>,
    ) -> Result<ActivitySummary> {
        let current_query = month_query(target, month);
        let current = self.store.select_all(&current_query);
        let (current, earlier) = match previous {
            Some(prev) => {
                let prev_query = month_query(target, prev);
                futures::try_join!(current, self.store.select_all(&prev_query))?
            }
            None => (current.await?, Vec::new()),
        };
        debug!(
            table = target.table,
            current = current.len(),
            previous = earlier.len(),
            "Loaded activity rows"
        );
        Ok(summarize(target, &current, &earlier))
    }
}

/// Fold one activity's rows. Only cycles seen in `current` are listed;
/// rows without a cycle are ignored.
pub fn summarize(
    target: &ActivityTarget,
    current: &[Record],
    previous: &[Record],
) -> ActivitySummary {
    let now = counts_by_cycle(current, target.cycle_column);
    let before = counts_by_cycle(previous, target.cycle_column);

    let mut por_ciclo: Vec<CycleCount> = now
        .into_iter()
        .map(|(ciclo, actual)| CycleCount {
            anterior: before.get(&ciclo).copied().unwrap_or(0),
            cumple: actual >= target.meta,
            ciclo,
            actual,
        })
        .collect();
    por_ciclo.sort_by(|a, b| numeric_key_order(&a.ciclo, &b.ciclo));

    let cumplen = por_ciclo.iter().filter(|c| c.cumple).count();
    let ciclos = por_ciclo.len();
    ActivitySummary {
        actividad: target.activity,
        meta: target.meta,
        total: por_ciclo.iter().map(|c| c.actual).sum(),
        ciclos,
        cumplen,
        porcentaje: percentage(
            i64::try_from(cumplen).unwrap_or(i64::MAX),
            i64::try_from(ciclos).unwrap_or(i64::MAX),
        ),
        por_ciclo,
    }
}

fn counts_by_cycle(records: &[Record], column: &str) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for cycle in records.iter().filter_map(|r| r.text(column)) {
        *counts.entry(cycle).or_insert(0) += 1;
    }
    counts
}

/// `created_at` inside the calendar month starting at `first`.
fn month_query(target: &ActivityTarget, first: NaiveDate) -> TableQuery {
    let (from, to) = month_bounds(first);
    TableQuery::new(target.table).with_predicates(vec![
        Predicate::new(CREATED_AT_COLUMN, FilterOp::AtLeast, from.format("%Y-%m-%d").to_string()),
        Predicate::new(
            CREATED_AT_COLUMN,
            FilterOp::UntilEndOfDay,
            format!("{}T23:59:59.999", to.format("%Y-%m-%d")),
        ),
    ])
}

fn first_of_month(month: &str) -> Result<NaiveDate> {
    parse_month(month)
        .and_then(|key| NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d").ok())
        .ok_or_else(|| OpsBoardError::validation(format!("invalid month: {month}")))
}

fn previous_month(first: NaiveDate) -> Option<NaiveDate> {
    first.pred_opt().and_then(|last| last.with_day(1))
}
