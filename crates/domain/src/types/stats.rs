//! Aggregate output types
//!
//! Aggregates are returned as plain data for the chart renderer:
//! - named totals (sums plus derived ratios)
//! - one bucket list per breakdown
//! - domain extras such as the invoice-staging cycle control

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::Record;

/* -------------------------------------------------------------------------- */
/* Buckets */
/* -------------------------------------------------------------------------- */

/// One `{key, value}` point of a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub value: i64,
}

impl Bucket {
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self { key: key.into(), value }
    }
}

/// Buckets for one named breakdown (e.g. `por_ciclo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownResult {
    pub name: String,
    pub buckets: Vec<Bucket>,
}

impl BreakdownResult {
    /// Bucket values added up, saturating at the `i64` bounds.
    pub fn sum(&self) -> i64 {
        self.buckets.iter().fold(0, |acc, b| acc.saturating_add(b.value))
    }
}

/* -------------------------------------------------------------------------- */
/* Report Statistics */
/* -------------------------------------------------------------------------- */

/// Everything the aggregator computes for one domain and period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Rows in the period-filtered set
    pub record_count: u64,
    /// Named sums with the domain's derived fields applied
    pub totals: Record,
    pub breakdowns: Vec<BreakdownResult>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl ReportStats {
    pub fn breakdown(&self, name: &str) -> Option<&BreakdownResult> {
        self.breakdowns.iter().find(|b| b.name == name)
    }
}
