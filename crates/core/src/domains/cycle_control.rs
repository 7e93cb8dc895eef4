//! Processed-versus-pending control against a master cycle list

use std::collections::HashSet;

use opsboard_domain::Record;
use serde::Serialize;
use serde_json::{Map, Value};

/// Cycles expected for one group (service type or activity) each period
#[derive(Debug, Clone, Copy)]
pub struct MasterCycles {
    pub group: &'static str,
    pub cycles: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleProgress {
    pub total: usize,
    pub procesados: usize,
    /// Master cycles with no record, in master order
    pub pendientes: Vec<String>,
}

/// Per-group progress keyed by group name. A cycle counts as processed
/// when any record carries its `(group, cycle)` pair.
pub fn cycle_control(
    masters: &[MasterCycles],
    records: &[Record],
    group_column: &str,
    cycle_column: &str,
) -> Map<String, Value> {
    let seen: HashSet<(String, String)> = records
        .iter()
        .filter_map(|r| Some((r.text(group_column)?, r.text(cycle_column)?)))
        .collect();

    masters
        .iter()
        .map(|master| {
            let pendientes: Vec<String> = master
                .cycles
                .iter()
                .filter(|c| !seen.contains(&(master.group.to_string(), (*c).to_string())))
                .map(|c| (*c).to_string())
                .collect();
            let progress = CycleProgress {
                total: master.cycles.len(),
                procesados: master.cycles.len() - pendientes.len(),
                pendientes,
            };
            (master.group.to_string(), serde_json::to_value(progress).unwrap_or(Value::Null))
        })
        .collect()
}
