//! PostgREST query-string encoding

use opsboard_core::TableQuery;
use opsboard_domain::{FilterOp, Predicate, SortKey};

/// `column=op.value` for one predicate.
pub fn predicate_param(predicate: &Predicate) -> (String, String) {
    let value = &predicate.value;
    let encoded = match predicate.op {
        FilterOp::Equals => format!("eq.{value}"),
        FilterOp::Contains => format!("ilike.*{value}*"),
        FilterOp::AtLeast => format!("gte.{value}"),
        FilterOp::AtMost | FilterOp::UntilEndOfDay => format!("lte.{value}"),
    };
    (predicate.column.clone(), encoded)
}

/// `a.desc,b.asc`; `None` when the query has no ordering.
pub fn order_param(order: &[SortKey]) -> Option<String> {
    if order.is_empty() {
        return None;
    }
    let terms: Vec<String> = order
        .iter()
        .map(|key| format!("{}.{}", key.column, if key.descending { "desc" } else { "asc" }))
        .collect();
    Some(terms.join(","))
}

/// `select`, filter and `order` parameters for a read.
pub fn read_params(query: &TableQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(query.predicates.iter().map(predicate_param));
    if let Some(order) = order_param(&query.order) {
        params.push(("order".to_string(), order));
    }
    params
}

/// Total row count from a `Content-Range` header such as `0-9/15` or `*/0`.
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}
