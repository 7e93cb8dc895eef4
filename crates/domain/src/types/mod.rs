//! Domain types and models

pub mod filter;
pub mod page;
pub mod record;
pub mod schema;
pub mod session;
pub mod sheet;
pub mod stats;

pub use filter::{Filter, Predicate};
pub use page::{Page, PageRequest};
pub use record::{parse_lenient_i64, Record, RecordId};
pub use schema::{FieldKind, FieldOrigin, FieldSpec, FilterOp, FilterSpec, SortKey};
pub use session::{Actor, Role, Session};
pub use sheet::{Cell, Sheet, Workbook};
pub use stats::{BreakdownResult, Bucket, ReportStats};
