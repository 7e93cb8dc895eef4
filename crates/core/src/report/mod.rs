//! Generic query-and-report unit
//!
//! One [`ReportResource`] per domain table, configured by that domain's
//! static [`Schema`].

pub mod aggregate;
pub mod dashboard;
pub mod derive;
pub mod export;
pub mod import;
pub mod normalize;
pub mod ports;
pub mod schema;
pub mod service;
pub mod validate;
pub mod view;

pub use dashboard::{ActivitySummary, ActivityTarget, CycleCount, CycleDashboard, Dashboard};
pub use export::ExportFile;
pub use import::{ColumnMapping, ImportBatch};
pub use schema::{
    Breakdown, BucketOrder, CreatorStamp, DefaultPeriod, GroupBy, Measure, Rule, Schema, Total,
    Window,
};
pub use service::ReportResource;
pub use view::{ReportView, ViewState};
