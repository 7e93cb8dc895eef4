//! # OpsBoard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The generic query-and-report unit (`ReportResource`) and its page state
//!   machine (`ReportView`)
//! - The authentication context shared by every command
//! - The monthly per-cycle dashboard over the field activity tables
//! - One static schema per report domain
//! - Port interfaces (traits) implemented by `opsboard-infra`
//!
//! ## Architecture Principles
//! - Only depends on `opsboard-domain`
//! - No HTTP, filesystem or spreadsheet library code
//! - All external dependencies via traits

pub mod auth;
pub mod domains;
pub mod report;

pub use auth::ports::{AuthPort, SessionStore};
pub use auth::AuthContext;
pub use domains::Domain;
pub use report::ports::{Clock, RecordStore, SpreadsheetCodec, SystemClock, TableQuery};
pub use report::{
    Breakdown, CycleDashboard, Dashboard, ExportFile, ImportBatch, ReportResource, ReportView,
    Schema, ViewState,
};
