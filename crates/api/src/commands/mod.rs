//! Commands - CLI to core bridge
//!
//! Each command function logs its execution and returns a serializable
//! value; [`dispatch`] turns a parsed [`Command`] into JSON.

mod dashboard;
mod records;
mod session;
mod transfer;

pub use dashboard::*;
pub use records::*;
pub use session::*;
pub use transfer::*;

use opsboard_domain::{OpsBoardError, RecordId, Result};
use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;
use crate::context::AppContext;

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|err| OpsBoardError::Internal(err.to_string()))
}

/// Run one command and return its JSON output.
pub async fn dispatch(ctx: &AppContext, command: Command) -> Result<Value> {
    match command {
        Command::Login { email, password } => to_json(login(ctx, &email, &password).await?),
        Command::Logout => to_json(logout(ctx).await?),
        Command::Whoami => to_json(whoami(ctx).await?),
        Command::Domains => to_json(domains()),
        Command::List { domain, filter, page } => to_json(list(ctx, domain, &filter, page).await?),
        Command::Stats { domain, filter } => to_json(stats(ctx, domain, &filter).await?),
        Command::Create { domain, form } => to_json(create(ctx, domain, &form).await?),
        Command::Update { domain, id, form } => {
            to_json(update(ctx, domain, &RecordId::from(id), &form).await?)
        }
        Command::Delete { domain, id } => to_json(delete(ctx, domain, RecordId::from(id)).await?),
        Command::Import { domain, file, dry_run } => {
            to_json(import(ctx, domain, &file, dry_run).await?)
        }
        Command::Export { domain, filter, out_dir } => {
            to_json(export(ctx, domain, &filter, &out_dir).await?)
        }
        Command::Template { domain, out_dir } => to_json(template(ctx, domain, &out_dir).await?),
        Command::Dashboard { month, compare } => {
            to_json(dashboard(ctx, month.as_deref(), compare).await?)
        }
    }
}
