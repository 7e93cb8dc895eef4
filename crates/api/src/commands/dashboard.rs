//! Monthly cycle dashboard

use opsboard_core::Dashboard;
use opsboard_domain::utils::dates::month_key;
use opsboard_domain::Result;

use crate::context::AppContext;
use crate::utils::execute_logged;

/// Counts for `month`, or the current month in the report timezone.
pub async fn dashboard(ctx: &AppContext, month: Option<&str>, compare: bool) -> Result<Dashboard> {
    execute_logged("dashboard::load", "-", async {
        ctx.session().await;
        let month = month.map_or_else(|| month_key(ctx.today()), str::to_string);
        ctx.dashboard().load(&month, compare).await
    })
    .await
}
