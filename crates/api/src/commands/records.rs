//! Listing, aggregation and single-record edits

use opsboard_core::Domain;
use opsboard_domain::{
    Filter, OpsBoardError, Page, PageRequest, Record, RecordId, ReportStats, Result,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{FilterArgs, FormArgs};
use crate::context::AppContext;
use crate::utils::execute_logged;

/// What `domains` prints for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainInfo {
    pub domain: &'static str,
    pub title: &'static str,
    pub read_only: bool,
    pub filters: Vec<&'static str>,
    pub natural_key: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOutput {
    pub domain: &'static str,
    pub filter: Filter,
    pub total_pages: u64,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsOutput {
    pub domain: &'static str,
    pub filter: Filter,
    #[serde(flatten)]
    pub stats: ReportStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub domain: &'static str,
    pub deleted: RecordId,
}

pub fn domains() -> Vec<DomainInfo> {
    Domain::ALL
        .iter()
        .map(|domain| {
            let schema = domain.schema();
            DomainInfo {
                domain: domain.as_str(),
                title: schema.title,
                read_only: schema.read_only,
                filters: schema.filters.iter().map(|f| f.key).collect(),
                natural_key: schema.natural_key.to_vec(),
            }
        })
        .collect()
}

/// The table's default period overlaid with the `--filter` pairs.
pub fn resolve_filter(ctx: &AppContext, domain: Domain, args: &FilterArgs) -> Filter {
    let mut filter =
        if args.no_defaults { Filter::new() } else { ctx.resource(domain).default_filter() };
    for (key, value) in &args.filters {
        filter.set(key.clone(), value.clone());
    }
    filter
}

/// Form record from `--json` with `--set` pairs applied on top.
pub fn form_record(args: &FormArgs) -> Result<Record> {
    let mut form = match &args.json {
        Some(json) => {
            let value: Value = serde_json::from_str(json)
                .map_err(|err| OpsBoardError::validation(format!("invalid --json form: {err}")))?;
            Record::from_value(value)?
        }
        None => Record::new(),
    };
    for (column, value) in &args.fields {
        form.set(column.clone(), value.clone());
    }
    Ok(form)
}

pub async fn list(
    ctx: &AppContext,
    domain: Domain,
    args: &FilterArgs,
    page: u32,
) -> Result<PageOutput> {
    execute_logged("records::list", domain.as_str(), async {
        // Reads send the user's token when a session can be resumed.
        ctx.session().await;
        let filter = resolve_filter(ctx, domain, args);
        let page = ctx.resource(domain).load_page(&filter, PageRequest::new(page)).await?;
        Ok(PageOutput { domain: domain.as_str(), filter, total_pages: page.total_pages(), page })
    })
    .await
}

pub async fn stats(ctx: &AppContext, domain: Domain, args: &FilterArgs) -> Result<StatsOutput> {
    execute_logged("records::stats", domain.as_str(), async {
        ctx.session().await;
        let filter = resolve_filter(ctx, domain, args);
        let stats = ctx.resource(domain).aggregate(&filter).await?;
        Ok(StatsOutput { domain: domain.as_str(), filter, stats })
    })
    .await
}

async fn save(
    ctx: &AppContext,
    domain: Domain,
    form: &FormArgs,
    id: Option<&RecordId>,
) -> Result<Record> {
    let form = form_record(form)?;
    let actor = ctx.require_actor().await?;
    ctx.resource(domain).save(&actor, &form, id).await
}

pub async fn create(ctx: &AppContext, domain: Domain, form: &FormArgs) -> Result<Record> {
    execute_logged("records::create", domain.as_str(), save(ctx, domain, form, None)).await
}

pub async fn update(
    ctx: &AppContext,
    domain: Domain,
    id: &RecordId,
    form: &FormArgs,
) -> Result<Record> {
    execute_logged("records::update", domain.as_str(), save(ctx, domain, form, Some(id))).await
}

pub async fn delete(ctx: &AppContext, domain: Domain, id: RecordId) -> Result<Deleted> {
    execute_logged("records::delete", domain.as_str(), async {
        let actor = ctx.require_actor().await?;
        ctx.resource(domain).delete(&actor, &id).await?;
        Ok(Deleted { domain: domain.as_str(), deleted: id })
    })
    .await
}
