//! Spreadsheet import, export and templates

use std::path::{Path, PathBuf};

use opsboard_core::report::{ColumnMapping, ExportFile};
use opsboard_core::Domain;
use opsboard_domain::{OpsBoardError, Record, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::FilterArgs;
use crate::commands::records::resolve_filter;
use crate::context::AppContext;
use crate::utils::execute_logged;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutput {
    pub domain: &'static str,
    pub mapping: ColumnMapping,
    pub rows: usize,
    pub skipped: usize,
    /// `None` on a dry run
    pub written: Option<usize>,
    pub preview: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutput {
    pub domain: &'static str,
    pub path: PathBuf,
    pub rows: usize,
}

/// Parse `file` into the table; with `dry_run` nothing is written.
pub async fn import(
    ctx: &AppContext,
    domain: Domain,
    file: &Path,
    dry_run: bool,
) -> Result<ImportOutput> {
    execute_logged("transfer::import", domain.as_str(), async {
        let bytes = tokio::fs::read(file).await.map_err(|err| {
            OpsBoardError::validation(format!("cannot read {}: {err}", file.display()))
        })?;
        let actor = ctx.require_actor().await?;
        let resource = ctx.resource(domain);

        let batch = resource.prepare_import(&actor, &bytes)?;
        let mut output = ImportOutput {
            domain: domain.as_str(),
            mapping: batch.mapping,
            rows: batch.rows.len(),
            skipped: batch.skipped,
            written: None,
            preview: batch.preview().to_vec(),
        };
        if !dry_run {
            output.written = Some(resource.commit_import(batch).await?);
        }
        Ok(output)
    })
    .await
}

pub async fn export(
    ctx: &AppContext,
    domain: Domain,
    args: &FilterArgs,
    out_dir: &Path,
) -> Result<FileOutput> {
    execute_logged("transfer::export", domain.as_str(), async {
        ctx.session().await;
        let filter = resolve_filter(ctx, domain, args);
        let file = ctx.resource(domain).export(&filter).await?;
        save_file(domain, file, out_dir).await
    })
    .await
}

pub async fn template(ctx: &AppContext, domain: Domain, out_dir: &Path) -> Result<FileOutput> {
    execute_logged("transfer::template", domain.as_str(), async {
        let file = ctx.resource(domain).template()?;
        save_file(domain, file, out_dir).await
    })
    .await
}

async fn save_file(domain: Domain, file: ExportFile, out_dir: &Path) -> Result<FileOutput> {
    let path = out_dir.join(&file.filename);
    let write_error =
        |err: std::io::Error| OpsBoardError::Internal(format!("cannot write {}: {err}", path.display()));
    tokio::fs::create_dir_all(out_dir).await.map_err(write_error)?;
    tokio::fs::write(&path, &file.bytes).await.map_err(write_error)?;
    info!(path = %path.display(), rows = file.rows, "Wrote workbook");
    Ok(FileOutput { domain: domain.as_str(), path, rows: file.rows })
}
