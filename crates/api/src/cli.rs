//! Command-line interface definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use opsboard_core::Domain;

#[derive(Debug, Parser)]
#[command(name = "opsboard", version, about = "Operations reporting over the hosted backend")]
pub struct Cli {
    /// Config file (JSON or TOML); otherwise the environment or a config file found nearby
    #[arg(long, global = true, env = "OPSBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "OPSBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke and forget the persisted session
    Logout,
    /// Show the signed-in user and role
    Whoami,
    /// List the report tables and their filters
    Domains,
    /// One page of records
    List {
        domain: Domain,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Totals and chart series for the filtered period
    Stats {
        domain: Domain,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Create a record from `column=value` pairs or a JSON object
    Create {
        domain: Domain,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Overwrite a record (admin only)
    Update {
        domain: Domain,
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a record (admin only)
    Delete { domain: Domain, id: String },
    /// Load a spreadsheet into a table
    Import {
        domain: Domain,
        file: PathBuf,
        /// Parse and preview without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the filtered records to an `.xlsx` file
    Export {
        domain: Domain,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write the import template for a table
    Template {
        domain: Domain,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Per-cycle readings, reviews and deliveries against their targets
    Dashboard {
        /// Month as `YYYY-MM`; the current month when omitted
        #[arg(long)]
        month: Option<String>,
        /// Also count the previous month for each cycle
        #[arg(long)]
        compare: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Filter as `key=value`; repeatable
    #[arg(long = "filter", short = 'f', value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Start from an empty filter instead of the table's default period
    #[arg(long)]
    pub no_defaults: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Field as `column=value`; repeatable
    #[arg(long = "set", short = 's', value_parser = parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// Form as a JSON object; `--set` values are applied on top
    #[arg(long)]
    pub json: Option<String>,
}

/// Split `key=value` at the first `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected key=value, got \"{raw}\""))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in \"{raw}\""));
    }
    Ok((key.to_string(), value.to_string()))
}
