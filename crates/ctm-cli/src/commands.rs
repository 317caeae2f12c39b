use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use ctm_cli::pipeline::{RunConfig, run_matching};
use ctm_cli::types::MatchRunResult;
use ctm_core::{MatchConfig, RunOptions};
use ctm_ingest::IngestOptions;
use ctm_registry::{RegistryClient, RegistryConfig, build_query};
use ctm_report::OutputFormat;

use crate::cli::{MatchArgs, OutputFormatArg, QueryArgs, RegistryArgs};
use crate::summary::apply_table_style;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

pub fn run_match(args: &MatchArgs) -> Result<MatchRunResult> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join("output"));
    let ingest = match args.reference_date {
        Some(date) => IngestOptions::new(date),
        None => IngestOptions::default(),
    };
    let config = RunConfig {
        data_dir: args.data_dir.clone(),
        output_dir,
        formats: format_outputs(args.format),
        dry_run: args.dry_run,
        ingest,
        matching: MatchConfig::default()
            .with_statuses(args.registry.statuses.clone())
            .with_anchor_condition_index(args.anchor_condition),
        run: RunOptions {
            fail_fast: args.fail_fast,
        },
    };

    let registry = registry_config(&args.registry)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_max_pages(args.max_pages);
    info!(
        base_url = %registry.base_url,
        page_size = registry.page_size,
        max_pages = registry.max_pages,
        "registry configured"
    );
    let client = RegistryClient::new(registry).context("create registry client")?;

    let progress = if args.no_progress || !io::stderr().is_terminal() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .context("progress template")?
                .progress_chars("#>-"),
        );
        bar
    };

    let result = run_matching(
        &config,
        client,
        |count| progress.set_length(count as u64),
        |patient| {
            progress.set_message(patient.id.to_string());
            progress.inc(1);
        },
    );
    progress.finish_and_clear();
    result
}

/// Print the request a patient with `age` and `condition` would issue.
pub fn run_query(args: &QueryArgs) -> Result<()> {
    let client = RegistryClient::new(registry_config(&args.registry))
        .context("create registry client")?;
    let query = build_query(&args.condition, args.age, &args.registry.statuses);
    let url = client.page_url(&query, None).context("build request url")?;

    let mut table = Table::new();
    table.set_header(vec!["Parameter", "Value"]);
    apply_table_style(&mut table);
    table.add_row(vec!["query.cond".to_string(), query.condition.clone()]);
    table.add_row(vec!["filter.overallStatus".to_string(), query.status_filter.clone()]);
    table.add_row(vec!["filter.advanced".to_string(), query.advanced_filter.clone()]);
    println!("{table}");
    println!("{url}");
    Ok(())
}

fn registry_config(args: &RegistryArgs) -> RegistryConfig {
    RegistryConfig::default()
        .with_base_url(args.base_url.clone())
        .with_page_size(args.page_size)
}

fn format_outputs(format: OutputFormatArg) -> Vec<OutputFormat> {
    match format {
        OutputFormatArg::Csv => vec![OutputFormat::Csv],
        OutputFormatArg::Json => vec![OutputFormat::Json],
        OutputFormatArg::Both => vec![OutputFormat::Csv, OutputFormat::Json],
    }
}
