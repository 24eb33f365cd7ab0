use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};
use tracing::{debug, info};

use crate::args::HarnessArgs;
use crate::config::RunConfig;
use crate::dispatch::Dispatcher;
use crate::engine::TransferEngine;
use crate::error::{AppError, AppResult, ConfigError};
use crate::{logger, report, schedule};

pub(crate) fn run() -> AppResult<()> {
    let args = parse_args()?;
    logger::init_logging(args.verbose || args.debug, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args))
}

fn parse_args() -> AppResult<HarnessArgs> {
    let cmd = HarnessArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = cmd.get_matches_from(raw_args);
    let args = HarnessArgs::from_arg_matches(&matches)?;
    Ok(args)
}

async fn run_async(args: &HarnessArgs) -> AppResult<()> {
    let config = RunConfig::from_args(args);

    let raw = std::fs::read_to_string(&args.file).map_err(|err| {
        AppError::config(ConfigError::ReadSchedule {
            path: args.file.clone(),
            source: err,
        })
    })?;

    let plan = schedule::parse_schedule(&raw)?;
    debug!(
        "Parsed {} request(s) across {} offset bucket(s)",
        plan.len(),
        plan.buckets().len()
    );
    if plan.is_empty() {
        info!("Schedule is empty; nothing to fetch");
    }
    if config.debug {
        report::debug_schedule(&plan);
    }

    let engine = TransferEngine::new(&config)?;
    let outcomes = Dispatcher::new(engine).run(&plan).await;

    let records = report::compile_results(&plan, &outcomes);
    report::print_results(&records);
    Ok(())
}
