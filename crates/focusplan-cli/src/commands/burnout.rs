use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use focusplan_core::timeline::union_minutes;
use focusplan_core::{check_burnout, Config, TimeBlock};

use super::{read_json, CmdResult};

#[derive(Args)]
pub struct BurnoutArgs {
    /// JSON file with an array of time blocks
    #[arg(long)]
    blocks: PathBuf,
    /// Daily limit in hours (defaults to burnout.limit_hours)
    #[arg(long)]
    limit: Option<f64>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Output {
    is_burnout: bool,
    total_hours: f64,
    limit_hours: f64,
    /// Hours with overlapping blocks counted once
    distinct_hours: f64,
}

pub fn run(args: BurnoutArgs) -> CmdResult {
    let limit_hours = match args.limit {
        Some(limit) => limit,
        None => Config::load()?.burnout.limit_hours,
    };

    let blocks: Vec<TimeBlock> = read_json(&args.blocks)?;
    for block in &blocks {
        block.validate()?;
    }

    let report = check_burnout(&blocks, limit_hours);
    let output = Output {
        is_burnout: report.is_burnout,
        total_hours: report.total_hours,
        limit_hours,
        distinct_hours: union_minutes(&blocks) as f64 / 60.0,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Total: {:.2}h (limit {:.2}h)", output.total_hours, output.limit_hours);
    if output.distinct_hours < output.total_hours {
        println!("Without overlaps: {:.2}h", output.distinct_hours);
    }
    println!("{}", if output.is_burnout { "OVERLOADED" } else { "ok" });
    Ok(())
}
