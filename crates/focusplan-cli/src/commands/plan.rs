use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Args;

use focusplan_core::{
    Config, DayPlan, EnergyLevel, JsonBlockFile, JsonTaskFile, Planner, TimeBlock, TimeBlockSource,
};

use super::{parse_date, CmdResult};

#[derive(Args)]
pub struct PlanArgs {
    /// JSON file with an array of tasks
    #[arg(long)]
    tasks: PathBuf,
    /// JSON file with an array of committed time blocks
    #[arg(long)]
    blocks: Option<PathBuf>,
    /// Current energy level (low, medium, high)
    #[arg(long)]
    energy: EnergyLevel,
    /// Day to plan (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> CmdResult {
    let config = Config::load()?;
    let planner = Planner::from_config(&config)?;

    let tasks = JsonTaskFile::new(args.tasks);
    let blocks: Box<dyn TimeBlockSource> = match args.blocks {
        Some(path) => Box::new(JsonBlockFile::new(path)),
        None => Box::new(Vec::<TimeBlock>::new()),
    };

    let now = Local::now();
    let date = args.date.unwrap_or_else(|| now.date_naive());
    tracing::debug!(%date, energy = %args.energy, tasks = %tasks.path().display(), "planning day");
    let plan = planner.plan_day(&tasks, &*blocks, args.energy, date, now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, args.energy, planner.limit_hours());
    }
    Ok(())
}

fn hm(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M").to_string()
}

fn print_plan(plan: &DayPlan, energy: EnergyLevel, limit_hours: f64) {
    let result = &plan.result;
    println!("Plan for {} (energy: {})", plan.date, energy);

    println!("\nScheduled:");
    if result.scheduled.is_empty() {
        println!("  (none)");
    }
    for s in &result.scheduled {
        println!(
            "  {}-{}  {} [{}]",
            hm(s.start),
            hm(s.end),
            s.task.title,
            s.task.effective_energy()
        );
    }

    if !result.unscheduled.is_empty() {
        println!("\nUnscheduled:");
        for t in &result.unscheduled {
            println!("  {} ({} min)", t.title, t.duration_minutes);
        }
    }

    if !result.excluded.is_empty() {
        println!("\nExcluded (above current energy):");
        for t in &result.excluded {
            println!("  {} [{}]", t.title, t.effective_energy());
        }
    }

    println!(
        "\nLoad: {:.2}h / {:.2}h limit{}",
        plan.burnout.total_hours,
        limit_hours,
        if plan.burnout.is_burnout { "  OVERLOADED" } else { "" }
    );

    if !plan.free.is_empty() {
        println!("\nFree:");
        for gap in &plan.free {
            println!(
                "  {}-{} ({} min)",
                hm(gap.start_time),
                hm(gap.end_time),
                (gap.end_time - gap.start_time).num_minutes()
            );
        }
    }
}
