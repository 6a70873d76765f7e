//! Energy inference for a single task.

use clap::Args;

use focusplan_core::{calculate_task_energy, EnergyLevel, Task};

use super::CmdResult;

#[derive(Args)]
pub struct EnergyArgs {
    /// Task title
    #[arg(long)]
    title: String,
    /// Task duration in minutes
    #[arg(long)]
    duration: u32,
    /// Explicit level; always wins over inference
    #[arg(long)]
    level: Option<EnergyLevel>,
}

pub fn run(args: EnergyArgs) -> CmdResult {
    let mut task = Task::new("cli", args.title, args.duration);
    task.energy_level = args.level;
    task.validate()?;

    println!("{}", calculate_task_energy(&task));
    Ok(())
}
