//! Time blocks and interval utilities.
//!
//! This module provides:
//! - `TimeBlock`, the committed or proposed (ghost) calendar interval
//! - Half-open interval overlap and duration helpers shared by the
//!   scheduler and the load evaluator
//! - Free gap detection between occupied blocks

mod block;
mod gap;
pub mod interval;

pub use block::{TaskRef, TimeBlock};
pub use gap::{find_gaps, GapSize, TimeGap};
pub use interval::{duration_hours, overlaps, union_minutes, Interval};
