pub mod burnout;
pub mod config;
pub mod energy;
pub mod plan;

use std::path::Path;

use chrono::NaiveDate;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: '{s}'. Use YYYY-MM-DD"))
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}
