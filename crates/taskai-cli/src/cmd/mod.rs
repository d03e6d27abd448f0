pub mod commitment;
pub mod config;
pub mod init;
pub mod list;
pub mod reminder;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::path::Path;
use taskai_core::{config::Config, store::Store};

/// Parse a user-supplied date: RFC 3339, `YYYY-MM-DD HH:MM` (UTC), or a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_when(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::default()).and_utc());
    }
    anyhow::bail!("invalid date '{s}': expected YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339")
}

pub fn open_store(root: &Path) -> anyhow::Result<Store> {
    Store::open(root).context("no taskai data here")
}

pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).context("failed to load config")
}
