use super::{load_config, open_store};
use crate::output::{format_date, format_datetime, print_json, print_table};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use taskai_core::{
    commitment::Commitment,
    reminder::next_pending,
    types::CommitmentStatus,
    urgency::{accent_days, score_urgency, sort_by_target_date, sort_by_urgency, urgency_band},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRow<'a> {
    #[serde(flatten)]
    commitment: &'a Commitment,
    next_reminder: Option<chrono::DateTime<Utc>>,
    band: Option<String>,
}

/// Tasks in one status, soonest target first. Active rows carry their next
/// reminder and urgency band.
pub fn list(root: &Path, status: CommitmentStatus, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let config = load_config(root)?;
    let now = Utc::now();
    let commitments = store.list()?;
    let reminders = store.list_reminders()?;

    let selected: Vec<Commitment> = commitments
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect();
    let sorted = sort_by_target_date(&selected);

    let rows: Vec<ListRow> = sorted
        .into_iter()
        .map(|c| {
            let active = c.is_active();
            ListRow {
                commitment: c,
                next_reminder: next_pending(&reminders, &c.id).map(|r| r.scheduled_at),
                band: active.then(|| {
                    urgency_band(accent_days(c, &reminders, now), &config.bands).to_string()
                }),
            }
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No {status} tasks");
    } else {
        let table: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.commitment.id.clone(),
                    r.commitment.title.clone(),
                    r.commitment.kind.to_string(),
                    format_date(r.commitment.target_at),
                    r.next_reminder
                        .map(|t| format_datetime(Some(t)))
                        .unwrap_or_default(),
                    r.band.clone().unwrap_or_default(),
                ]
            })
            .collect();
        print_table(
            &["ID", "TITLE", "TYPE", "TARGET", "NEXT REMINDER", "BAND"],
            table,
        );
    }

    if status == CommitmentStatus::Active {
        let expired = commitments
            .iter()
            .filter(|c| c.status == CommitmentStatus::Expired)
            .count();
        match expired {
            0 => {}
            1 => println!("\n1 expired item (taskai expired)"),
            n => println!("\n{n} expired items (taskai expired)"),
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct UrgencyRow<'a> {
    id: &'a str,
    title: &'a str,
    status: CommitmentStatus,
    score: f64,
    reason: String,
}

/// Every task ranked by urgency score, most urgent first.
pub fn urgency(root: &Path, include_done: bool, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let now = Utc::now();
    let commitments: Vec<Commitment> = store
        .list()?
        .into_iter()
        .filter(|c| include_done || c.status != CommitmentStatus::Done)
        .collect();
    let reminders = store.list_reminders()?;

    let rows: Vec<UrgencyRow> = sort_by_urgency(&commitments, &reminders, now)
        .into_iter()
        .map(|c| {
            let s = score_urgency(c, &reminders, now);
            UrgencyRow {
                id: &c.id,
                title: &c.title,
                status: c.status,
                score: s.score,
                reason: s.reason,
            }
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No tasks yet");
        return Ok(());
    }
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.title.to_string(),
                r.status.to_string(),
                format!("{}", r.score),
                r.reason.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "STATUS", "SCORE", "REASON"], table);
    Ok(())
}
