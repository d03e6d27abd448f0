use super::{load_config, open_store, parse_when};
use crate::output::{format_datetime, print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use std::path::Path;
use taskai_core::reminder::{pending_for, Reminder};

#[derive(Subcommand)]
pub enum ReminderSubcommand {
    /// List reminders for a task (pending only unless --all)
    List {
        id: String,
        /// Include cancelled and other non-pending reminders
        #[arg(long)]
        all: bool,
    },
    /// Add a snooze reminder to a task
    Add {
        id: String,
        /// When to remind: YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339
        #[arg(long)]
        at: String,
    },
    /// Move a pending reminder to a new time
    Move {
        reminder_id: String,
        #[arg(long)]
        at: String,
    },
    /// Delete a reminder
    Delete { reminder_id: String },
    /// Replace a task's pending reminders with a fresh ladder
    Regenerate { id: String },
}

pub fn run(root: &Path, subcmd: ReminderSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ReminderSubcommand::List { id, all } => list(root, &id, all, json),
        ReminderSubcommand::Add { id, at } => add(root, &id, &at, json),
        ReminderSubcommand::Move { reminder_id, at } => move_to(root, &reminder_id, &at, json),
        ReminderSubcommand::Delete { reminder_id } => delete(root, &reminder_id, json),
        ReminderSubcommand::Regenerate { id } => regenerate(root, &id, json),
    }
}

fn list(root: &Path, id: &str, all: bool, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let reminders = store
        .reminders_for(id)
        .with_context(|| format!("task '{id}' not found"))?;

    let shown: Vec<&Reminder> = if all {
        let mut everything: Vec<&Reminder> = reminders.iter().collect();
        everything.sort_by_key(|r| r.scheduled_at);
        everything
    } else {
        pending_for(&reminders, id)
    };

    if json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("No reminders.");
        return Ok(());
    }
    print_reminders(&shown);
    Ok(())
}

fn add(root: &Path, id: &str, at: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let config = load_config(root)?;
    let at = parse_when(at)?;
    let reminder = store
        .add_snooze(id, at, &config.reminders, Utc::now())
        .with_context(|| format!("cannot add reminder to task '{id}'"))?;

    if json {
        print_json(&reminder)?;
    } else {
        println!(
            "Added reminder [{}] for {}",
            reminder.id,
            format_datetime(Some(reminder.scheduled_at))
        );
    }
    Ok(())
}

fn move_to(root: &Path, reminder_id: &str, at: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let at = parse_when(at)?;
    let reminder = store
        .reschedule_reminder(reminder_id, at, Utc::now())
        .with_context(|| format!("cannot move reminder '{reminder_id}'"))?;

    if json {
        print_json(&reminder)?;
    } else {
        println!(
            "Moved reminder [{}] to {}",
            reminder.id,
            format_datetime(Some(reminder.scheduled_at))
        );
    }
    Ok(())
}

fn delete(root: &Path, reminder_id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    store
        .delete_reminder(reminder_id)
        .with_context(|| format!("failed to delete reminder '{reminder_id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": reminder_id, "deleted": true }))?;
    } else {
        println!("Deleted reminder [{reminder_id}]");
    }
    Ok(())
}

fn regenerate(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let created = store
        .regenerate_reminders(id, Utc::now())
        .with_context(|| format!("failed to regenerate reminders for task '{id}'"))?;

    if json {
        return print_json(&created);
    }
    if created.is_empty() {
        println!("No reminders scheduled: every ladder date is in the past");
        return Ok(());
    }
    let shown: Vec<&Reminder> = created.iter().collect();
    print_reminders(&shown);
    Ok(())
}

fn print_reminders(reminders: &[&Reminder]) {
    let rows: Vec<Vec<String>> = reminders
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                format_datetime(Some(r.scheduled_at)),
                r.source.to_string(),
                r.status.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "WHEN", "SOURCE", "STATUS"], rows);
}
