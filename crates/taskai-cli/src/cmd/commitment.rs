use super::{open_store, parse_when};
use crate::output::{format_date, format_datetime, print_json};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use taskai_core::{
    commitment::{CommitmentPatch, NewCommitment},
    reminder::pending_for,
    template::find_template,
    types::CommitmentType,
    urgency::score_urgency,
};

pub struct AddArgs {
    pub title: String,
    pub kind: Option<CommitmentType>,
    pub target: Option<String>,
    pub description: Option<String>,
    pub review: Option<String>,
    pub template: Option<String>,
}

pub fn add(root: &Path, args: AddArgs, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let now = Utc::now();

    let mut draft = match args.template.as_deref() {
        Some(id) => find_template(id)?.draft(&args.title),
        None => NewCommitment::new(CommitmentType::Deadline, args.title),
    };
    if let Some(kind) = args.kind {
        draft.kind = kind;
    }
    if let Some(t) = args.target.as_deref() {
        draft = draft.with_target(parse_when(t)?);
    }
    if let Some(d) = args.description {
        draft = draft.with_description(d);
    }
    if let Some(r) = args.review.as_deref() {
        draft.next_review_at = Some(parse_when(r)?);
    }

    let commitment = store.create(draft, now).context("failed to create task")?;
    let reminders = store.reminders_for(&commitment.id)?;

    if json {
        print_json(&serde_json::json!({
            "commitment": commitment,
            "reminders": reminders,
        }))?;
    } else {
        println!("Added [{}]: {}", commitment.id, commitment.title);
        if reminders.is_empty() {
            println!("No reminders scheduled");
        } else {
            for r in &reminders {
                println!("  reminder: {}", format_datetime(Some(r.scheduled_at)));
            }
        }
    }
    Ok(())
}

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let now = Utc::now();
    let commitment = store
        .get(id)
        .with_context(|| format!("task '{id}' not found"))?;
    let reminders = store.reminders_for(id)?;
    let urgency = score_urgency(&commitment, &reminders, now);

    if json {
        print_json(&serde_json::json!({
            "commitment": commitment,
            "reminders": reminders,
            "score": urgency.score,
            "reason": urgency.reason,
        }))?;
        return Ok(());
    }

    println!("{}", commitment.title);
    println!("  id:       {}", commitment.id);
    println!("  type:     {}", commitment.kind);
    println!("  status:   {}", commitment.status);
    if let Some(target) = commitment.target_at {
        println!("  target:   {}", format_date(Some(target)));
    }
    if let Some(d) = &commitment.description {
        println!("  notes:    {d}");
    }
    println!("  created:  {}", format_datetime(Some(commitment.created_at)));
    println!("  urgency:  {} ({})", urgency.score, urgency.reason);

    if commitment.is_active() {
        let pending = pending_for(&reminders, id);
        println!();
        println!("Upcoming reminders:");
        if pending.is_empty() {
            println!("  No reminders.");
        }
        for r in pending {
            println!(
                "  [{}] {}  {}",
                r.id,
                format_datetime(Some(r.scheduled_at)),
                r.source
            );
        }
    }
    Ok(())
}

pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<CommitmentType>,
    pub target: Option<String>,
    pub review: Option<String>,
}

pub fn edit(root: &Path, id: &str, args: EditArgs, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let patch = CommitmentPatch {
        title: args.title,
        description: args.description,
        kind: args.kind,
        target_at: args.target.as_deref().map(parse_when).transpose()?,
        next_review_at: args.review.as_deref().map(parse_when).transpose()?,
    };

    let updated = store
        .update(id, patch, Utc::now())
        .with_context(|| format!("failed to update task '{id}'"))?;

    if json {
        print_json(&updated)?;
    } else {
        println!("Updated [{}]: {}", updated.id, updated.title);
    }
    Ok(())
}

pub fn done(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let updated = store
        .mark_done(id, Utc::now())
        .with_context(|| format!("failed to mark task '{id}' as done"))?;

    if json {
        print_json(&serde_json::json!({ "id": updated.id, "status": updated.status }))?;
    } else {
        println!("Done [{}]: {}", updated.id, updated.title);
    }
    Ok(())
}

pub fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    store
        .delete(id)
        .with_context(|| format!("failed to delete task '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted [{id}]");
    }
    Ok(())
}

pub fn sweep(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let expired = store
        .expire_overdue(Utc::now())
        .context("failed to expire overdue tasks")?;

    if json {
        print_json(&serde_json::json!({ "expired": expired }))?;
    } else if expired.is_empty() {
        println!("Nothing to expire");
    } else {
        for id in &expired {
            println!("Expired [{id}]");
        }
    }
    Ok(())
}
