use crate::commitment::Commitment;
use crate::config::ReminderLimits;
use crate::error::{Result, TaskaiError};
use crate::types::{ReminderSource, ReminderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Reminder
// ---------------------------------------------------------------------------

/// A scheduled nudge tied to exactly one commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub commitment_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ReminderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source: ReminderSource,
}

impl Reminder {
    pub fn from_draft(id: impl Into<String>, draft: ReminderDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            commitment_id: draft.commitment_id,
            scheduled_at: draft.scheduled_at,
            status: draft.status,
            snoozed_until: None,
            created_at: now,
            source: draft.source,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReminderStatus::Pending
    }

    /// Pending → cancelled. Returns `false` if the reminder was not pending.
    pub fn cancel(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = ReminderStatus::Cancelled;
        true
    }
}

// ---------------------------------------------------------------------------
// ReminderDraft
// ---------------------------------------------------------------------------

/// Reminder shape before the store assigns an id and creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub commitment_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ReminderStatus,
    #[serde(default)]
    pub source: ReminderSource,
}

impl ReminderDraft {
    pub fn pending(
        commitment_id: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        source: ReminderSource,
    ) -> Self {
        Self {
            commitment_id: commitment_id.into(),
            scheduled_at,
            status: ReminderStatus::Pending,
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Pending reminders for one commitment, earliest first. Equal times keep
/// their original order.
pub fn pending_for<'a>(reminders: &'a [Reminder], commitment_id: &str) -> Vec<&'a Reminder> {
    let mut pending: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| r.commitment_id == commitment_id && r.is_pending())
        .collect();
    pending.sort_by_key(|r| r.scheduled_at);
    pending
}

/// The earliest pending reminder for a commitment, if any.
pub fn next_pending<'a>(reminders: &'a [Reminder], commitment_id: &str) -> Option<&'a Reminder> {
    pending_for(reminders, commitment_id).into_iter().next()
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Check whether a new reminder may be scheduled at `at`.
///
/// Rules: the commitment must be active, the time must be in the future and
/// not after the target date, the pending count and pending snooze count
/// must stay within `limits`, and no other pending reminder of the same
/// commitment may fall on the same (UTC) calendar day.
pub fn check_new_reminder(
    existing: &[Reminder],
    commitment: &Commitment,
    at: DateTime<Utc>,
    source: ReminderSource,
    limits: &ReminderLimits,
    now: DateTime<Utc>,
) -> Result<()> {
    check_time(commitment, at, now)?;

    let pending = pending_for(existing, &commitment.id);
    if pending.len() >= limits.max_pending {
        return Err(TaskaiError::ReminderRejected(format!(
            "Maximum {} reminders allowed.",
            limits.max_pending
        )));
    }
    if source == ReminderSource::Snooze {
        let snoozes = pending
            .iter()
            .filter(|r| r.source == ReminderSource::Snooze)
            .count();
        if snoozes >= limits.max_snoozes {
            return Err(TaskaiError::ReminderRejected(format!(
                "You can have at most {} snoozes. Remove or edit one to add another.",
                limits.max_snoozes
            )));
        }
    }
    check_same_day(&pending, at, None)
}

/// Check whether `reminder_id` may be moved to `at`. The moved reminder is
/// excluded from the same-day comparison.
pub fn check_reschedule(
    existing: &[Reminder],
    commitment: &Commitment,
    reminder_id: &str,
    at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<()> {
    check_time(commitment, at, now)?;
    let pending = pending_for(existing, &commitment.id);
    check_same_day(&pending, at, Some(reminder_id))
}

fn check_time(commitment: &Commitment, at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if !commitment.is_active() {
        return Err(TaskaiError::ReminderRejected(format!(
            "Reminders can only be scheduled for active tasks (task is {})",
            commitment.status
        )));
    }
    if at <= now {
        return Err(TaskaiError::ReminderRejected(
            "Date and time must be in the future".to_string(),
        ));
    }
    if commitment.target_at.is_some_and(|t| at > t) {
        return Err(TaskaiError::ReminderRejected(
            "Reminder date cannot be after the task target date".to_string(),
        ));
    }
    Ok(())
}

fn check_same_day(pending: &[&Reminder], at: DateTime<Utc>, exclude: Option<&str>) -> Result<()> {
    let day = at.date_naive();
    let clash = pending
        .iter()
        .filter(|r| Some(r.id.as_str()) != exclude)
        .any(|r| r.scheduled_at.date_naive() == day);
    if clash {
        return Err(TaskaiError::ReminderRejected(
            "Only one reminder per day allowed.".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
