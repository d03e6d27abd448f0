use crate::error::{Result, TaskaiError};
use crate::types::{CommitmentSource, CommitmentStatus, CommitmentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Commitment
// ---------------------------------------------------------------------------

/// A user-declared obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CommitmentType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `None` only for open-ended commitments.
    pub target_at: Option<DateTime<Utc>>,
    pub status: CommitmentStatus,
    pub source: CommitmentSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Only meaningful for open-ended commitments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
}

impl Commitment {
    /// Build a record from a validated draft. Id and timestamps are assigned
    /// here; the store is the only caller outside tests.
    pub fn from_draft(id: impl Into<String>, draft: NewCommitment, now: DateTime<Utc>) -> Self {
        let target_at = if draft.kind.requires_target() {
            draft.target_at
        } else {
            None
        };
        Self {
            id: id.into(),
            kind: draft.kind,
            title: draft.title.trim().to_string(),
            description: normalize_description(draft.description),
            target_at,
            status: draft.status,
            source: draft.source,
            created_at: now,
            updated_at: now,
            next_review_at: draft.next_review_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CommitmentStatus::Active
    }

    /// True when the target date lies strictly before `now`.
    pub fn is_past_target(&self, now: DateTime<Utc>) -> bool {
        self.target_at.is_some_and(|t| t < now)
    }

    pub fn mark_done(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(CommitmentStatus::Done, now)
    }

    pub fn mark_expired(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(CommitmentStatus::Expired, now)
    }

    fn transition(&mut self, next: CommitmentStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(TaskaiError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
                reason: "only active commitments can change status".to_string(),
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Apply an edit. Returns `true` when the reminder schedule inputs
    /// (type, target, next review) changed.
    pub fn apply(&mut self, patch: CommitmentPatch, now: DateTime<Utc>) -> Result<bool> {
        let kind = patch.kind.unwrap_or(self.kind);
        let title = patch.title.unwrap_or_else(|| self.title.clone());
        let description = match patch.description {
            Some(d) => normalize_description(Some(d)),
            None => self.description.clone(),
        };
        let target_changed = patch.target_at.is_some();
        let target_at = if kind.requires_target() {
            patch.target_at.or(self.target_at)
        } else {
            None
        };

        validate_fields(kind, &title, description.as_deref(), target_at)?;
        if target_changed && kind.requires_target() {
            require_future_target(target_at, now)?;
        }

        let next_review_at = if kind == CommitmentType::Open {
            patch.next_review_at.or(self.next_review_at)
        } else {
            None
        };

        let schedule_changed = kind != self.kind
            || target_at != self.target_at
            || next_review_at != self.next_review_at;

        self.kind = kind;
        self.title = title.trim().to_string();
        self.description = description;
        self.target_at = target_at;
        self.next_review_at = next_review_at;
        self.updated_at = now;
        Ok(schedule_changed)
    }
}

// ---------------------------------------------------------------------------
// NewCommitment
// ---------------------------------------------------------------------------

/// Input for creating a commitment: everything except id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommitment {
    #[serde(rename = "type")]
    pub kind: CommitmentType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_at: Option<DateTime<Utc>>,
    pub status: CommitmentStatus,
    pub source: CommitmentSource,
    #[serde(default)]
    pub next_review_at: Option<DateTime<Utc>>,
}

impl NewCommitment {
    pub fn new(kind: CommitmentType, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            target_at: None,
            status: CommitmentStatus::Active,
            source: CommitmentSource::Manual,
            next_review_at: None,
        }
    }

    pub fn with_target(mut self, target_at: DateTime<Utc>) -> Self {
        self.target_at = Some(target_at);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source(mut self, source: CommitmentSource) -> Self {
        self.source = source;
        self
    }

    /// Form-level checks run before a commitment is created.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        let target = if self.kind.requires_target() {
            self.target_at
        } else {
            None
        };
        validate_fields(self.kind, &self.title, self.description.as_deref(), target)?;
        if self.kind.requires_target() {
            require_future_target(target, now)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CommitmentPatch
// ---------------------------------------------------------------------------

/// Partial edit of a commitment. `None` leaves a field untouched; an empty
/// description clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<CommitmentType>,
    pub target_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_fields(
    kind: CommitmentType,
    title: &str,
    description: Option<&str>,
    target_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskaiError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskaiError::Validation(
            "Title must be less than 100 characters".to_string(),
        ));
    }
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN) {
        return Err(TaskaiError::Validation(
            "Description must be at most 500 characters".to_string(),
        ));
    }
    if kind.requires_target() && target_at.is_none() {
        return Err(TaskaiError::Validation(
            "Target date is required".to_string(),
        ));
    }
    Ok(())
}

/// Targets are compared by UTC calendar day, so a date-only target for today
/// (midnight) is still accepted.
fn require_future_target(target_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<()> {
    match target_at {
        Some(t) if t.date_naive() >= now.date_naive() => Ok(()),
        Some(_) => Err(TaskaiError::Validation(
            "Target date must be in the future".to_string(),
        )),
        None => Err(TaskaiError::Validation(
            "Target date is required".to_string(),
        )),
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
