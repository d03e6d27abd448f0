use crate::error::TaskaiError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CommitmentType
// ---------------------------------------------------------------------------

/// Shape of a commitment. Decides which reminder ladder it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentType {
    /// Something that lapses on a date (passport, insurance, warranty).
    Expiration,
    /// Something that must be finished by a date.
    Deadline,
    /// No target date; reviewed periodically.
    Open,
}

impl CommitmentType {
    pub fn all() -> &'static [CommitmentType] {
        &[
            CommitmentType::Expiration,
            CommitmentType::Deadline,
            CommitmentType::Open,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommitmentType::Expiration => "expiration",
            CommitmentType::Deadline => "deadline",
            CommitmentType::Open => "open",
        }
    }

    /// Whether a commitment of this type must carry a target date.
    pub fn requires_target(self) -> bool {
        !matches!(self, CommitmentType::Open)
    }
}

impl fmt::Display for CommitmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitmentType {
    type Err = TaskaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expiration" => Ok(CommitmentType::Expiration),
            "deadline" => Ok(CommitmentType::Deadline),
            "open" => Ok(CommitmentType::Open),
            _ => Err(TaskaiError::InvalidCommitmentType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CommitmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    Active,
    Done,
    Expired,
}

impl CommitmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitmentStatus::Active => "active",
            CommitmentStatus::Done => "done",
            CommitmentStatus::Expired => "expired",
        }
    }

    /// `done` and `expired` never leave their state and get no new reminders.
    pub fn is_terminal(self) -> bool {
        matches!(self, CommitmentStatus::Done | CommitmentStatus::Expired)
    }

    pub fn can_transition_to(self, next: CommitmentStatus) -> bool {
        matches!(
            (self, next),
            (CommitmentStatus::Active, CommitmentStatus::Done)
                | (CommitmentStatus::Active, CommitmentStatus::Expired)
        )
    }
}

impl fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitmentStatus {
    type Err = TaskaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CommitmentStatus::Active),
            "done" => Ok(CommitmentStatus::Done),
            "expired" => Ok(CommitmentStatus::Expired),
            _ => Err(TaskaiError::InvalidCommitmentStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CommitmentSource
// ---------------------------------------------------------------------------

/// Provenance only; has no effect on ladders or urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentSource {
    Template,
    Manual,
}

impl CommitmentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitmentSource::Template => "template",
            CommitmentSource::Manual => "manual",
        }
    }
}

impl fmt::Display for CommitmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitmentSource {
    type Err = TaskaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template" => Ok(CommitmentSource::Template),
            "manual" => Ok(CommitmentSource::Manual),
            _ => Err(TaskaiError::InvalidCommitmentSource(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ReminderStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    /// Reserved. Nothing in this crate produces it.
    Sent,
    Cancelled,
    Snoozed,
}

impl ReminderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Sent => "sent",
            ReminderStatus::Cancelled => "cancelled",
            ReminderStatus::Snoozed => "snoozed",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReminderStatus {
    type Err = TaskaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReminderStatus::Pending),
            "sent" => Ok(ReminderStatus::Sent),
            "cancelled" => Ok(ReminderStatus::Cancelled),
            "snoozed" => Ok(ReminderStatus::Snoozed),
            _ => Err(TaskaiError::InvalidReminderStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ReminderSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderSource {
    /// Generated from the commitment's ladder.
    #[default]
    Ladder,
    /// Added by the user.
    Snooze,
}

impl ReminderSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderSource::Ladder => "ladder",
            ReminderSource::Snooze => "snooze",
        }
    }
}

impl fmt::Display for ReminderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReminderSource {
    type Err = TaskaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ladder" => Ok(ReminderSource::Ladder),
            "snooze" => Ok(ReminderSource::Snooze),
            _ => Err(TaskaiError::InvalidReminderSource(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
