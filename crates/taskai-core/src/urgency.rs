use crate::commitment::Commitment;
use crate::config::BandThresholds;
use crate::reminder::{next_pending, Reminder};
use crate::types::CommitmentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCORE_COMPLETED: f64 = 0.0;
pub const SCORE_EXPIRED: f64 = 1000.0;
pub const SCORE_OVERDUE_REMINDER: f64 = 900.0;
pub const SCORE_PAST_TARGET: f64 = 800.0;
pub const SCORE_OPEN_ENDED: f64 = 10.0;

// ---------------------------------------------------------------------------
// UrgencyScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyScore<'a> {
    pub commitment: &'a Commitment,
    /// Higher is more urgent.
    pub score: f64,
    pub reason: String,
}

/// Whole days from `now` until `at`, truncated toward zero.
pub fn days_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (at - now).num_days()
}

/// Score one commitment. The first matching rule wins:
///
/// 1. done: 0
/// 2. target date already passed: 1000, whatever the stored status says
/// 3. earliest pending reminder overdue: 900, else `100 - days until it`
/// 4. target in the past: 800, else `50 - days until target / 10`
/// 5. nothing scheduled: 10
///
/// `reminders` may cover any number of commitments; only this commitment's
/// pending reminders are considered.
pub fn score_urgency<'a>(
    commitment: &'a Commitment,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> UrgencyScore<'a> {
    let scored = |score: f64, reason: String| UrgencyScore {
        commitment,
        score,
        reason,
    };

    if commitment.status == CommitmentStatus::Done {
        return scored(SCORE_COMPLETED, "Completed".to_string());
    }

    if commitment.is_past_target(now) {
        return scored(SCORE_EXPIRED, "Expired".to_string());
    }

    if let Some(next) = next_pending(reminders, &commitment.id) {
        if next.scheduled_at < now {
            return scored(SCORE_OVERDUE_REMINDER, "Overdue reminder".to_string());
        }
        let days = days_until(next.scheduled_at, now);
        return scored(
            (100.0 - days as f64).max(0.0),
            format!("{days} days until reminder"),
        );
    }

    if let Some(target) = commitment.target_at {
        if target < now {
            return scored(SCORE_PAST_TARGET, "Past target date".to_string());
        }
        let days = days_until(target, now);
        return scored(
            (50.0 - days as f64 / 10.0).max(0.0),
            format!("{days} days until target"),
        );
    }

    scored(SCORE_OPEN_ENDED, "Open-ended".to_string())
}

/// Commitments ordered most urgent first. Equal scores keep input order.
pub fn sort_by_urgency<'a>(
    commitments: &'a [Commitment],
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> Vec<&'a Commitment> {
    let mut scored: Vec<UrgencyScore<'a>> = commitments
        .iter()
        .map(|c| score_urgency(c, reminders, now))
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.into_iter().map(|s| s.commitment).collect()
}

/// Commitments ordered by target date, soonest first. Those without a target
/// go last, in input order.
pub fn sort_by_target_date(commitments: &[Commitment]) -> Vec<&Commitment> {
    let mut sorted: Vec<&Commitment> = commitments.iter().collect();
    sorted.sort_by_key(|c| (c.target_at.is_none(), c.target_at));
    sorted
}

// ---------------------------------------------------------------------------
// UrgencyBand
// ---------------------------------------------------------------------------

/// Accent band for the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBand {
    Urgent,
    Soon,
    Ok,
}

impl UrgencyBand {
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyBand::Urgent => "urgent",
            UrgencyBand::Soon => "soon",
            UrgencyBand::Ok => "ok",
        }
    }
}

impl fmt::Display for UrgencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band for a day count. Overdue counts as urgent; an unresolvable count
/// (nothing scheduled) is ok.
pub fn urgency_band(days: Option<i64>, thresholds: &BandThresholds) -> UrgencyBand {
    match days {
        None => UrgencyBand::Ok,
        Some(d) if d <= thresholds.urgent_days => UrgencyBand::Urgent,
        Some(d) if d <= thresholds.soon_days => UrgencyBand::Soon,
        Some(_) => UrgencyBand::Ok,
    }
}

/// Day count used for banding: the target date, else the next pending
/// reminder, else `None`.
pub fn accent_days(
    commitment: &Commitment,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> Option<i64> {
    if let Some(target) = commitment.target_at {
        return Some(days_until(target, now));
    }
    next_pending(reminders, &commitment.id).map(|r| days_until(r.scheduled_at, now))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::NewCommitment;
    use crate::reminder::ReminderDraft;
    use crate::types::{CommitmentType, ReminderSource};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    fn dated(id: &str, target: DateTime<Utc>) -> Commitment {
        let mut c = Commitment::from_draft(
            id,
            NewCommitment::new(CommitmentType::Deadline, id).with_target(now() + days(1)),
            now() - days(60),
        );
        c.target_at = Some(target);
        c
    }

    fn open(id: &str) -> Commitment {
        Commitment::from_draft(
            id,
            NewCommitment::new(CommitmentType::Open, id),
            now() - days(60),
        )
    }

    fn pending(commitment_id: &str, at: DateTime<Utc>) -> Reminder {
        Reminder::from_draft(
            format!("r-{commitment_id}-{}", at.timestamp()),
            ReminderDraft::pending(commitment_id, at, ReminderSource::Ladder),
            now() - days(60),
        )
    }

    #[test]
    fn done_scores_zero_regardless_of_dates() {
        let mut c = dated("a", now() - days(5));
        c.status = CommitmentStatus::Done;
        let s = score_urgency(&c, &[pending("a", now() - days(1))], now());
        assert_eq!(s.score, 0.0);
        assert_eq!(s.reason, "Completed");
    }

    #[test]
    fn past_target_scores_expired_regardless_of_status_and_reminders() {
        let c = dated("a", now() - days(5));
        let reminders = vec![pending("a", now() + days(2))];
        let s = score_urgency(&c, &reminders, now());
        assert_eq!(s.score, 1000.0);
        assert_eq!(s.reason, "Expired");

        let mut stored_expired = c.clone();
        stored_expired.status = CommitmentStatus::Expired;
        assert_eq!(score_urgency(&stored_expired, &reminders, now()).score, 1000.0);
    }

    #[test]
    fn overdue_reminder() {
        let c = dated("a", now() + days(20));
        let s = score_urgency(&c, &[pending("a", now() - Duration::hours(2))], now());
        assert_eq!(s.score, 900.0);
        assert_eq!(s.reason, "Overdue reminder");
    }

    #[test]
    fn earliest_pending_reminder_drives_score() {
        let c = dated("a", now() + days(40));
        let reminders = vec![
            pending("a", now() + days(26)),
            pending("a", now() + days(6)),
            pending("b", now() + days(1)),
        ];
        let s = score_urgency(&c, &reminders, now());
        assert_eq!(s.score, 94.0);
        assert_eq!(s.reason, "6 days until reminder");
    }

    #[test]
    fn cancelled_reminders_are_ignored() {
        let c = dated("a", now() + days(100));
        let mut r = pending("a", now() + days(2));
        r.cancel();
        let s = score_urgency(&c, &[r], now());
        assert_eq!(s.score, 40.0);
        assert_eq!(s.reason, "100 days until target");
    }

    #[test]
    fn target_score_floors_at_zero() {
        let c = dated("a", now() + days(900));
        assert_eq!(score_urgency(&c, &[], now()).score, 0.0);
    }

    #[test]
    fn target_score_is_fractional() {
        let c = dated("a", now() + days(15));
        assert_eq!(score_urgency(&c, &[], now()).score, 48.5);
    }

    #[test]
    fn reminder_score_floors_at_zero() {
        let c = open("a");
        let s = score_urgency(&c, &[pending("a", now() + days(150))], now());
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn open_ended_fallback() {
        let o = open("a");
        let s = score_urgency(&o, &[], now());
        assert_eq!(s.score, 10.0);
        assert_eq!(s.reason, "Open-ended");
    }

    #[test]
    fn sort_by_urgency_is_stable_descending() {
        let commitments = vec![
            open("o1"),
            dated("late", now() + days(300)),
            dated("gone", now() - days(1)),
            open("o2"),
        ];
        let reminders = vec![pending("late", now() + days(10))];
        let ids: Vec<&str> = sort_by_urgency(&commitments, &reminders, now())
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["gone", "late", "o1", "o2"]);
    }

    #[test]
    fn sort_by_target_puts_open_last() {
        let commitments = vec![
            open("o1"),
            dated("far", now() + days(90)),
            open("o2"),
            dated("near", now() + days(3)),
        ];
        let ids: Vec<&str> = sort_by_target_date(&commitments)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["near", "far", "o1", "o2"]);
    }

    #[test]
    fn days_until_truncates() {
        assert_eq!(days_until(now() + Duration::hours(47), now()), 1);
        assert_eq!(days_until(now() - Duration::hours(47), now()), -1);
        assert_eq!(days_until(now() + Duration::hours(5), now()), 0);
    }

    #[test]
    fn bands() {
        let t = BandThresholds::default();
        assert_eq!(urgency_band(Some(-2), &t), UrgencyBand::Urgent);
        assert_eq!(urgency_band(Some(3), &t), UrgencyBand::Urgent);
        assert_eq!(urgency_band(Some(4), &t), UrgencyBand::Soon);
        assert_eq!(urgency_band(Some(29), &t), UrgencyBand::Soon);
        assert_eq!(urgency_band(Some(30), &t), UrgencyBand::Ok);
        assert_eq!(urgency_band(None, &t), UrgencyBand::Ok);
    }

    #[test]
    fn accent_days_prefers_target_then_reminder() {
        let c = dated("a", now() + days(12));
        assert_eq!(accent_days(&c, &[pending("a", now() + days(2))], now()), Some(12));

        let o = open("o");
        assert_eq!(accent_days(&o, &[pending("o", now() + days(2))], now()), Some(2));
        assert_eq!(accent_days(&o, &[], now()), None);
    }
}
