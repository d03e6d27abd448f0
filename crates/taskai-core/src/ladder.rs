//! Reminder ladders: the fixed, type-specific set of reminder dates a
//! commitment receives when it becomes active.
//!
//! Dated commitments count backwards from their target. Open-ended ones count
//! forwards from creation: a first review two weeks in, then every thirty
//! days. Dates already behind `now` are dropped, so a commitment created with
//! little lead time can end up with a short or empty ladder. An empty ladder
//! is a normal result.

use crate::commitment::Commitment;
use crate::reminder::ReminderDraft;
use crate::types::{CommitmentType, ReminderSource};
use chrono::{DateTime, Duration, Utc};

/// Days before the target for expiration commitments.
pub const EXPIRATION_OFFSETS: [i64; 4] = [90, 30, 7, 1];

/// Days before the target for deadline commitments.
pub const DEADLINE_OFFSETS: [i64; 3] = [14, 7, 1];

/// Days after creation for open-ended commitments.
pub const OPEN_REVIEW_OFFSETS: [i64; 3] = [14, 44, 74];

/// Default gap between creation and the first review of an open commitment.
pub const DEFAULT_REVIEW_DAYS: i64 = 14;

/// Candidate reminder dates for `commitment`, anchored at `anchor`, with
/// anything before `now` removed, earliest first.
///
/// `anchor` is ignored for open-ended commitments, whose ladder hangs off
/// `created_at`.
pub fn generate_ladder(
    commitment: &Commitment,
    anchor: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let mut dates: Vec<DateTime<Utc>> = match commitment.kind {
        CommitmentType::Expiration => EXPIRATION_OFFSETS
            .iter()
            .map(|d| anchor - Duration::days(*d))
            .collect(),
        CommitmentType::Deadline => DEADLINE_OFFSETS
            .iter()
            .map(|d| anchor - Duration::days(*d))
            .collect(),
        CommitmentType::Open => OPEN_REVIEW_OFFSETS
            .iter()
            .map(|d| commitment.created_at + Duration::days(*d))
            .collect(),
    };

    dates.retain(|d| *d >= now);
    dates.sort();
    dates
}

/// Next review date for an open-ended commitment: the stored
/// `next_review_at`, else two weeks after creation. `None` for dated types.
pub fn next_review_date(commitment: &Commitment) -> Option<DateTime<Utc>> {
    if commitment.kind != CommitmentType::Open {
        return None;
    }
    Some(
        commitment
            .next_review_at
            .unwrap_or(commitment.created_at + Duration::days(DEFAULT_REVIEW_DAYS)),
    )
}

/// Date the ladder is anchored to: next review for open commitments, the
/// target otherwise.
pub fn resolve_anchor(commitment: &Commitment) -> Option<DateTime<Utc>> {
    match commitment.kind {
        CommitmentType::Open => next_review_date(commitment),
        CommitmentType::Expiration | CommitmentType::Deadline => commitment.target_at,
    }
}

/// Pending ladder reminders for `commitment`. Done and expired commitments,
/// and dated ones without a target, get none.
pub fn generate_reminders_from_commitment(
    commitment: &Commitment,
    now: DateTime<Utc>,
) -> Vec<ReminderDraft> {
    if commitment.status.is_terminal() {
        return Vec::new();
    }
    let Some(anchor) = resolve_anchor(commitment) else {
        return Vec::new();
    };

    generate_ladder(commitment, anchor, now)
        .into_iter()
        .map(|at| ReminderDraft::pending(commitment.id.clone(), at, ReminderSource::Ladder))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::NewCommitment;
    use crate::types::{CommitmentStatus, ReminderStatus};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 8, 30, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    fn dated(kind: CommitmentType, target: DateTime<Utc>) -> Commitment {
        Commitment::from_draft(
            "c1",
            NewCommitment::new(kind, "Dated").with_target(target),
            now() - days(30),
        )
    }

    fn open(created: DateTime<Utc>) -> Commitment {
        Commitment::from_draft("c2", NewCommitment::new(CommitmentType::Open, "Open"), created)
    }

    #[test]
    fn expiration_far_out_gets_full_ladder() {
        let target = now() + days(200);
        let c = dated(CommitmentType::Expiration, target);
        let ladder = generate_ladder(&c, target, now());
        assert_eq!(
            ladder,
            vec![target - days(90), target - days(30), target - days(7), target - days(1)]
        );
    }

    #[test]
    fn expiration_45_days_out_drops_90_day_rung() {
        let target = now() + days(45);
        let c = dated(CommitmentType::Expiration, target);
        let ladder = generate_ladder(&c, target, now());
        assert_eq!(ladder, vec![now() + days(15), now() + days(38), now() + days(44)]);
    }

    #[test]
    fn deadline_ladder() {
        let target = now() + days(10);
        let c = dated(CommitmentType::Deadline, target);
        let ladder = generate_ladder(&c, target, now());
        assert_eq!(ladder, vec![now() + days(3), now() + days(9)]);
    }

    #[test]
    fn everything_past_gives_empty_ladder() {
        let target = now() + Duration::hours(12);
        let c = dated(CommitmentType::Deadline, target);
        assert!(generate_ladder(&c, target, now()).is_empty());
    }

    #[test]
    fn rung_exactly_at_now_is_kept() {
        let target = now() + days(7);
        let c = dated(CommitmentType::Deadline, target);
        let ladder = generate_ladder(&c, target, now());
        assert_eq!(ladder.first(), Some(&now()));
    }

    #[test]
    fn open_ladder_ignores_anchor() {
        let created = now() - days(20);
        let mut c = open(created);
        c.next_review_at = Some(now() + days(1));
        let ladder = generate_ladder(&c, now() + days(500), now());
        assert_eq!(ladder, vec![created + days(44), created + days(74)]);
    }

    #[test]
    fn next_review_defaults_to_two_weeks() {
        let created = now() - days(20);
        let c = open(created);
        assert_eq!(next_review_date(&c), Some(created + days(14)));

        let mut explicit = open(created);
        explicit.next_review_at = Some(now() + days(7));
        assert_eq!(next_review_date(&explicit), Some(now() + days(7)));

        let d = dated(CommitmentType::Deadline, now() + days(3));
        assert_eq!(next_review_date(&d), None);
    }

    #[test]
    fn reminders_for_active_commitment() {
        let target = now() + days(45);
        let c = dated(CommitmentType::Expiration, target);
        let drafts = generate_reminders_from_commitment(&c, now());
        assert_eq!(drafts.len(), 3);
        for d in &drafts {
            assert_eq!(d.commitment_id, "c1");
            assert_eq!(d.status, ReminderStatus::Pending);
            assert_eq!(d.source, ReminderSource::Ladder);
        }
        assert!(drafts.windows(2).all(|w| w[0].scheduled_at <= w[1].scheduled_at));
    }

    #[test]
    fn no_reminders_for_terminal_commitments() {
        let target = now() + days(45);
        let mut done = dated(CommitmentType::Expiration, target);
        done.status = CommitmentStatus::Done;
        assert!(generate_reminders_from_commitment(&done, now()).is_empty());

        let mut expired = dated(CommitmentType::Expiration, target);
        expired.status = CommitmentStatus::Expired;
        assert!(generate_reminders_from_commitment(&expired, now()).is_empty());
    }

    #[test]
    fn no_reminders_without_target() {
        let mut c = dated(CommitmentType::Deadline, now() + days(10));
        c.target_at = None;
        assert!(generate_reminders_from_commitment(&c, now()).is_empty());
    }

    #[test]
    fn stale_open_commitment_gets_nothing() {
        let c = open(now() - days(100));
        assert!(generate_reminders_from_commitment(&c, now()).is_empty());
    }
}
