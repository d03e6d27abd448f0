use crate::commitment::Commitment;
use crate::types::{CommitmentSource, CommitmentStatus, CommitmentType};
use chrono::{DateTime, Duration, Utc};

/// Demo data for a fresh install, with dates relative to `now`: two upcoming
/// expirations, one already expired, one done deadline, one active deadline
/// and one open-ended review.
pub fn demo_commitments(now: DateTime<Utc>) -> Vec<Commitment> {
    let days = Duration::days;
    let entry = |id: &str,
                 kind: CommitmentType,
                 title: &str,
                 target_at: Option<DateTime<Utc>>,
                 status: CommitmentStatus,
                 source: CommitmentSource,
                 created_at: DateTime<Utc>,
                 updated_at: DateTime<Utc>| Commitment {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: None,
        target_at,
        status,
        source,
        created_at,
        updated_at,
        next_review_at: None,
    };

    let mut open = entry(
        "demo-6",
        CommitmentType::Open,
        "Review Insurance Options",
        None,
        CommitmentStatus::Active,
        CommitmentSource::Manual,
        now - days(7),
        now - days(7),
    );
    open.next_review_at = Some(now + days(7));

    vec![
        entry(
            "demo-1",
            CommitmentType::Expiration,
            "Passport Renewal",
            Some(now + days(45)),
            CommitmentStatus::Active,
            CommitmentSource::Template,
            now - days(30),
            now - days(30),
        ),
        entry(
            "demo-2",
            CommitmentType::Expiration,
            "Car Insurance Renewal",
            Some(now + days(180)),
            CommitmentStatus::Active,
            CommitmentSource::Template,
            now - days(60),
            now - days(60),
        ),
        entry(
            "demo-3",
            CommitmentType::Expiration,
            "Laptop Warranty Expires",
            Some(now - days(5)),
            CommitmentStatus::Expired,
            CommitmentSource::Template,
            now - days(365),
            now - days(5),
        ),
        entry(
            "demo-4",
            CommitmentType::Deadline,
            "Submit Tax Documents",
            Some(now - days(10)),
            CommitmentStatus::Done,
            CommitmentSource::Manual,
            now - days(20),
            now - days(10),
        ),
        entry(
            "demo-5",
            CommitmentType::Deadline,
            "Complete Project Proposal",
            Some(now + days(10)),
            CommitmentStatus::Active,
            CommitmentSource::Manual,
            now - days(5),
            now - days(5),
        ),
        open,
    ]
}
