use crate::commitment::{Commitment, CommitmentPatch, NewCommitment};
use crate::config::{Config, ReminderLimits};
use crate::error::{Result, TaskaiError};
use crate::ladder::generate_reminders_from_commitment;
use crate::reminder::{check_new_reminder, check_reschedule, Reminder, ReminderDraft};
use crate::types::{CommitmentStatus, ReminderSource};
use crate::{io, paths, seed};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-backed record store rooted at `<root>/.taskai/`.
///
/// Commitments and reminders live in two JSON arrays. Every operation loads
/// what it needs and writes back atomically; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create the data directory, a default config and empty record files.
    /// Existing files are left alone.
    pub fn init(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(paths::taskai_dir(root))?;
        if !paths::config_path(root).exists() {
            Config::default().save(root)?;
        }
        io::write_if_missing(&paths::commitments_path(root), b"[]\n")?;
        io::write_if_missing(&paths::reminders_path(root), b"[]\n")?;
        info!(root = %root.display(), "initialized taskai store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn open(root: &Path) -> Result<Self> {
        if !paths::taskai_dir(root).is_dir() {
            return Err(TaskaiError::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // -----------------------------------------------------------------------
    // Commitments
    // -----------------------------------------------------------------------

    pub fn list(&self) -> Result<Vec<Commitment>> {
        io::read_json_array(&paths::commitments_path(&self.root))
    }

    pub fn get(&self, id: &str) -> Result<Commitment> {
        self.list()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TaskaiError::CommitmentNotFound(id.to_string()))
    }

    /// Validate and persist a new commitment. Active commitments get their
    /// ladder reminders in the same call.
    pub fn create(&self, draft: NewCommitment, now: DateTime<Utc>) -> Result<Commitment> {
        draft.validate(now)?;
        let commitment = Commitment::from_draft(new_id(), draft, now);

        let mut commitments = self.list()?;
        commitments.push(commitment.clone());
        self.save_commitments(&commitments)?;
        info!(id = %commitment.id, kind = %commitment.kind, "created commitment");

        if commitment.is_active() {
            let drafts = generate_reminders_from_commitment(&commitment, now);
            self.insert_ladder(&commitment, drafts, now)?;
        }
        Ok(commitment)
    }

    /// Apply an edit. If the schedule changed on an active commitment, its
    /// pending reminders are regenerated from the ladder.
    pub fn update(
        &self,
        id: &str,
        patch: CommitmentPatch,
        now: DateTime<Utc>,
    ) -> Result<Commitment> {
        let mut commitments = self.list()?;
        let commitment = find_commitment_mut(&mut commitments, id)?;
        let schedule_changed = commitment.apply(patch, now)?;
        let updated = commitment.clone();
        self.save_commitments(&commitments)?;
        debug!(id, schedule_changed, "updated commitment");

        if schedule_changed && updated.is_active() {
            self.regenerate_reminders(id, now)?;
        }
        Ok(updated)
    }

    /// Mark a commitment done and cancel (not delete) its pending reminders.
    ///
    /// Reminders are cancelled before the status is written, so a failed
    /// write never leaves a finished commitment with live reminders.
    pub fn mark_done(&self, id: &str, now: DateTime<Utc>) -> Result<Commitment> {
        let mut commitments = self.list()?;
        let commitment = find_commitment_mut(&mut commitments, id)?;
        commitment.mark_done(now)?;
        let updated = commitment.clone();

        let cancelled = self.cancel_pending(&[id])?;
        self.save_commitments(&commitments)?;
        info!(id, cancelled, "commitment done");
        Ok(updated)
    }

    /// Delete a commitment together with all of its reminders.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut commitments = self.list()?;
        let before = commitments.len();
        commitments.retain(|c| c.id != id);
        if commitments.len() == before {
            return Err(TaskaiError::CommitmentNotFound(id.to_string()));
        }
        self.save_commitments(&commitments)?;

        let mut reminders = self.list_reminders()?;
        reminders.retain(|r| r.commitment_id != id);
        self.save_reminders(&reminders)?;
        info!(id, "deleted commitment");
        Ok(())
    }

    /// Move active commitments whose target has passed to `expired` and
    /// cancel their pending reminders. Returns the ids that changed.
    pub fn expire_overdue(&self, now: DateTime<Utc>) -> Result<Vec<String>> {
        let mut commitments = self.list()?;
        let mut expired = Vec::new();
        for c in commitments
            .iter_mut()
            .filter(|c| c.is_active() && c.is_past_target(now))
        {
            c.mark_expired(now)?;
            expired.push(c.id.clone());
        }
        if expired.is_empty() {
            return Ok(expired);
        }

        let ids: Vec<&str> = expired.iter().map(String::as_str).collect();
        let cancelled = self.cancel_pending(&ids)?;
        self.save_commitments(&commitments)?;
        info!(count = expired.len(), cancelled, "expired overdue commitments");
        Ok(expired)
    }

    /// Load the demo data set if the store holds no commitments yet.
    /// Returns the number of commitments added.
    pub fn seed_demo(&self, now: DateTime<Utc>) -> Result<usize> {
        if !self.list()?.is_empty() {
            debug!("store not empty; skipping demo seed");
            return Ok(0);
        }
        let demo = seed::demo_commitments(now);
        self.save_commitments(&demo)?;
        for c in demo.iter().filter(|c| c.status == CommitmentStatus::Active) {
            let drafts = generate_reminders_from_commitment(c, now);
            self.insert_ladder(c, drafts, now)?;
        }
        info!(count = demo.len(), "seeded demo commitments");
        Ok(demo.len())
    }

    // -----------------------------------------------------------------------
    // Reminders
    // -----------------------------------------------------------------------

    pub fn list_reminders(&self) -> Result<Vec<Reminder>> {
        io::read_json_array(&paths::reminders_path(&self.root))
    }

    /// All reminders of one commitment, in stored order.
    pub fn reminders_for(&self, commitment_id: &str) -> Result<Vec<Reminder>> {
        self.get(commitment_id)?;
        Ok(self
            .list_reminders()?
            .into_iter()
            .filter(|r| r.commitment_id == commitment_id)
            .collect())
    }

    /// Add a user reminder, subject to the reminder policy.
    pub fn add_snooze(
        &self,
        commitment_id: &str,
        at: DateTime<Utc>,
        limits: &ReminderLimits,
        now: DateTime<Utc>,
    ) -> Result<Reminder> {
        let commitment = self.get(commitment_id)?;
        let mut reminders = self.list_reminders()?;
        check_new_reminder(&reminders, &commitment, at, ReminderSource::Snooze, limits, now)?;

        let reminder = Reminder::from_draft(
            new_id(),
            ReminderDraft::pending(commitment_id, at, ReminderSource::Snooze),
            now,
        );
        reminders.push(reminder.clone());
        self.save_reminders(&reminders)?;
        info!(commitment_id, reminder_id = %reminder.id, at = %at, "added snooze");
        Ok(reminder)
    }

    /// Move a pending reminder to a new time.
    pub fn reschedule_reminder(
        &self,
        reminder_id: &str,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Reminder> {
        let mut reminders = self.list_reminders()?;
        let current = reminders
            .iter()
            .find(|r| r.id == reminder_id)
            .ok_or_else(|| TaskaiError::ReminderNotFound(reminder_id.to_string()))?;
        if !current.is_pending() {
            return Err(TaskaiError::ReminderRejected(format!(
                "only pending reminders can be moved (reminder is {})",
                current.status
            )));
        }
        let commitment = self.get(&current.commitment_id)?;
        check_reschedule(&reminders, &commitment, reminder_id, at, now)?;

        let reminder = reminders
            .iter_mut()
            .find(|r| r.id == reminder_id)
            .ok_or_else(|| TaskaiError::ReminderNotFound(reminder_id.to_string()))?;
        reminder.scheduled_at = at;
        let moved = reminder.clone();
        self.save_reminders(&reminders)?;
        debug!(reminder_id, at = %at, "rescheduled reminder");
        Ok(moved)
    }

    pub fn delete_reminder(&self, reminder_id: &str) -> Result<()> {
        let mut reminders = self.list_reminders()?;
        let before = reminders.len();
        reminders.retain(|r| r.id != reminder_id);
        if reminders.len() == before {
            return Err(TaskaiError::ReminderNotFound(reminder_id.to_string()));
        }
        self.save_reminders(&reminders)?;
        debug!(reminder_id, "deleted reminder");
        Ok(())
    }

    /// Drop the commitment's pending reminders and rebuild them from its
    /// ladder. Cancelled and other non-pending reminders are kept as history.
    pub fn regenerate_reminders(
        &self,
        commitment_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        let commitment = self.get(commitment_id)?;
        let mut reminders = self.list_reminders()?;
        reminders.retain(|r| !(r.commitment_id == commitment_id && r.is_pending()));
        self.save_reminders(&reminders)?;

        let drafts = generate_reminders_from_commitment(&commitment, now);
        self.insert_ladder(&commitment, drafts, now)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn insert_ladder(
        &self,
        commitment: &Commitment,
        drafts: Vec<ReminderDraft>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        if drafts.is_empty() {
            warn!(id = %commitment.id, "reminder ladder is empty; every rung is in the past");
            return Ok(Vec::new());
        }
        let created: Vec<Reminder> = drafts
            .into_iter()
            .map(|d| Reminder::from_draft(new_id(), d, now))
            .collect();
        let mut reminders = self.list_reminders()?;
        reminders.extend(created.iter().cloned());
        self.save_reminders(&reminders)?;
        debug!(id = %commitment.id, count = created.len(), "stored ladder reminders");
        Ok(created)
    }

    fn cancel_pending(&self, commitment_ids: &[&str]) -> Result<usize> {
        let mut reminders = self.list_reminders()?;
        let cancelled = reminders
            .iter_mut()
            .filter(|r| commitment_ids.contains(&r.commitment_id.as_str()))
            .map(|r| r.cancel())
            .filter(|changed| *changed)
            .count();
        if cancelled > 0 {
            self.save_reminders(&reminders)?;
        }
        Ok(cancelled)
    }

    fn save_commitments(&self, commitments: &[Commitment]) -> Result<()> {
        io::write_json_array(&paths::commitments_path(&self.root), commitments)
    }

    fn save_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        io::write_json_array(&paths::reminders_path(&self.root), reminders)
    }
}

fn find_commitment_mut<'a>(
    commitments: &'a mut [Commitment],
    id: &str,
) -> Result<&'a mut Commitment> {
    commitments
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| TaskaiError::CommitmentNotFound(id.to_string()))
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitmentType, ReminderStatus};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::init(dir.path()).unwrap();
        (dir, store)
    }

    fn passport(store: &Store) -> Commitment {
        store
            .create(
                NewCommitment::new(CommitmentType::Expiration, "Passport")
                    .with_target(now() + days(45)),
                now(),
            )
            .unwrap()
    }

    #[test]
    fn open_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Store::open(dir.path()),
            Err(TaskaiError::NotInitialized)
        ));
        Store::init(dir.path()).unwrap();
        Store::open(dir.path()).unwrap();
    }

    #[test]
    fn init_is_idempotent() {
        let (dir, store) = store();
        passport(&store);
        Store::init(dir.path()).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(paths::config_path(dir.path()).exists());
    }

    #[test]
    fn create_generates_ladder() {
        let (_dir, store) = store();
        let c = passport(&store);
        let reminders = store.reminders_for(&c.id).unwrap();
        let times: Vec<_> = reminders.iter().map(|r| r.scheduled_at).collect();
        assert_eq!(times, vec![now() + days(15), now() + days(38), now() + days(44)]);
        assert!(reminders
            .iter()
            .all(|r| r.is_pending() && r.source == ReminderSource::Ladder));
    }

    #[test]
    fn create_rejects_invalid_draft() {
        let (_dir, store) = store();
        let err = store
            .create(NewCommitment::new(CommitmentType::Deadline, "No date"), now())
            .unwrap_err();
        assert!(matches!(err, TaskaiError::Validation(_)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.get("nope"),
            Err(TaskaiError::CommitmentNotFound(_))
        ));
    }

    #[test]
    fn mark_done_cancels_pending_reminders() {
        let (_dir, store) = store();
        let c = passport(&store);
        let done = store.mark_done(&c.id, now()).unwrap();
        assert_eq!(done.status, CommitmentStatus::Done);

        let reminders = store.reminders_for(&c.id).unwrap();
        assert_eq!(reminders.len(), 3);
        assert!(reminders
            .iter()
            .all(|r| r.status == ReminderStatus::Cancelled));

        assert!(matches!(
            store.mark_done(&c.id, now()),
            Err(TaskaiError::InvalidTransition { .. })
        ));
    }

    /// Swap the reminders file for a directory so the next reminder write fails.
    fn break_reminders_file(dir: &TempDir) {
        let path = paths::reminders_path(dir.path());
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
    }

    #[test]
    fn mark_done_keeps_status_when_reminders_cannot_be_cancelled() {
        let (dir, store) = store();
        let c = passport(&store);
        break_reminders_file(&dir);

        assert!(store.mark_done(&c.id, now()).is_err());
        assert_eq!(store.get(&c.id).unwrap().status, CommitmentStatus::Active);
    }

    #[test]
    fn expire_overdue_keeps_status_when_reminders_cannot_be_cancelled() {
        let (dir, store) = store();
        let c = passport(&store);
        break_reminders_file(&dir);

        assert!(store.expire_overdue(now() + days(46)).is_err());
        assert_eq!(store.get(&c.id).unwrap().status, CommitmentStatus::Active);
    }

    #[test]
    fn delete_cascades_reminders() {
        let (_dir, store) = store();
        let keep = store
            .create(
                NewCommitment::new(CommitmentType::Deadline, "Keep").with_target(now() + days(20)),
                now(),
            )
            .unwrap();
        let gone = passport(&store);
        store.delete(&gone.id).unwrap();

        assert!(store.get(&gone.id).is_err());
        let all = store.list_reminders().unwrap();
        assert!(all.iter().all(|r| r.commitment_id == keep.id));
        assert_eq!(all.len(), 3);
        assert!(matches!(
            store.delete(&gone.id),
            Err(TaskaiError::CommitmentNotFound(_))
        ));
    }

    #[test]
    fn update_target_regenerates_pending_only() {
        let (_dir, store) = store();
        let c = passport(&store);
        let first = store.reminders_for(&c.id).unwrap()[0].id.clone();
        store.delete_reminder(&first).unwrap();

        let updated = store
            .update(
                &c.id,
                CommitmentPatch {
                    target_at: Some(now() + days(200)),
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        assert_eq!(updated.target_at, Some(now() + days(200)));
        assert_eq!(store.reminders_for(&c.id).unwrap().len(), 4);
    }

    #[test]
    fn update_title_keeps_reminders() {
        let (_dir, store) = store();
        let c = passport(&store);
        let before = store.reminders_for(&c.id).unwrap();
        store
            .update(
                &c.id,
                CommitmentPatch {
                    title: Some("Passport (family)".to_string()),
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        assert_eq!(store.reminders_for(&c.id).unwrap(), before);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.update("missing", CommitmentPatch::default(), now()),
            Err(TaskaiError::CommitmentNotFound(_))
        ));
    }

    #[test]
    fn snooze_respects_policy() {
        let (_dir, store) = store();
        let c = passport(&store);
        let limits = ReminderLimits::default();

        // ladder rung on day 15 already occupies that day
        let err = store
            .add_snooze(&c.id, now() + days(15) + Duration::hours(1), &limits, now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Only one reminder per day allowed.");

        let r = store
            .add_snooze(&c.id, now() + days(2), &limits, now())
            .unwrap();
        assert_eq!(r.source, ReminderSource::Snooze);

        // 3 ladder + 1 snooze = 4 pending
        let err = store
            .add_snooze(&c.id, now() + days(3), &limits, now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Maximum 4 reminders allowed.");
    }

    #[test]
    fn reschedule_moves_pending_reminder() {
        let (_dir, store) = store();
        let c = passport(&store);
        let first = store.reminders_for(&c.id).unwrap()[0].clone();
        let moved = store
            .reschedule_reminder(&first.id, now() + days(20), now())
            .unwrap();
        assert_eq!(moved.scheduled_at, now() + days(20));

        assert!(store
            .reschedule_reminder(&first.id, now() + days(60), now())
            .is_err());
        assert!(matches!(
            store.reschedule_reminder("missing", now() + days(20), now()),
            Err(TaskaiError::ReminderNotFound(_))
        ));
    }

    #[test]
    fn expire_overdue_sweeps_past_targets() {
        let (_dir, store) = store();
        let c = passport(&store);
        let later = now() + days(46);
        let expired = store.expire_overdue(later).unwrap();
        assert_eq!(expired, vec![c.id.clone()]);
        assert_eq!(store.get(&c.id).unwrap().status, CommitmentStatus::Expired);
        assert!(store
            .reminders_for(&c.id)
            .unwrap()
            .iter()
            .all(|r| !r.is_pending()));

        assert!(store.expire_overdue(later).unwrap().is_empty());
    }

    #[test]
    fn seed_demo_only_once() {
        let (_dir, store) = store();
        assert_eq!(store.seed_demo(now()).unwrap(), 6);
        assert_eq!(store.seed_demo(now()).unwrap(), 0);

        let reminders = store.list_reminders().unwrap();
        // done and expired demo entries get no ladder
        assert!(reminders.iter().all(|r| r.commitment_id != "demo-3"));
        assert!(reminders.iter().all(|r| r.commitment_id != "demo-4"));
        assert_eq!(
            reminders.iter().filter(|r| r.commitment_id == "demo-1").count(),
            3
        );
    }

    #[test]
    fn records_survive_reopen() {
        let (dir, store) = store();
        let c = passport(&store);
        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.get(&c.id).unwrap(), c);
    }
}
