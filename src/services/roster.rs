// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity roster.
//!
//! Holds every activity and its participant list for the lifetime of the
//! process. Reads share the lock; signups and withdrawals take it
//! exclusively, so each mutation sees and leaves a consistent roster.

use crate::models::Activity;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Seed compiled into the binary, used when no seed file is configured.
const BUILTIN_SEED: &str = include_str!("../../data/activities.json");

/// Activities keyed by name, in seed order.
pub type ActivityCatalog = IndexMap<String, Activity>;

/// Owned, shareable store of activities and their rosters.
#[derive(Debug)]
pub struct ActivityRoster {
    activities: RwLock<ActivityCatalog>,
    enforce_capacity: bool,
}

impl ActivityRoster {
    /// Build a roster from an already-validated catalog.
    pub fn new(activities: ActivityCatalog, enforce_capacity: bool) -> Self {
        Self {
            activities: RwLock::new(activities),
            enforce_capacity,
        }
    }

    /// Load the built-in Mergington High School catalog.
    pub fn builtin(enforce_capacity: bool) -> Result<Self, SeedError> {
        Self::load_from_json(BUILTIN_SEED, enforce_capacity)
    }

    /// Load activities from a JSON seed file.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        enforce_capacity: bool,
    ) -> Result<Self, SeedError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| SeedError::Io(e.to_string()))?;
        Self::load_from_json(&json_data, enforce_capacity)
    }

    /// Load activities from a JSON seed string.
    ///
    /// The document is an object keyed by activity name; key order becomes
    /// the listing order.
    pub fn load_from_json(json_data: &str, enforce_capacity: bool) -> Result<Self, SeedError> {
        let activities: ActivityCatalog =
            serde_json::from_str(json_data).map_err(|e| SeedError::Parse(e.to_string()))?;

        for (name, activity) in &activities {
            if activity.max_participants == 0 {
                return Err(SeedError::InvalidCapacity(name.clone()));
            }

            let mut seen = HashSet::new();
            if let Some(dup) = activity.participants.iter().find(|p| !seen.insert(*p)) {
                return Err(SeedError::DuplicateParticipant {
                    activity: name.clone(),
                    email: dup.clone(),
                });
            }
        }

        tracing::info!(count = activities.len(), "Loaded activities");
        Ok(Self::new(activities, enforce_capacity))
    }

    /// Number of activities in the catalog.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of every activity, in seed order.
    pub fn list_activities(&self) -> ActivityCatalog {
        self.read().clone()
    }

    /// Snapshot of a single activity.
    pub fn get_activity(&self, name: &str) -> Option<Activity> {
        self.read().get(name).cloned()
    }

    /// Add `email` to the end of an activity's roster.
    pub fn enroll(&self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let mut activities = self.write();
        let activity = activities
            .get_mut(activity_name)
            .ok_or(RosterError::ActivityNotFound)?;

        if activity.has_participant(email) {
            return Err(RosterError::AlreadyRegistered);
        }
        if self.enforce_capacity && activity.is_full() {
            return Err(RosterError::ActivityFull);
        }

        activity.participants.push(email.to_string());
        tracing::info!(
            activity = activity_name,
            email,
            count = activity.participants.len(),
            "Participant signed up"
        );

        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Remove `email` from an activity's roster.
    pub fn withdraw(&self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let mut activities = self.write();
        let activity = activities
            .get_mut(activity_name)
            .ok_or(RosterError::ActivityNotFound)?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(RosterError::NotRegistered)?;

        activity.participants.remove(position);
        tracing::info!(
            activity = activity_name,
            email,
            count = activity.participants.len(),
            "Participant unregistered"
        );

        Ok(format!("Unregistered {} from {}", email, activity_name))
    }

    // Mutations never leave the map half-updated, so a poisoned lock is
    // still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, ActivityCatalog> {
        self.activities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ActivityCatalog> {
        self.activities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Errors from roster mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student is already signed up for this activity")]
    AlreadyRegistered,

    #[error("Student is not registered for this activity")]
    NotRegistered,

    #[error("Activity is full")]
    ActivityFull,
}

/// Errors from loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse activities: {0}")]
    Parse(String),

    #[error("Activity {0:?} must allow at least one participant")]
    InvalidCapacity(String),

    #[error("Activity {activity:?} lists {email} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "a@x.edu";

    fn chess_only(max: u32, enforce_capacity: bool) -> ActivityRoster {
        let mut activities = ActivityCatalog::new();
        activities.insert(
            "Chess Club".to_string(),
            Activity {
                description: "Learn strategies and compete in chess tournaments".to_string(),
                schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                max_participants: max,
                participants: vec![],
            },
        );
        ActivityRoster::new(activities, enforce_capacity)
    }

    fn roster_of(roster: &ActivityRoster, name: &str) -> Vec<String> {
        roster.get_activity(name).unwrap().participants
    }

    #[test]
    fn test_chess_club_scenario() {
        let roster = chess_only(12, false);

        assert_eq!(
            roster.enroll("Chess Club", EMAIL).unwrap(),
            "Signed up a@x.edu for Chess Club"
        );
        assert_eq!(roster_of(&roster, "Chess Club").len(), 1);

        assert_eq!(
            roster.enroll("Chess Club", EMAIL),
            Err(RosterError::AlreadyRegistered)
        );
        assert_eq!(roster_of(&roster, "Chess Club").len(), 1);

        assert_eq!(
            roster.withdraw("Chess Club", EMAIL).unwrap(),
            "Unregistered a@x.edu from Chess Club"
        );
        assert!(roster_of(&roster, "Chess Club").is_empty());

        assert_eq!(
            roster.withdraw("Chess Club", EMAIL),
            Err(RosterError::NotRegistered)
        );
    }

    #[test]
    fn test_unknown_activity_leaves_store_unchanged() {
        let roster = chess_only(12, false);
        let before = roster.list_activities();

        assert_eq!(
            roster.enroll("Nonexistent Club", EMAIL),
            Err(RosterError::ActivityNotFound)
        );
        assert_eq!(
            roster.withdraw("Nonexistent Club", EMAIL),
            Err(RosterError::ActivityNotFound)
        );
        assert_eq!(roster.list_activities(), before);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let roster = chess_only(12, false);
        assert_eq!(
            roster.enroll("chess club", EMAIL),
            Err(RosterError::ActivityNotFound)
        );
    }

    #[test]
    fn test_signup_order_preserved_and_withdraw_removes_exact_entry() {
        let roster = chess_only(12, false);
        for email in ["first@x.edu", "second@x.edu", "third@x.edu"] {
            roster.enroll("Chess Club", email).unwrap();
        }

        roster.withdraw("Chess Club", "second@x.edu").unwrap();

        assert_eq!(
            roster_of(&roster, "Chess Club"),
            vec!["first@x.edu", "third@x.edu"]
        );
    }

    #[test]
    fn test_round_trip_restores_prior_state() {
        let roster = ActivityRoster::builtin(false).unwrap();
        let before = roster.list_activities();

        roster.enroll("Debate Team", "newcomer@mergington.edu").unwrap();
        roster.withdraw("Debate Team", "newcomer@mergington.edu").unwrap();

        assert_eq!(roster.list_activities(), before);
    }

    #[test]
    fn test_capacity_is_descriptive_by_default() {
        let roster = chess_only(1, false);
        roster.enroll("Chess Club", "one@x.edu").unwrap();
        roster.enroll("Chess Club", "two@x.edu").unwrap();
        assert_eq!(roster_of(&roster, "Chess Club").len(), 2);
    }

    #[test]
    fn test_capacity_enforced_when_enabled() {
        let roster = chess_only(1, true);
        roster.enroll("Chess Club", "one@x.edu").unwrap();

        assert_eq!(
            roster.enroll("Chess Club", "two@x.edu"),
            Err(RosterError::ActivityFull)
        );
        // A duplicate is reported as such even when the activity is full.
        assert_eq!(
            roster.enroll("Chess Club", "one@x.edu"),
            Err(RosterError::AlreadyRegistered)
        );

        roster.withdraw("Chess Club", "one@x.edu").unwrap();
        roster.enroll("Chess Club", "two@x.edu").unwrap();
    }

    #[test]
    fn test_builtin_seed_order() {
        let roster = ActivityRoster::builtin(false).unwrap();
        let names: Vec<String> = roster.list_activities().into_keys().collect();

        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Chess Club");
        assert_eq!(names[1], "Programming Class");
        assert_eq!(names[8], "Science Olympiad");
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_seed_preserves_document_order() {
        let json = r#"{
            "Zebra Club": {"description": "z", "schedule": "s", "max_participants": 2},
            "Alpha Club": {"description": "a", "schedule": "s", "max_participants": 2}
        }"#;
        let roster = ActivityRoster::load_from_json(json, false).unwrap();
        let names: Vec<String> = roster.list_activities().into_keys().collect();
        assert_eq!(names, vec!["Zebra Club", "Alpha Club"]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_seed_rejects_zero_capacity() {
        let json = r#"{"Empty": {"description": "d", "schedule": "s", "max_participants": 0}}"#;
        let err = ActivityRoster::load_from_json(json, false).unwrap_err();
        assert!(matches!(err, SeedError::InvalidCapacity(name) if name == "Empty"));
    }

    #[test]
    fn test_seed_rejects_duplicate_participant() {
        let json = r#"{"Art Club": {
            "description": "d", "schedule": "s", "max_participants": 5,
            "participants": ["x@mergington.edu", "x@mergington.edu"]
        }}"#;
        let err = ActivityRoster::load_from_json(json, false).unwrap_err();
        assert!(matches!(
            err,
            SeedError::DuplicateParticipant { ref email, .. } if email == "x@mergington.edu"
        ));
    }

    #[test]
    fn test_seed_rejects_malformed_json() {
        let err = ActivityRoster::load_from_json("[1, 2, 3]", false).unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_missing_seed_file() {
        let err = ActivityRoster::load_from_file("does/not/exist.json", false).unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }

    #[test]
    fn test_concurrent_signups_are_all_recorded() {
        let roster = std::sync::Arc::new(chess_only(100, false));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let roster = roster.clone();
                std::thread::spawn(move || {
                    roster
                        .enroll("Chess Club", &format!("student{}@x.edu", i))
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(roster_of(&roster, "Chess Club").len(), 16);
    }
}
