// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Extracurricular activity model for the roster and API.

use serde::{Deserialize, Serialize};

/// An activity with its descriptive metadata and current roster.
///
/// This is both the seed document entry and the API representation, so
/// `participants` may be omitted in seed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Short description shown on the activity card
    pub description: String,
    /// Free-form meeting schedule (e.g. "Fridays, 3:30 PM - 5:00 PM")
    pub schedule: String,
    /// Advertised capacity
    pub max_participants: u32,
    /// Participant emails in signup order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Whether `email` is on the roster.
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Remaining places, saturating at zero when over-subscribed.
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }

    /// Whether the roster has reached `max_participants`.
    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}
