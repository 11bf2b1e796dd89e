//! Three-state vote machine shared by posts and embedded comments.
//!
//! Per (subject, identity) the state is neutral, upvoted, or downvoted,
//! derived from membership in the two vote sets. The machine keeps the
//! counters equal to the set cardinalities by construction; legacy rows
//! written by the old single-field update path may have drifted, which
//! `repair` reconciles before a rewrite.

use serde_json::{Map, Value};

use crate::entry::{Entry, fields};
use crate::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteStanding {
    Neutral,
    Upvoted,
    Downvoted,
}

/// Vote tallies plus the membership sets backing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteState {
    pub upvotes: u64,
    pub downvotes: u64,
    pub upvoted_by: Vec<String>,
    pub downvoted_by: Vec<String>,
}

impl VoteState {
    /// Read the four vote fields off a raw entry, tolerating the legacy
    /// string encodings.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            upvotes: normalize::count(entry.get(fields::UPVOTES)),
            downvotes: normalize::count(entry.get(fields::DOWNVOTES)),
            upvoted_by: normalize::id_set(entry.get(fields::UPVOTED_BY)),
            downvoted_by: normalize::id_set(entry.get(fields::DOWNVOTED_BY)),
        }
    }

    /// The four vote fields as natively typed values, ready for one atomic
    /// update.
    pub fn field_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(fields::UPVOTES.into(), Value::from(self.upvotes));
        map.insert(fields::DOWNVOTES.into(), Value::from(self.downvotes));
        map.insert(
            fields::UPVOTED_BY.into(),
            Value::from(self.upvoted_by.clone()),
        );
        map.insert(
            fields::DOWNVOTED_BY.into(),
            Value::from(self.downvoted_by.clone()),
        );
        map
    }

    pub fn standing(&self, identity: &str) -> VoteStanding {
        if self.upvoted_by.iter().any(|i| i == identity) {
            VoteStanding::Upvoted
        } else if self.downvoted_by.iter().any(|i| i == identity) {
            VoteStanding::Downvoted
        } else {
            VoteStanding::Neutral
        }
    }

    /// Toggle one vote. Same kind again returns to neutral; the opposite
    /// kind switches sides. After every toggle the identity sits in at most
    /// one membership set.
    pub fn toggle(&mut self, kind: VoteKind, identity: &str) -> VoteStanding {
        let standing = self.standing(identity);
        match (kind, standing) {
            (VoteKind::Up, VoteStanding::Upvoted) => {
                Self::leave(&mut self.upvoted_by, &mut self.upvotes, identity);
            }
            (VoteKind::Up, previous) => {
                if previous == VoteStanding::Downvoted {
                    Self::leave(&mut self.downvoted_by, &mut self.downvotes, identity);
                }
                self.upvoted_by.push(identity.to_string());
                self.upvotes += 1;
            }
            (VoteKind::Down, VoteStanding::Downvoted) => {
                Self::leave(&mut self.downvoted_by, &mut self.downvotes, identity);
            }
            (VoteKind::Down, previous) => {
                if previous == VoteStanding::Upvoted {
                    Self::leave(&mut self.upvoted_by, &mut self.upvotes, identity);
                }
                self.downvoted_by.push(identity.to_string());
                self.downvotes += 1;
            }
        }
        self.standing(identity)
    }

    fn leave(set: &mut Vec<String>, counter: &mut u64, identity: &str) {
        set.retain(|i| i != identity);
        *counter = counter.saturating_sub(1);
    }

    /// Reconcile counters with set cardinality. Returns true when anything
    /// changed, so callers can log the drift they inherited from legacy rows.
    pub fn repair(&mut self) -> bool {
        let up = self.upvoted_by.len() as u64;
        let down = self.downvoted_by.len() as u64;
        let drifted = self.upvotes != up || self.downvotes != down;
        self.upvotes = up;
        self.downvotes = down;
        drifted
    }

    pub fn net_score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }

    /// Display form of the net score: `+3`, `0`, `-2`.
    pub fn format_score(&self) -> String {
        let score = self.net_score();
        if score > 0 {
            format!("+{}", score)
        } else {
            score.to_string()
        }
    }
}
