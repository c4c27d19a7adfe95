//! Mock data generators
//!
//! Ids are sequential and start at 1, per record kind.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::friend::Friend;
use crate::timeline::TimelineEntry;

pub const MIN_AGE: u32 = 15;
pub const MAX_AGE: u32 = 45;

#[derive(Debug)]
pub struct MockData {
    rng: StdRng,
    next_friend_id: u64,
    next_timeline_id: u64,
}

impl MockData {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            next_friend_id: 1,
            next_timeline_id: 1,
        }
    }

    pub fn next_friend(&mut self) -> Friend {
        let id = self.next_friend_id;
        self.next_friend_id += 1;
        Friend {
            id,
            name: format!("friend{}", id),
            age: self.rng.gen_range(MIN_AGE..=MAX_AGE),
        }
    }

    pub fn next_timeline(&mut self) -> TimelineEntry {
        let id = self.next_timeline_id;
        self.next_timeline_id += 1;
        TimelineEntry {
            id,
            desc: format!("timeline{}", id),
            like_count: 0,
        }
    }
}

impl Default for MockData {
    fn default() -> Self {
        Self::new()
    }
}
