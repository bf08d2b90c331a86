// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Adaptive card selection.
//!
//! Every call partitions the deck into hard, medium and easy buckets from the
//! current statistics, runs a weighted lottery over the buckets, and picks a
//! card uniformly from the winner. Nothing is remembered between calls.

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::direction::StudyDirection;
use crate::types::stat::DirectionStat;

/// How many of the weakest cards make up the hard bucket.
const HARD_BUCKET_SIZE: usize = 10;

/// Minimum success percentage for a card to count as easy.
const EASY_MIN_PERCENT: u32 = 85;

/// Minimum number of attempts before a card can count as easy.
const EASY_MIN_ATTEMPTS: u32 = 20;

/// Probability of drawing from the hard bucket.
const HARD_WEIGHT: f64 = 0.70;

/// Probability of drawing from the medium bucket.
const MEDIUM_WEIGHT: f64 = 0.25;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Hard,
    Medium,
    Easy,
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Hard => write!(f, "hard"),
            Bucket::Medium => write!(f, "medium"),
            Bucket::Easy => write!(f, "easy"),
        }
    }
}

/// Tuning knobs for the scheduler. The defaults give a 70/25/5 lottery over
/// the ten weakest cards, the rest, and the well-learned cards.
#[derive(Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerParams {
    pub hard_bucket_size: usize,
    pub easy_min_percent: u32,
    pub easy_min_attempts: u32,
    pub hard_weight: f64,
    pub medium_weight: f64,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            hard_bucket_size: HARD_BUCKET_SIZE,
            easy_min_percent: EASY_MIN_PERCENT,
            easy_min_attempts: EASY_MIN_ATTEMPTS,
            hard_weight: HARD_WEIGHT,
            medium_weight: MEDIUM_WEIGHT,
        }
    }
}

impl SchedulerParams {
    pub fn validate(&self) -> Fallible<()> {
        if self.hard_bucket_size == 0 {
            return fail("hard_bucket_size must be at least 1.");
        }
        if self.easy_min_percent > 100 {
            return fail("easy_min_percent must be at most 100.");
        }
        for (name, weight) in [
            ("hard_weight", self.hard_weight),
            ("medium_weight", self.medium_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return fail(format!("{name} must be between 0 and 1."));
            }
        }
        if self.hard_weight + self.medium_weight > 1.0 {
            return fail("hard_weight and medium_weight must sum to at most 1.");
        }
        Ok(())
    }

    /// Whether a statistic is both well-learned and backed by enough
    /// attempts to be trusted.
    pub fn is_easy(&self, stat: DirectionStat) -> bool {
        stat.success_percent() >= self.easy_min_percent
            && stat.total_count() >= self.easy_min_attempts
    }
}

/// The deck partitioned into priority tiers for one direction. Each card is
/// in exactly one bucket.
pub struct Buckets<'a> {
    hard: Vec<&'a Card>,
    medium: Vec<&'a Card>,
    easy: Vec<&'a Card>,
}

impl<'a> Buckets<'a> {
    pub fn partition(
        deck: &'a [Card],
        direction: StudyDirection,
        params: &SchedulerParams,
    ) -> Self {
        // `sort_by_key` is stable, so ties keep deck order.
        let mut sorted: Vec<&Card> = deck.iter().collect();
        sorted.sort_by_key(|card| card.stat(direction).success_percent());
        sorted.truncate(params.hard_bucket_size);
        let hard = sorted;

        let hard_ids: HashSet<CardId> = hard.iter().map(|card| card.id()).collect();
        let (easy, medium): (Vec<&Card>, Vec<&Card>) = deck
            .iter()
            .filter(|card| !hard_ids.contains(&card.id()))
            .partition(|card| params.is_easy(card.stat(direction)));

        Self { hard, medium, easy }
    }

    pub fn get(&self, bucket: Bucket) -> &[&'a Card] {
        match bucket {
            Bucket::Hard => &self.hard,
            Bucket::Medium => &self.medium,
            Bucket::Easy => &self.easy,
        }
    }

    pub fn bucket_of(&self, id: CardId) -> Option<Bucket> {
        [Bucket::Hard, Bucket::Medium, Bucket::Easy]
            .into_iter()
            .find(|bucket| self.get(*bucket).iter().any(|card| card.id() == id))
    }

    /// Pick the bucket a roll in [0, 1) lands in, falling through to the next
    /// tier when a bucket is empty. `None` means no bucket is usable and the
    /// whole deck should be drawn from.
    pub fn choose(&self, roll: f64, params: &SchedulerParams) -> Option<Bucket> {
        let hard_cutoff = params.hard_weight;
        let medium_cutoff = params.hard_weight + params.medium_weight;
        if roll < hard_cutoff && !self.hard.is_empty() {
            Some(Bucket::Hard)
        } else if roll < medium_cutoff && !self.medium.is_empty() {
            Some(Bucket::Medium)
        } else if !self.easy.is_empty() {
            Some(Bucket::Easy)
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct Scheduler {
    params: SchedulerParams,
}

impl Scheduler {
    pub fn new(params: SchedulerParams) -> Self {
        Self { params }
    }

    /// Pick the next card to present.
    ///
    /// Returns `None` only for an empty deck. A one-card deck always yields
    /// its card. Otherwise the card with id `exclude` is never returned.
    pub fn select_next<R: Rng>(
        &self,
        rng: &mut R,
        deck: &[Card],
        direction: StudyDirection,
        exclude: Option<CardId>,
    ) -> Option<CardId> {
        match deck {
            [] => return None,
            [only] => return Some(only.id()),
            _ => {}
        }
        let buckets = Buckets::partition(deck, direction, &self.params);
        let roll: f64 = rng.gen_range(0.0..1.0);
        let pool: Vec<&Card> = match buckets.choose(roll, &self.params) {
            Some(bucket) => buckets.get(bucket).to_vec(),
            None => deck.iter().collect(),
        };
        let pool = without(pool, exclude);
        let pool = if pool.is_empty() {
            without(deck.iter().collect(), exclude)
        } else {
            pool
        };
        pool.choose(rng).map(|card| card.id())
    }
}

fn without(pool: Vec<&Card>, exclude: Option<CardId>) -> Vec<&Card> {
    match exclude {
        Some(id) => pool.into_iter().filter(|card| card.id() != id).collect(),
        None => pool,
    }
}
