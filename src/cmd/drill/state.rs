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

use crate::types::card_id::CardId;
use crate::types::stat::Answer;
use crate::types::timestamp::Timestamp;

/// What a drill session remembers between cards. The scheduler itself is
/// stateless; only the last card shown is fed back to it.
pub struct SessionState {
    pub started_at: Timestamp,
    pub last_shown: Option<CardId>,
    pub reviews: Vec<Review>,
}

pub struct Review {
    pub card_id: CardId,
    pub answer: Answer,
}

impl SessionState {
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            started_at,
            last_shown: None,
            reviews: Vec::new(),
        }
    }

    pub fn record(&mut self, card_id: CardId, answer: Answer) {
        self.last_shown = Some(card_id);
        self.reviews.push(Review { card_id, answer });
    }

    pub fn answered(&self) -> usize {
        self.reviews.len()
    }

    pub fn passed(&self) -> usize {
        self.reviews
            .iter()
            .filter(|review| review.answer == Answer::Pass)
            .count()
    }
}
