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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::direction::StudyDirection;
use crate::types::stat::DirectionStat;
use crate::types::timestamp::Timestamp;

/// An example sentence, in the term's language and its translation.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Example {
    pub source: String,
    pub target: String,
}

/// The human-readable side of a card.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CardContent {
    /// The term under study.
    pub term: String,
    /// How the term is read (e.g. kana for a kanji term).
    pub reading: String,
    /// The term's meaning. Empty while the card is pending.
    pub meaning: String,
    /// Alternative spellings of the term.
    pub alternatives: Vec<String>,
    pub context_note: Option<String>,
    pub example: Option<Example>,
}

impl CardContent {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into().trim().to_string(),
            ..Default::default()
        }
    }
}

/// Statistics for both study directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DirectionalStats {
    recognition: DirectionStat,
    production: DirectionStat,
}

impl DirectionalStats {
    pub fn get(&self, direction: StudyDirection) -> DirectionStat {
        match direction {
            StudyDirection::Recognition => self.recognition,
            StudyDirection::Production => self.production,
        }
    }

    pub fn set(&mut self, direction: StudyDirection, stat: DirectionStat) {
        match direction {
            StudyDirection::Recognition => self.recognition = stat,
            StudyDirection::Production => self.production = stat,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Card {
    id: CardId,
    content: CardContent,
    created_at: Timestamp,
    stats: DirectionalStats,
}

impl Card {
    /// Create a new card with zero statistics in both directions.
    pub fn new(content: CardContent, created_at: Timestamp) -> Self {
        Self::with_stats(content, created_at, DirectionalStats::default())
    }

    pub fn with_stats(
        content: CardContent,
        created_at: Timestamp,
        stats: DirectionalStats,
    ) -> Self {
        let id = CardId::for_term(&content.term);
        Self {
            id,
            content,
            created_at,
            stats,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn term(&self) -> &str {
        &self.content.term
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn stat(&self, direction: StudyDirection) -> DirectionStat {
        self.stats.get(direction)
    }

    /// A card is pending until it has a meaning.
    pub fn is_pending(&self) -> bool {
        self.content.meaning.trim().is_empty()
    }

    /// The text shown before the answer is revealed.
    pub fn prompt(&self, direction: StudyDirection) -> &str {
        match direction {
            StudyDirection::Recognition => &self.content.term,
            StudyDirection::Production => &self.content.meaning,
        }
    }

    /// Whether the card can be asked in this direction. Pending cards have
    /// nothing to prompt with in production.
    pub fn is_drillable(&self, direction: StudyDirection) -> bool {
        !self.prompt(direction).trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_has_zero_stats() {
        let card = Card::new(CardContent::new("猫"), Timestamp::now());
        for direction in StudyDirection::ALL {
            assert_eq!(card.stat(direction), DirectionStat::default());
        }
        assert!(card.is_pending());
    }

    #[test]
    fn test_directions_are_independent() {
        let mut stats = DirectionalStats::default();
        stats.set(StudyDirection::Production, DirectionStat::new(1, 1));
        let card = Card::with_stats(CardContent::new("猫"), Timestamp::now(), stats);
        let production = card.stat(StudyDirection::Production);
        assert_eq!(production.total_count(), 2);
        assert_eq!(production.success_percent(), 50);
        assert_eq!(
            card.stat(StudyDirection::Recognition),
            DirectionStat::default()
        );
    }

    #[test]
    fn test_id_follows_term() {
        let card = Card::new(CardContent::new(" 猫 "), Timestamp::now());
        assert_eq!(card.term(), "猫");
        assert_eq!(card.id(), CardId::for_term("猫"));
    }

    #[test]
    fn test_prompt() {
        let mut content = CardContent::new("猫");
        content.meaning = "cat".to_string();
        let card = Card::new(content, Timestamp::now());
        assert!(!card.is_pending());
        assert_eq!(card.prompt(StudyDirection::Recognition), "猫");
        assert_eq!(card.prompt(StudyDirection::Production), "cat");
    }

    #[test]
    fn test_pending_is_not_drillable_in_production() {
        let pending = Card::new(CardContent::new("犬"), Timestamp::now());
        assert!(pending.is_drillable(StudyDirection::Recognition));
        assert!(!pending.is_drillable(StudyDirection::Production));
    }
}
