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

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collection::Collection;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::direction::StudyDirection;

/// A fixed seed makes the scheduler's choices reproducible.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn print_next(
    directory: Option<String>,
    direction: Option<StudyDirection>,
    exclude: Option<String>,
    seed: Option<u64>,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let direction = coll.direction(direction);
    let exclude = exclude.map(|term| CardId::for_term(&term));
    let mut rng = make_rng(seed);
    match next_card(&coll, &mut rng, direction, exclude)? {
        Some(card) => {
            let stat = card.stat(direction);
            println!(
                "{}\t{}\t{}%\t{}",
                card.id().short(),
                card.term(),
                stat.success_percent(),
                stat.total_count()
            );
        }
        None => println!("No cards found."),
    }
    Ok(())
}

/// Read a fresh deck and ask the scheduler for the next card. Cards that
/// cannot be asked in `direction` are left out.
pub fn next_card<R: Rng>(
    coll: &Collection,
    rng: &mut R,
    direction: StudyDirection,
    exclude: Option<CardId>,
) -> Fallible<Option<Card>> {
    let deck: Vec<Card> = coll
        .deck()?
        .into_iter()
        .filter(|card| card.is_drillable(direction))
        .collect();
    let Some(id) = coll.scheduler().select_next(rng, &deck, direction, exclude) else {
        return Ok(None);
    };
    let card = deck
        .into_iter()
        .find(|card| card.id() == id)
        .ok_or_else(|| ErrorReport::new("scheduler returned a card outside the deck"))?;
    Ok(Some(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_next_card_empty() -> Fallible<()> {
        let (_dir, coll) = create_tmp_collection(&[])?;
        let mut rng = make_rng(Some(0));
        assert!(next_card(&coll, &mut rng, StudyDirection::Recognition, None)?.is_none());
        Ok(())
    }

    #[test]
    fn test_next_card_excludes() -> Fallible<()> {
        let (_dir, coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "dog")])?;
        let mut rng = make_rng(Some(0));
        for _ in 0..20 {
            let card = next_card(
                &coll,
                &mut rng,
                StudyDirection::Production,
                Some(CardId::for_term("猫")),
            )?;
            assert_eq!(
                card.map(|card| card.term().to_string()),
                Some("犬".to_string())
            );
        }
        Ok(())
    }

    #[test]
    fn test_pending_cards_skipped_in_production() -> Fallible<()> {
        let (_dir, coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "")])?;
        let mut rng = make_rng(Some(2));
        let mut terms = Vec::new();
        for _ in 0..20 {
            let card = next_card(&coll, &mut rng, StudyDirection::Production, None)?;
            terms.extend(card.map(|card| card.term().to_string()));
        }
        assert_eq!(terms.len(), 20);
        assert!(terms.iter().all(|term| term == "猫"));

        let (_pending_dir, pending) = create_tmp_collection(&[("犬", "")])?;
        let card = next_card(&pending, &mut rng, StudyDirection::Production, None)?;
        assert!(card.is_none());
        let card = next_card(&pending, &mut rng, StudyDirection::Recognition, None)?;
        assert_eq!(card.map(|card| card.id()), Some(CardId::for_term("犬")));
        Ok(())
    }

    #[test]
    fn test_seeded_rng_is_reproducible() -> Fallible<()> {
        let pairs: Vec<(String, String)> = (0..30)
            .map(|i| (format!("word{i}"), format!("meaning{i}")))
            .collect();
        let pairs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(term, meaning)| (term.as_str(), meaning.as_str()))
            .collect();
        let (_dir, coll) = create_tmp_collection(&pairs)?;
        let draw = |seed: u64| -> Fallible<Vec<CardId>> {
            let mut rng = make_rng(Some(seed));
            let mut ids = Vec::new();
            for _ in 0..10 {
                if let Some(card) = next_card(&coll, &mut rng, StudyDirection::Recognition, None)? {
                    ids.push(card.id());
                }
            }
            Ok(ids)
        };
        assert_eq!(draw(5)?, draw(5)?);
        Ok(())
    }
}
