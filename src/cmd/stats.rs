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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::scheduler::Bucket;
use crate::scheduler::Buckets;
use crate::scheduler::SchedulerParams;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::direction::StudyDirection;
use crate::types::stat::DirectionStat;
use crate::types::timestamp::Timestamp;

/// Average success percentage at or above which a card is mastered.
const MASTERED_PERCENT: u32 = 80;

/// Average success percentage below which a card is struggling.
const STRUGGLING_PERCENT: u32 = 40;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text table.
    Table,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Table => write!(f, "table"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Mastery {
    /// Never answered in either direction.
    New,
    Struggling,
    Learning,
    Mastered,
}

impl Mastery {
    /// Classify a card by the average success percentage over both
    /// directions.
    pub fn of(card: &Card) -> Self {
        let stats: Vec<DirectionStat> = StudyDirection::ALL
            .iter()
            .map(|direction| card.stat(*direction))
            .collect();
        if stats.iter().all(|stat| stat.total_count() == 0) {
            return Mastery::New;
        }
        let sum: u32 = stats.iter().map(|stat| stat.success_percent()).sum();
        let n = stats.len() as u32;
        if sum >= MASTERED_PERCENT * n {
            Mastery::Mastered
        } else if sum < STRUGGLING_PERCENT * n {
            Mastery::Struggling
        } else {
            Mastery::Learning
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Mastery::New => "NEW",
            Mastery::Struggling => "RE-STUDY",
            Mastery::Learning => "LEARNING",
            Mastery::Mastered => "MASTERED",
        }
    }
}

pub fn print_stats(
    directory: Option<String>,
    direction: Option<StudyDirection>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let direction = coll.direction(direction);
    let deck = coll.deck()?;
    let report = build_report(&deck, direction, &coll.config.scheduler);
    match format {
        StatsFormat::Table => print!("{}", render_table(&report)),
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    direction: StudyDirection,
    total_cards: usize,
    mastered_count: usize,
    struggling_count: usize,
    pending_count: usize,
    cards: Vec<CardReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardReport {
    id: CardId,
    term: String,
    meaning: String,
    bucket: Bucket,
    mastery: Mastery,
    created_at: Timestamp,
    recognition: DirectionStat,
    production: DirectionStat,
    #[serde(skip)]
    active: DirectionStat,
}

/// Summarize the deck for one direction. Cards are listed weakest first.
pub fn build_report(
    deck: &[Card],
    direction: StudyDirection,
    params: &SchedulerParams,
) -> StatsReport {
    let buckets = Buckets::partition(deck, direction, params);
    let mut cards: Vec<CardReport> = deck
        .iter()
        .map(|card| CardReport {
            id: card.id(),
            term: card.term().to_string(),
            meaning: card.content().meaning.clone(),
            bucket: buckets.bucket_of(card.id()).unwrap_or(Bucket::Medium),
            mastery: Mastery::of(card),
            created_at: card.created_at(),
            recognition: card.stat(StudyDirection::Recognition),
            production: card.stat(StudyDirection::Production),
            active: card.stat(direction),
        })
        .collect();
    cards.sort_by_key(|card| card.active.success_percent());
    let count = |mastery: Mastery| cards.iter().filter(|card| card.mastery == mastery).count();
    StatsReport {
        direction,
        total_cards: deck.len(),
        mastered_count: count(Mastery::Mastered),
        struggling_count: count(Mastery::Struggling),
        pending_count: deck.iter().filter(|card| card.is_pending()).count(),
        cards,
    }
}

fn render_table(report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} cards ({}): {} mastered, {} struggling, {} pending\n",
        report.total_cards,
        report.direction,
        report.mastered_count,
        report.struggling_count,
        report.pending_count
    ));
    if report.cards.is_empty() {
        return out;
    }
    out.push('\n');
    out.push_str(&format!(
        "{:<16} {:<24} {:>9} {:>5} {:<6} {}\n",
        "TERM", "MEANING", "PASS/ALL", "%", "BUCKET", "STATUS"
    ));
    for card in &report.cards {
        let tally = format!("{}/{}", card.active.pass_count(), card.active.total_count());
        out.push_str(&format!(
            "{:<16} {:<24} {:>9} {:>5} {:<6} {}\n",
            card.term,
            card.meaning,
            tally,
            card.active.success_percent(),
            card.bucket.to_string(),
            card.mastery.label()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CardContent;
    use crate::types::card::DirectionalStats;

    fn card(term: &str, recognition: (u32, u32), production: (u32, u32)) -> Card {
        let mut content = CardContent::new(term);
        content.meaning = format!("{term}-meaning");
        let mut stats = DirectionalStats::default();
        stats.set(
            StudyDirection::Recognition,
            DirectionStat::new(recognition.0, recognition.1),
        );
        stats.set(
            StudyDirection::Production,
            DirectionStat::new(production.0, production.1),
        );
        Card::with_stats(content, Timestamp::now(), stats)
    }

    #[test]
    fn test_mastery() {
        assert_eq!(Mastery::of(&card("a", (0, 0), (0, 0))), Mastery::New);
        assert_eq!(Mastery::of(&card("a", (9, 1), (7, 3))), Mastery::Mastered);
        assert_eq!(Mastery::of(&card("a", (9, 1), (0, 0))), Mastery::Learning);
        assert_eq!(Mastery::of(&card("a", (1, 4), (1, 1))), Mastery::Struggling);
        assert_eq!(Mastery::of(&card("a", (2, 3), (3, 2))), Mastery::Learning);
        assert_eq!(Mastery::of(&card("a", (0, 1), (0, 0))), Mastery::Struggling);
    }

    #[test]
    fn test_report_is_sorted_weakest_first() {
        let params = SchedulerParams::default();
        let deck = vec![
            card("strong", (9, 1), (0, 0)),
            card("weak", (1, 9), (9, 1)),
            card("middle", (5, 5), (0, 0)),
        ];
        let report = build_report(&deck, StudyDirection::Recognition, &params);
        let terms: Vec<&str> = report.cards.iter().map(|card| card.term.as_str()).collect();
        assert_eq!(terms, vec!["weak", "middle", "strong"]);
        assert_eq!(report.total_cards, 3);
        assert_eq!(report.mastered_count, 0);

        let report = build_report(&deck, StudyDirection::Production, &params);
        let terms: Vec<&str> = report.cards.iter().map(|card| card.term.as_str()).collect();
        assert_eq!(terms, vec!["strong", "middle", "weak"]);
    }

    #[test]
    fn test_report_counts() {
        let params = SchedulerParams::default();
        let mut pending = CardContent::new("pending");
        pending.meaning = String::new();
        let deck = vec![
            card("a", (20, 0), (20, 0)),
            card("b", (0, 5), (0, 5)),
            card("c", (0, 0), (0, 0)),
            Card::new(pending, Timestamp::now()),
        ];
        let report = build_report(&deck, StudyDirection::Recognition, &params);
        assert_eq!(report.mastered_count, 1);
        assert_eq!(report.struggling_count, 1);
        assert_eq!(report.pending_count, 1);
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let params = SchedulerParams::default();
        let deck = vec![card("猫", (3, 1), (3, 1))];
        let report = build_report(&deck, StudyDirection::Recognition, &params);
        let json: serde_json::Value = serde_json::to_value(&report)?;
        assert_eq!(json["direction"], "recognition");
        assert_eq!(json["totalCards"], 1);
        assert_eq!(json["cards"][0]["term"], "猫");
        assert_eq!(json["cards"][0]["bucket"], "hard");
        assert_eq!(json["cards"][0]["mastery"], "learning");
        assert_eq!(json["cards"][0]["recognition"]["successPercent"], 75);
        assert_eq!(
            json["cards"][0]["createdAt"],
            deck[0].created_at().to_rfc3339()
        );
        assert!(json["cards"][0].get("active").is_none());
        Ok(())
    }

    #[test]
    fn test_render_table() {
        let params = SchedulerParams::default();
        let deck = vec![card("猫", (3, 1), (3, 1))];
        let report = build_report(&deck, StudyDirection::Recognition, &params);
        let table = render_table(&report);
        assert!(table.starts_with("1 cards (recognition): 0 mastered, 0 struggling, 0 pending\n"));
        assert!(table.contains("猫"));
        assert!(table.contains("3/4"));
        assert!(table.contains("LEARNING"));

        let empty = build_report(&[], StudyDirection::Recognition, &params);
        assert_eq!(render_table(&empty).lines().count(), 1);
    }
}
