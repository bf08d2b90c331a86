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

mod state;
mod template;

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use rand::Rng;

use crate::cmd::drill::state::SessionState;
use crate::cmd::drill::template::answer;
use crate::cmd::drill::template::question;
use crate::cmd::next::make_rng;
use crate::cmd::next::next_card;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::direction::StudyDirection;
use crate::types::stat::Answer;
use crate::types::timestamp::Timestamp;

pub fn drill(
    directory: Option<String>,
    direction: Option<StudyDirection>,
    limit: Option<usize>,
    seed: Option<u64>,
) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let direction = coll.direction(direction);
    let mut rng = make_rng(seed);
    let mut input = stdin().lock();
    let mut output = stdout();
    let session = run_session(
        &mut coll,
        direction,
        limit,
        &mut rng,
        &mut input,
        &mut output,
    )?;
    log::debug!(
        "Session started at {} ended with {} reviews.",
        session.started_at.to_rfc3339(),
        session.answered()
    );
    for review in &session.reviews {
        log::trace!("{} {}", review.card_id.short(), review.answer.as_str());
    }
    Ok(())
}

/// Drill cards until the user quits, input runs out, or `limit` answers have
/// been recorded.
///
/// Every answer is written to the database before the next card is chosen,
/// and the deck is re-read each time, so the scheduler always works from the
/// latest statistics.
pub fn run_session<R: Rng, I: BufRead, O: Write>(
    coll: &mut Collection,
    direction: StudyDirection,
    limit: Option<usize>,
    rng: &mut R,
    input: &mut I,
    output: &mut O,
) -> Fallible<SessionState> {
    let mut session = SessionState::new(Timestamp::now());
    writeln!(output, "Drilling {direction}.")?;
    loop {
        if limit.is_some_and(|limit| session.answered() >= limit) {
            break;
        }
        let Some(card) = next_card(coll, rng, direction, session.last_shown)? else {
            writeln!(output, "No cards found. Add some with `tigercards add`.")?;
            break;
        };
        writeln!(output)?;
        writeln!(output, "Q: {}", question(&card, direction))?;
        writeln!(output, "[press enter to reveal]")?;
        if read_line(input)?.is_none() {
            break;
        }
        writeln!(output, "A: {}", answer(&card, direction))?;
        let Some(grade) = read_answer(input, output)? else {
            break;
        };
        let stat = coll.db.record_answer(card.id(), direction, grade)?;
        session.record(card.id(), grade);
        writeln!(
            output,
            "{}: {}% over {} attempts.",
            grade.as_str(),
            stat.success_percent(),
            stat.total_count()
        )?;
    }
    writeln!(output)?;
    writeln!(
        output,
        "Session completed: {} answered, {} passed.",
        session.answered(),
        session.passed()
    )?;
    Ok(session)
}

/// Read one line. `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until the user passes, fails, or quits. `None` means quit.
fn read_answer<I: BufRead, O: Write>(input: &mut I, output: &mut O) -> Fallible<Option<Answer>> {
    loop {
        writeln!(output, "Answer: (p = pass, f = fail, q = quit)")?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.to_lowercase().as_str() {
            "p" | "pass" => return Ok(Some(Answer::Pass)),
            "f" | "fail" => return Ok(Some(Answer::Fail)),
            "q" | "quit" => return Ok(None),
            _ => writeln!(output, "Invalid input. Please enter p, f, or q.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::types::card_id::CardId;

    fn run(
        coll: &mut Collection,
        limit: Option<usize>,
        script: &str,
    ) -> Fallible<(SessionState, String)> {
        let mut rng = make_rng(Some(1));
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let session = run_session(
            coll,
            StudyDirection::Recognition,
            limit,
            &mut rng,
            &mut input,
            &mut output,
        )?;
        Ok((session, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn test_empty_collection() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[])?;
        let (session, output) = run(&mut coll, None, "")?;
        assert_eq!(session.answered(), 0);
        assert!(output.contains("No cards found."));
        Ok(())
    }

    #[test]
    fn test_session_records_answers() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "dog")])?;
        let (session, output) = run(&mut coll, None, "\np\n\nf\n\nq\n")?;
        assert_eq!(session.answered(), 2);
        assert_eq!(session.passed(), 1);
        assert_ne!(session.reviews[0].card_id, session.reviews[1].card_id);
        assert!(output.contains("Session completed: 2 answered, 1 passed."));

        let deck = coll.deck()?;
        let total: u32 = deck
            .iter()
            .map(|card| card.stat(StudyDirection::Recognition).total_count())
            .sum();
        assert_eq!(total, 2);
        let production: u32 = deck
            .iter()
            .map(|card| card.stat(StudyDirection::Production).total_count())
            .sum();
        assert_eq!(production, 0);
        Ok(())
    }

    #[test]
    fn test_single_card_repeats() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[("猫", "cat")])?;
        let (session, _) = run(&mut coll, None, "\np\n\np\n\np\n")?;
        assert_eq!(session.answered(), 3);
        let deck = coll.deck()?;
        assert_eq!(
            deck[0].stat(StudyDirection::Recognition).success_percent(),
            100
        );
        Ok(())
    }

    #[test]
    fn test_production_skips_pending_cards() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "")])?;
        let mut rng = make_rng(Some(4));
        let mut input = Cursor::new(b"\np\n\np\n\nf\n".to_vec());
        let mut output: Vec<u8> = Vec::new();
        let session = run_session(
            &mut coll,
            StudyDirection::Production,
            None,
            &mut rng,
            &mut input,
            &mut output,
        )?;
        assert_eq!(session.answered(), 3);
        let pending = CardId::for_term("犬");
        assert!(session.reviews.iter().all(|review| review.card_id != pending));
        for card in coll.deck()? {
            let expected = if card.id() == pending { 0 } else { 3 };
            let total = card.stat(StudyDirection::Production).total_count();
            assert_eq!(total, expected);
        }
        Ok(())
    }

    #[test]
    fn test_limit() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "dog")])?;
        let (session, _) = run(&mut coll, Some(1), "\np\n\np\n\np\n")?;
        assert_eq!(session.answered(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_input() -> Fallible<()> {
        let (_dir, mut coll) = create_tmp_collection(&[("猫", "cat")])?;
        let (session, output) = run(&mut coll, None, "\nmaybe\nFAIL\n")?;
        assert_eq!(session.answered(), 1);
        assert_eq!(session.passed(), 0);
        assert!(output.contains("Invalid input."));
        Ok(())
    }
}
