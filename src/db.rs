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

use std::collections::HashMap;
use std::collections::HashSet;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardContent;
use crate::types::card::DirectionalStats;
use crate::types::card::Example;
use crate::types::card_id::CardId;
use crate::types::direction::StudyDirection;
use crate::types::stat::Answer;
use crate::types::stat::DirectionStat;
use crate::types::timestamp::Timestamp;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Fallible<Self> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Return the set of all card IDs in the database.
    pub fn card_ids(&self) -> Fallible<HashSet<CardId>> {
        let mut ids = HashSet::new();
        let mut stmt = self.conn.prepare("select card_id from cards;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: CardId = row.get(0)?;
            ids.insert(id);
        }
        Ok(ids)
    }

    pub fn card_count(&self) -> Fallible<usize> {
        let sql = "select count(*) from cards;";
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a new card, along with its statistics for both directions.
    ///
    /// If a card with the same ID exists, returns an error.
    pub fn insert_card(&mut self, card: &Card) -> Fallible<()> {
        log::debug!("Adding new card: {} ({})", card.term(), card.id().short());
        let tx = self.conn.transaction()?;
        if card_exists(&tx, card.id())? {
            return fail(format!("card already exists: {}", card.term()));
        }
        let content = card.content();
        let alternatives: String = serde_json::to_string(&content.alternatives)?;
        let example: Option<String> = match &content.example {
            Some(example) => Some(serde_json::to_string(example)?),
            None => None,
        };
        let sql = "insert into cards (card_id, term, reading, meaning, alternatives, context_note, example, created_at) values (?, ?, ?, ?, ?, ?, ?, ?);";
        tx.execute(
            sql,
            (
                card.id(),
                &content.term,
                &content.reading,
                &content.meaning,
                alternatives,
                &content.context_note,
                example,
                card.created_at(),
            ),
        )?;
        for direction in StudyDirection::ALL {
            upsert_stat(&tx, card.id(), direction, card.stat(direction))?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Read every card, newest first.
    ///
    /// Cards that are missing statistics for a direction get the zero record.
    pub fn all_cards(&self) -> Fallible<Vec<Card>> {
        let mut stats: HashMap<CardId, DirectionalStats> = HashMap::new();
        {
            let sql = "select card_id, direction, pass_count, fail_count from direction_stats;";
            let mut stmt = self.conn.prepare(sql)?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let id: CardId = row.get(0)?;
                let direction: StudyDirection = row.get(1)?;
                let stat = DirectionStat::new(row.get(2)?, row.get(3)?);
                stats.entry(id).or_default().set(direction, stat);
            }
        }

        let mut cards = Vec::new();
        let sql = "select card_id, term, reading, meaning, alternatives, context_note, example, created_at from cards order by rowid;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: CardId = row.get(0)?;
            let alternatives: String = row.get(4)?;
            let example: Option<String> = row.get(6)?;
            let content = CardContent {
                term: row.get(1)?,
                reading: row.get(2)?,
                meaning: row.get(3)?,
                alternatives: serde_json::from_str(&alternatives)?,
                context_note: row.get(5)?,
                example: match example {
                    Some(example) => Some(serde_json::from_str::<Example>(&example)?),
                    None => None,
                },
            };
            let created_at: Timestamp = row.get(7)?;
            let card_stats = stats.remove(&id).unwrap_or_default();
            cards.push(Card::with_stats(content, created_at, card_stats));
        }
        // Stable, so cards added together keep their insertion order.
        cards.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(cards)
    }

    /// Record an answer for a card in one direction, and return the updated
    /// statistics. The read and the write happen in one transaction.
    ///
    /// If no card with the given ID exists, returns an error.
    pub fn record_answer(
        &mut self,
        card_id: CardId,
        direction: StudyDirection,
        answer: Answer,
    ) -> Fallible<DirectionStat> {
        let tx = self.conn.transaction()?;
        if !card_exists(&tx, card_id)? {
            return fail(format!("no card with id {card_id}"));
        }
        let sql = "select pass_count, fail_count from direction_stats where card_id = ? and direction = ?;";
        let current: Option<DirectionStat> = tx
            .query_row(sql, (card_id, direction), |row| {
                Ok(DirectionStat::new(row.get(0)?, row.get(1)?))
            })
            .optional()?;
        let mut stat = current.unwrap_or_default();
        stat.record(answer);
        upsert_stat(&tx, card_id, direction, stat)?;
        tx.commit()?;
        log::debug!(
            "{} {} {}: {}/{} ({}%)",
            card_id.short(),
            direction,
            answer.as_str(),
            stat.pass_count(),
            stat.total_count(),
            stat.success_percent()
        );
        Ok(stat)
    }

    /// Delete a card and its statistics. Returns whether a card was deleted.
    pub fn delete_card(&mut self, card_id: CardId) -> Fallible<bool> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("delete from cards where card_id = ?;", [card_id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    /// Delete every card that has no meaning yet. Returns how many were
    /// deleted.
    pub fn delete_pending(&mut self) -> Fallible<usize> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("delete from cards where trim(meaning) = '';", [])?;
        tx.commit()?;
        Ok(deleted)
    }
}

fn card_exists(tx: &Transaction, card_id: CardId) -> Fallible<bool> {
    let sql = "select count(*) from cards where card_id = ?;";
    let count: i64 = tx.query_row(sql, [card_id], |row| row.get(0))?;
    Ok(count > 0)
}

fn upsert_stat(
    tx: &Transaction,
    card_id: CardId,
    direction: StudyDirection,
    stat: DirectionStat,
) -> Fallible<()> {
    let sql = "insert into direction_stats (card_id, direction, pass_count, fail_count) values (?, ?, ?, ?) on conflict (card_id, direction) do update set pass_count = excluded.pass_count, fail_count = excluded.fail_count;";
    tx.execute(
        sql,
        (card_id, direction, stat.pass_count(), stat.fail_count()),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
