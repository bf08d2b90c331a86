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

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardContent;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

pub fn add_card(directory: Option<String>, content: CardContent) -> Fallible<()> {
    if content.term.is_empty() {
        return fail("term must not be empty.");
    }
    let mut coll = Collection::new(directory)?;
    let card = Card::new(content, Timestamp::now());
    coll.db.insert_card(&card)?;
    println!("Added {} ({}).", card.term(), card.id().short());
    Ok(())
}

pub fn import_words(directory: Option<String>, path: String) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let summary = import_into(&mut coll, Path::new(&path))?;
    println!(
        "Imported {} cards, skipped {} duplicates.",
        summary.added, summary.skipped
    );
    println!("The collection now has {} cards.", coll.db.card_count()?);
    Ok(())
}

#[derive(Debug, PartialEq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Import a word list, or every `.txt` word list under a directory.
pub fn import_into(coll: &mut Collection, path: &Path) -> Fallible<ImportSummary> {
    if !path.exists() {
        return fail(format!("{} does not exist.", path.display()));
    }
    let files: Vec<PathBuf> = if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                files.push(path.to_path_buf());
            }
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut seen: HashSet<CardId> = coll.db.card_ids()?;
    let mut summary = ImportSummary {
        added: 0,
        skipped: 0,
    };
    let created_at = Timestamp::now();
    for file in files {
        log::debug!("Importing {}", file.display());
        let contents = read_to_string(&file)?;
        for content in contents.lines().filter_map(parse_line) {
            let card = Card::new(content, created_at);
            // Skip terms already in the collection, or repeated in the batch.
            if !seen.insert(card.id()) {
                log::debug!("Skipping duplicate term: {}", card.term());
                summary.skipped += 1;
                continue;
            }
            coll.db.insert_card(&card)?;
            summary.added += 1;
        }
    }
    Ok(summary)
}

/// Parse a word-list line of the form `term[\treading[\tmeaning]]`. Blank
/// lines yield nothing.
fn parse_line(line: &str) -> Option<CardContent> {
    let mut fields = line.split('\t').map(str::trim);
    let term = fields.next().filter(|term| !term.is_empty())?;
    let mut content = CardContent::new(term);
    content.reading = fields.next().unwrap_or_default().to_string();
    content.meaning = fields.next().unwrap_or_default().to_string();
    Some(content)
}
