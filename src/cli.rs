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

use clap::Parser;

use crate::cmd::add::add_card;
use crate::cmd::add::import_words;
use crate::cmd::drill::drill;
use crate::cmd::next::print_next;
use crate::cmd::remove::prune_pending;
use crate::cmd::remove::remove_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::types::card::CardContent;
use crate::types::card::Example;
use crate::types::direction::StudyDirection;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill cards in the terminal.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which way to test the cards. By default, the configured direction is used.
        #[arg(long)]
        direction: Option<StudyDirection>,
        /// Stop after this many answers. By default, drill until quitting.
        #[arg(long)]
        limit: Option<usize>,
        /// Seed for the card picker, for reproducible sessions.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the card that would be presented next.
    Next {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        direction: Option<StudyDirection>,
        /// The term of the card shown last, which will not be picked again.
        #[arg(long)]
        exclude: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Add a single card.
    Add {
        /// The term to study.
        term: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        #[arg(long, default_value = "")]
        reading: String,
        #[arg(long, default_value = "")]
        meaning: String,
        /// A usage note.
        #[arg(long)]
        note: Option<String>,
        /// An alternative spelling. May be repeated.
        #[arg(long = "alternative")]
        alternatives: Vec<String>,
        /// An example sentence using the term.
        #[arg(long, requires = "example_target")]
        example_source: Option<String>,
        /// The example sentence's translation.
        #[arg(long, requires = "example_source")]
        example_target: Option<String>,
    },
    /// Import a word list, or every `.txt` word list under a directory.
    ///
    /// Each non-empty line is one card: `term`, optionally followed by a tab
    /// and the reading, and another tab and the meaning.
    Import {
        /// The file or directory to import.
        path: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Remove a card.
    Remove {
        /// The term of the card to remove.
        term: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Remove every card that has no meaning yet.
    Prune {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        direction: Option<StudyDirection>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Table)]
        format: StatsFormat,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            direction,
            limit,
            seed,
        } => drill(directory, direction, limit, seed),
        Command::Next {
            directory,
            direction,
            exclude,
            seed,
        } => print_next(directory, direction, exclude, seed),
        Command::Add {
            term,
            directory,
            reading,
            meaning,
            note,
            alternatives,
            example_source,
            example_target,
        } => {
            let example = match (example_source, example_target) {
                (Some(source), Some(target)) => Some(Example { source, target }),
                _ => None,
            };
            let content = CardContent {
                reading,
                meaning,
                alternatives,
                context_note: note,
                example,
                ..CardContent::new(term)
            };
            add_card(directory, content)
        }
        Command::Import { path, directory } => import_words(directory, path),
        Command::Remove { term, directory } => remove_card(directory, term),
        Command::Prune { directory } => prune_pending(directory),
        Command::Stats {
            directory,
            direction,
            format,
        } => print_stats(directory, direction, format),
    }
}
