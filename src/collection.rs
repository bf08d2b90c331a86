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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::Scheduler;
use crate::types::card::Card;
use crate::types::direction::StudyDirection;

pub const DATABASE_FILE_NAME: &str = "tigercards.db";

/// A directory holding a card database and an optional config file.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        let coll = Self {
            directory,
            config,
            db,
        };
        log::debug!("Opened collection at {}.", coll.directory.display());
        Ok(coll)
    }

    /// Read a fresh snapshot of every card.
    pub fn deck(&self) -> Fallible<Vec<Card>> {
        log::debug!("Loading deck...");
        let start = Instant::now();
        let cards = self.db.all_cards()?;
        let duration = start.elapsed().as_millis();
        log::debug!("Loaded {} cards in {duration}ms.", cards.len());
        Ok(cards)
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.config.scheduler)
    }

    /// The direction to study: the one given on the command line, or the
    /// configured default.
    pub fn direction(&self, flag: Option<StudyDirection>) -> StudyDirection {
        flag.unwrap_or(self.config.direction)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert!(coll.deck()?.is_empty());
        assert!(dir.path().join(DATABASE_FILE_NAME).exists());
        assert_eq!(coll.direction(None), StudyDirection::Recognition);
        assert_eq!(
            coll.direction(Some(StudyDirection::Production)),
            StudyDirection::Production
        );
        Ok(())
    }

    #[test]
    fn test_configured_direction() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "direction = \"production\"\n",
        )?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert_eq!(coll.direction(None), StudyDirection::Production);
        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "direction = 3\n")?;
        assert!(Collection::new(Some(dir.path().display().to_string())).is_err());
        Ok(())
    }
}
