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

use tempfile::TempDir;
use tempfile::tempdir;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::CardContent;
use crate::types::timestamp::Timestamp;

/// Create a collection in a temporary directory, seeded with `(term, meaning)`
/// pairs. The directory is deleted when the returned `TempDir` is dropped.
pub fn create_tmp_collection(cards: &[(&str, &str)]) -> Fallible<(TempDir, Collection)> {
    let dir = tempdir()?;
    let mut coll = Collection::new(Some(dir.path().display().to_string()))?;
    for (term, meaning) in cards {
        let mut content = CardContent::new(*term);
        content.meaning = meaning.to_string();
        coll.db.insert_card(&Card::new(content, Timestamp::now()))?;
    }
    Ok((dir, coll))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_collection() -> Fallible<()> {
        let (dir, coll) = create_tmp_collection(&[("猫", "cat"), ("犬", "dog")])?;
        assert_eq!(coll.deck()?.len(), 2);
        assert!(dir.path().exists());
        Ok(())
    }
}
