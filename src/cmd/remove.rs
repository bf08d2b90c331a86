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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;

pub fn remove_card(directory: Option<String>, term: String) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let id = CardId::for_term(&term);
    if !coll.db.delete_card(id)? {
        return fail(format!("no card with term {}", term.trim()));
    }
    println!("Removed {}.", term.trim());
    Ok(())
}

/// Delete every card that is still waiting for a meaning.
pub fn prune_pending(directory: Option<String>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let count = coll.db.delete_pending()?;
    log::info!("Pruned {count} pending cards.");
    println!("Removed {count} pending cards.");
    Ok(())
}
