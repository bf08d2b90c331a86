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

use crate::types::card::Card;
use crate::types::direction::StudyDirection;

/// The question side of a card.
pub fn question(card: &Card, direction: StudyDirection) -> String {
    card.prompt(direction).to_string()
}

/// The answer side of a card, one line per field that is present.
pub fn answer(card: &Card, direction: StudyDirection) -> String {
    let content = card.content();
    let mut lines: Vec<String> = Vec::new();
    match direction {
        StudyDirection::Recognition => {
            if !content.reading.is_empty() {
                lines.push(content.reading.clone());
            }
            lines.push(content.meaning.clone());
        }
        StudyDirection::Production => {
            if content.reading.is_empty() {
                lines.push(content.term.clone());
            } else {
                lines.push(format!("{} ({})", content.term, content.reading));
            }
        }
    }
    if !content.alternatives.is_empty() {
        lines.push(format!("Also written: {}", content.alternatives.join(", ")));
    }
    if let Some(note) = &content.context_note {
        lines.push(format!("Note: {note}"));
    }
    if let Some(example) = &content.example {
        lines.push(format!("Example: {} / {}", example.source, example.target));
    }
    lines.join("\n")
}
