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
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// Which way a card is being tested. Statistics are tracked independently
/// for each direction.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudyDirection {
    /// Show the term, recall its meaning.
    #[default]
    Recognition,
    /// Show the meaning, recall the term.
    Production,
}

impl StudyDirection {
    pub const ALL: [StudyDirection; 2] = [StudyDirection::Recognition, StudyDirection::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyDirection::Recognition => "recognition",
            StudyDirection::Production => "production",
        }
    }
}

impl Display for StudyDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for StudyDirection {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "recognition" => Ok(StudyDirection::Recognition),
            "production" => Ok(StudyDirection::Production),
            _ => fail(format!("Invalid study direction: {}", value)),
        }
    }
}

impl ToSql for StudyDirection {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for StudyDirection {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        StudyDirection::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
