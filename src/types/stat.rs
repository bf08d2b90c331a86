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

use serde::Serialize;

/// The outcome of a single answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Answer {
    Pass,
    Fail,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Pass => "pass",
            Answer::Fail => "fail",
        }
    }
}

/// Performance counters for one card in one study direction.
///
/// Only the two counters are stored. The total and the success percentage
/// are derived on every read, so they always agree with the counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DirectionStat {
    pass_count: u32,
    fail_count: u32,
}

impl DirectionStat {
    pub fn new(pass_count: u32, fail_count: u32) -> Self {
        Self {
            pass_count,
            fail_count,
        }
    }

    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }

    pub fn fail_count(&self) -> u32 {
        self.fail_count
    }

    /// Saturates at `u32::MAX`.
    pub fn total_count(&self) -> u32 {
        self.pass_count.saturating_add(self.fail_count)
    }

    /// The pass rate as an integer percentage, rounded half up. Zero if the
    /// card has never been answered in this direction.
    pub fn success_percent(&self) -> u32 {
        let total = self.pass_count as u64 + self.fail_count as u64;
        if total == 0 {
            return 0;
        }
        let pass = self.pass_count as u64;
        ((pass * 100 + total / 2) / total) as u32
    }

    /// Record one answer. Counters stop at `u32::MAX`.
    pub fn record(&mut self, answer: Answer) {
        match answer {
            Answer::Pass => self.pass_count = self.pass_count.saturating_add(1),
            Answer::Fail => self.fail_count = self.fail_count.saturating_add(1),
        }
    }
}

impl Serialize for DirectionStat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("DirectionStat", 4)?;
        s.serialize_field("passCount", &self.pass_count)?;
        s.serialize_field("failCount", &self.fail_count)?;
        s.serialize_field("totalCount", &self.total_count())?;
        s.serialize_field("successPercent", &self.success_percent())?;
        s.end()
    }
}
