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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::scheduler::SchedulerParams;
use crate::types::direction::StudyDirection;

pub const CONFIG_FILE_NAME: &str = "tigercards.toml";

/// Collection settings, read from `tigercards.toml`. Every key is optional.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The study direction used when a command doesn't specify one.
    pub direction: StudyDirection,
    pub scheduler: SchedulerParams,
}

impl Config {
    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.scheduler.validate()?;
        Ok(config)
    }

    /// Load the config file in `directory`, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            let content = read_to_string(&path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }
}
