use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::board::Side;
use crate::error::{EngineError, Result};
use crate::search::{ScoringMode, SearchParams};

/// Contents of `settings.json`. Keys the engine does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub bot: BotSettings,
    pub game: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BotSettings {
    pub is_white_bot: bool,
    pub is_black_bot: bool,
    pub white_bot_level: u32,
    pub black_bot_level: u32,
    pub bot_scoring_type: String,
    /// Fixed move-order seed instead of a clock-derived one.
    pub no_random: bool,
    pub optimization: String,
    pub threads: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            is_white_bot: false,
            is_black_bot: true,
            white_bot_level: 3,
            black_bot_level: 3,
            bot_scoring_type: "NumberAndPotential".to_string(),
            no_random: false,
            optimization: "O1".to_string(),
            threads: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GameSettings {
    pub max_num_turns: u32,
}

impl Default for GameSettings {
    fn default() -> Self { Self { max_num_turns: 120 } }
}

/// `O0` searches exhaustively, `O1` and `O2` enable alpha-beta cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimization {
    O0,
    O1,
    O2,
}

impl Optimization {
    pub fn pruning(self) -> bool { self != Optimization::O0 }
}

impl FromStr for Optimization {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "O0" => Ok(Optimization::O0),
            "O1" => Ok(Optimization::O1),
            "O2" => Ok(Optimization::O2),
            other => Err(EngineError::Configuration(format!("unknown optimization level '{other}'"))),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        // Surface bad strings now rather than at the first bot turn.
        settings.search_params(Side::White)?;
        Ok(settings)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            warn!("settings file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn is_bot(&self, side: Side) -> bool {
        match side {
            Side::White => self.bot.is_white_bot,
            Side::Black => self.bot.is_black_bot,
        }
    }

    pub fn level(&self, side: Side) -> u32 {
        match side {
            Side::White => self.bot.white_bot_level,
            Side::Black => self.bot.black_bot_level,
        }
    }

    pub fn scoring_mode(&self) -> Result<ScoringMode> {
        self.bot.bot_scoring_type.parse()
    }

    pub fn optimization(&self) -> Result<Optimization> {
        self.bot.optimization.parse()
    }

    pub fn seed(&self) -> u64 {
        if self.bot.no_random { 0 } else { clock_seed() }
    }

    /// Search parameters for the bot playing `side`.
    pub fn search_params(&self, side: Side) -> Result<SearchParams> {
        Ok(SearchParams {
            depth: self.level(side),
            mode: self.scoring_mode()?,
            pruning: self.optimization()?.pruning(),
            seed: self.seed(),
            threads: self.bot.threads.max(1),
        })
    }
}

fn clock_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0)
}
