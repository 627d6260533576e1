//! Die tray
//!
//! The selection state behind the roll controls: die buttons with counts,
//! the notation input, preset buttons and the advantage/disadvantage specials.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::dice::{Die, NotationError, RollExpression};

/// Tray errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrayError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("unknown special roll: {0}")]
    UnknownSpecial(String),

    #[error("nothing to roll")]
    NothingToRoll,

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// A canned notation bound to a preset button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub notation: &'static str,
}

/// Built-in presets, in button order
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "1d20",
        label: "Check",
        notation: "1d20",
    },
    Preset {
        id: "2d6",
        label: "2d6",
        notation: "2d6",
    },
    Preset {
        id: "3d6",
        label: "3d6",
        notation: "3d6",
    },
    Preset {
        id: "4d6",
        label: "Ability",
        notation: "4d6",
    },
    Preset {
        id: "8d6",
        label: "Fireball",
        notation: "8d6",
    },
    Preset {
        id: "all",
        label: "All dice",
        notation: "1d4+1d6+1d8+1d10+1d12+1d20",
    },
];

/// Look up a preset by id
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

/// Rolls that bypass the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Special {
    Advantage,
    Disadvantage,
}

impl Special {
    pub fn expression(self) -> RollExpression {
        match self {
            Special::Advantage => RollExpression::advantage(),
            Special::Disadvantage => RollExpression::disadvantage(),
        }
    }
}

impl FromStr for Special {
    type Err = TrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advantage" => Ok(Special::Advantage),
            "disadvantage" => Ok(Special::Disadvantage),
            other => Err(TrayError::UnknownSpecial(other.to_string())),
        }
    }
}

/// Current tray selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tray {
    counts: BTreeMap<Die, u32>,
    notation: String,
    preset: Option<&'static str>,
}

impl Tray {
    /// Empty tray: no notation, every count zero
    pub fn new() -> Self {
        Self {
            counts: Die::ALL.into_iter().map(|die| (die, 0)).collect(),
            notation: String::new(),
            preset: None,
        }
    }

    /// Click a die button: bump its count and rebuild the notation
    pub fn add_die(&mut self, die: Die) -> u32 {
        let count = self.counts.entry(die).or_insert(0);
        *count += 1;
        let count = *count;
        self.notation = counts_notation(&self.counts);
        self.preset = None;
        count
    }

    pub fn count(&self, die: Die) -> u32 {
        self.counts.get(&die).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<Die, u32> {
        &self.counts
    }

    /// Dice with a nonzero count
    pub fn selected(&self) -> Vec<Die> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&die, _)| die)
            .collect()
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn preset(&self) -> Option<&'static str> {
        self.preset
    }

    /// Type into the notation box; die counts no longer apply
    pub fn set_notation(&mut self, notation: &str) {
        self.reset_counts();
        self.notation = notation.trim().to_string();
        self.preset = None;
    }

    /// Press a preset button
    pub fn load_preset(&mut self, id: &str) -> Result<&'static Preset, TrayError> {
        let preset = find_preset(id).ok_or_else(|| TrayError::UnknownPreset(id.to_string()))?;
        self.reset_counts();
        self.notation = preset.notation.to_string();
        self.preset = Some(preset.id);
        Ok(preset)
    }

    /// Press clear
    pub fn clear(&mut self) {
        self.reset_counts();
        self.notation.clear();
        self.preset = None;
    }

    /// What the roll button would throw
    pub fn expression(&self) -> Result<RollExpression, TrayError> {
        if self.notation.trim().is_empty() {
            return Err(TrayError::NothingToRoll);
        }
        Ok(self.notation.parse()?)
    }

    fn reset_counts(&mut self) {
        for count in self.counts.values_mut() {
            *count = 0;
        }
    }
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}

fn counts_notation(counts: &BTreeMap<Die, u32>) -> String {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(die, count)| format!("{}{}", count, die))
        .collect::<Vec<_>>()
        .join("+")
}
