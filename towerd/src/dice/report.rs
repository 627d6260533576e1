//! Result presentation
//!
//! What the result overlay shows: the big total (or a natural label) and a
//! detail line with the per-die breakdown.

use serde::{Deserialize, Serialize};

use super::notation::RollMode;
use super::roll::{DieOutcome, RollResult};

pub const NATURAL_20: &str = "Natural 20";
pub const NATURAL_1: &str = "Natural 1";
pub const ADVANTAGE_TAG: &str = "ADV ⬆";
pub const DISADVANTAGE_TAG: &str = "DIS ⬇";

/// A roll as the client displays it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// Canonical notation of what was rolled
    pub notation: String,
    pub mode: RollMode,
    pub total: i64,
    /// Total as text, or a natural label for exactly 1d20
    pub total_text: String,
    /// Breakdown line, tagged in advantage/disadvantage mode
    pub detail: String,
    pub dice: Vec<DieOutcome>,
    pub modifier: i32,
    pub natural_20: bool,
    pub natural_1: bool,
    /// Index into `dice` of the kept d20 for advantage/disadvantage
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kept: Option<usize>,
}

impl From<&RollResult> for RollReport {
    fn from(result: &RollResult) -> Self {
        let expression = result.expression();
        let natural = natural_label(result);

        let total_text = match natural {
            Some(label) => label.to_string(),
            None => result.total().to_string(),
        };

        let breakdown = breakdown(result);
        let detail = match (expression.mode(), natural) {
            (RollMode::Advantage, _) => format!("{} {}", ADVANTAGE_TAG, breakdown),
            (RollMode::Disadvantage, _) => format!("{} {}", DISADVANTAGE_TAG, breakdown),
            (RollMode::Normal, Some(label)) => format!("{} | {}", label, breakdown),
            (RollMode::Normal, None) => breakdown,
        };

        Self {
            notation: expression.to_string(),
            mode: expression.mode(),
            total: result.total(),
            total_text,
            detail,
            dice: result.outcomes().to_vec(),
            modifier: expression.modifier(),
            natural_20: result.is_natural_20(),
            natural_1: result.is_natural_1(),
            kept: result.kept(),
        }
    }
}

impl From<RollResult> for RollReport {
    fn from(result: RollResult) -> Self {
        Self::from(&result)
    }
}

fn natural_label(result: &RollResult) -> Option<&'static str> {
    if result.is_natural_20() {
        Some(NATURAL_20)
    } else if result.is_natural_1() {
        Some(NATURAL_1)
    } else {
        None
    }
}

/// "4 + 1 + 6 + 2" for sums, "17, 4 → 17" for kept rolls
fn breakdown(result: &RollResult) -> String {
    let values: Vec<String> = result
        .outcomes()
        .iter()
        .map(|outcome| outcome.value.to_string())
        .collect();

    if result.kept().is_some() {
        return format!("{} → {}", values.join(", "), result.total());
    }

    let mut line = values.join(" + ");
    let modifier = result.expression().modifier();
    if modifier > 0 {
        line.push_str(&format!(" + {}", modifier));
    } else if modifier < 0 {
        line.push_str(&format!(" - {}", modifier.unsigned_abs()));
    }
    line
}
