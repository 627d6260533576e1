//! Dice notation parsing
//!
//! Parses expressions like "3d6+2", "d20", "1d4+1d6+1d8-1" into a
//! [`RollExpression`]. Terms are joined with `+` or `-`; integer terms
//! collapse into a single modifier.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the count of a single dice term ("100d6" is the largest d6 term)
pub const MAX_DICE_PER_TERM: u32 = 100;

static DICE_TERM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)[dD]([0-9]+)$").unwrap());
static INTEGER_TERM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Notation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("dice notation is empty")]
    Empty,

    #[error("invalid term: {0:?}")]
    InvalidTerm(String),

    #[error("unsupported die: d{0} (expected d4, d6, d8, d10, d12 or d20)")]
    UnsupportedDie(u32),

    #[error("dice count must be at least 1")]
    ZeroCount,

    #[error("too many dice in one term: {count} (max {max})")]
    TooManyDice { count: u32, max: u32 },

    #[error("expression has no dice")]
    NoDice,

    #[error("dice cannot be subtracted: {0:?}")]
    SubtractedDice(String),

    #[error("operator without a term")]
    DanglingOperator,
}

/// A die type available in the tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl Die {
    /// Every die, smallest first
    pub const ALL: [Die; 6] = [Die::D4, Die::D6, Die::D8, Die::D10, Die::D12, Die::D20];

    /// Number of faces
    pub fn faces(self) -> u32 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
        }
    }

    /// Look up a die by face count
    pub fn from_faces(faces: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|die| die.faces() == faces)
    }
}

impl TryFrom<u32> for Die {
    type Error = NotationError;

    fn try_from(faces: u32) -> Result<Self, Self::Error> {
        Self::from_faces(faces).ok_or(NotationError::UnsupportedDie(faces))
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> Self {
        die.faces()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}

/// `count` dice of one type, e.g. 3d6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieSpec {
    pub count: u32,
    pub die: Die,
}

impl DieSpec {
    pub fn new(count: u32, die: Die) -> Self {
        Self { count, die }
    }

    pub fn faces(&self) -> u32 {
        self.die.faces()
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces())
    }
}

/// How the outcomes of a roll become its total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    /// Sum of all dice plus the modifier
    #[default]
    Normal,
    /// Two d20, keep the higher
    Advantage,
    /// Two d20, keep the lower
    Disadvantage,
}

/// A parsed dice roll: ordered dice terms, one modifier and a mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollExpression {
    terms: Vec<DieSpec>,
    modifier: i32,
    mode: RollMode,
}

impl RollExpression {
    /// Build a normal-mode expression from dice terms and a modifier
    pub fn new(terms: Vec<DieSpec>, modifier: i32) -> Result<Self, NotationError> {
        if terms.is_empty() {
            return Err(NotationError::NoDice);
        }
        for term in &terms {
            if term.count == 0 {
                return Err(NotationError::ZeroCount);
            }
            if term.count > MAX_DICE_PER_TERM {
                return Err(NotationError::TooManyDice {
                    count: term.count,
                    max: MAX_DICE_PER_TERM,
                });
            }
        }
        Ok(Self {
            terms,
            modifier,
            mode: RollMode::Normal,
        })
    }

    /// Roll two d20 and keep the higher
    pub fn advantage() -> Self {
        Self::special(RollMode::Advantage)
    }

    /// Roll two d20 and keep the lower
    pub fn disadvantage() -> Self {
        Self::special(RollMode::Disadvantage)
    }

    fn special(mode: RollMode) -> Self {
        Self {
            terms: vec![DieSpec::new(2, Die::D20)],
            modifier: 0,
            mode,
        }
    }

    /// Assemble an expression from per-die counts (zero counts are skipped)
    pub fn from_counts(counts: &BTreeMap<Die, u32>) -> Result<Self, NotationError> {
        let terms = counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&die, &count)| DieSpec::new(count, die))
            .collect();
        Self::new(terms, 0)
    }

    pub fn terms(&self) -> &[DieSpec] {
        &self.terms
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn mode(&self) -> RollMode {
        self.mode
    }

    /// Every individual die in roll order
    pub fn each_die(&self) -> impl Iterator<Item = Die> + '_ {
        self.terms
            .iter()
            .flat_map(|term| std::iter::repeat(term.die).take(term.count as usize))
    }

    /// Total number of dice thrown
    pub fn dice_count(&self) -> u32 {
        self.terms.iter().map(|term| term.count).sum()
    }

    /// True when the expression is exactly 1d20: no other dice, no modifier
    pub fn is_exact_d20(&self) -> bool {
        self.mode == RollMode::Normal
            && self.modifier == 0
            && matches!(self.terms.as_slice(), [DieSpec { count: 1, die: Die::D20 }])
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i64 {
        match self.mode {
            RollMode::Normal => i64::from(self.dice_count()) + i64::from(self.modifier),
            RollMode::Advantage | RollMode::Disadvantage => 1,
        }
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i64 {
        match self.mode {
            RollMode::Normal => {
                let top: i64 = self
                    .terms
                    .iter()
                    .map(|term| i64::from(term.count) * i64::from(term.faces()))
                    .sum();
                top + i64::from(self.modifier)
            }
            RollMode::Advantage | RollMode::Disadvantage => i64::from(Die::D20.faces()),
        }
    }
}

impl FromStr for RollExpression {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for RollExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", term)?;
        }
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)
        } else {
            Ok(())
        }
    }
}

/// Parse a dice notation string like "1d4+1d6+2"
pub fn parse(notation: &str) -> Result<RollExpression, NotationError> {
    let notation = notation.trim();
    if notation.is_empty() {
        return Err(NotationError::Empty);
    }

    // Split into (negated, term) pairs at every operator
    let mut pieces: Vec<(bool, &str)> = Vec::new();
    let mut negated = false;
    let mut start = 0;
    for (pos, c) in notation.char_indices() {
        if c == '+' || c == '-' {
            pieces.push((negated, &notation[start..pos]));
            negated = c == '-';
            start = pos + 1;
        }
    }
    pieces.push((negated, &notation[start..]));

    let mut terms = Vec::new();
    let mut modifier: i32 = 0;

    for (index, (negated, raw)) in pieces.iter().enumerate() {
        let term = raw.trim();

        if term.is_empty() {
            // A sign in front of the first term is allowed ("-1+1d6")
            if index == 0 && pieces.len() > 1 {
                continue;
            }
            return Err(NotationError::DanglingOperator);
        }

        if INTEGER_TERM_REGEX.is_match(term) {
            let value: i32 = term
                .parse()
                .map_err(|_| NotationError::InvalidTerm(term.to_string()))?;
            let signed = if *negated { -value } else { value };
            modifier = modifier
                .checked_add(signed)
                .ok_or_else(|| NotationError::InvalidTerm(term.to_string()))?;
            continue;
        }

        let caps = DICE_TERM_REGEX
            .captures(term)
            .ok_or_else(|| NotationError::InvalidTerm(term.to_string()))?;

        if *negated {
            return Err(NotationError::SubtractedDice(term.to_string()));
        }

        let count_str = &caps[1];
        let count: u32 = if count_str.is_empty() {
            1 // "d6" means "1d6"
        } else {
            // Digits only, so a failed parse means the count overflowed
            count_str.parse().map_err(|_| NotationError::TooManyDice {
                count: u32::MAX,
                max: MAX_DICE_PER_TERM,
            })?
        };

        let faces: u32 = caps[2]
            .parse()
            .map_err(|_| NotationError::InvalidTerm(term.to_string()))?;
        let die = Die::try_from(faces)?;

        terms.push(DieSpec::new(count, die));
    }

    RollExpression::new(terms, modifier)
}
