//! Dice rolling
//!
//! Turns a [`RollExpression`] into a [`RollResult`]. Outcomes are drawn
//! uniformly from `1..=faces`, or supplied by the caller via
//! [`RollExpression::resolve`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::notation::{Die, RollExpression, RollMode};

/// Errors from resolving caller-supplied outcomes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("expected {expected} outcomes, got {actual}")]
    OutcomeCount { expected: usize, actual: usize },

    #[error("outcome {value} is not a face of a {die}")]
    OutcomeOutOfRange { die: Die, value: u32 },
}

/// One die and the face it landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieOutcome {
    pub die: Die,
    pub value: u32,
}

/// The outcome of rolling an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    expression: RollExpression,
    outcomes: Vec<DieOutcome>,
    total: i64,
    /// Index of the kept outcome in advantage/disadvantage mode
    kept: Option<usize>,
}

impl RollResult {
    pub fn expression(&self) -> &RollExpression {
        &self.expression
    }

    pub fn outcomes(&self) -> &[DieOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn kept(&self) -> Option<usize> {
        self.kept
    }

    /// Exactly 1d20 that landed on 20
    pub fn is_natural_20(&self) -> bool {
        self.exact_d20() == Some(20)
    }

    /// Exactly 1d20 that landed on 1
    pub fn is_natural_1(&self) -> bool {
        self.exact_d20() == Some(1)
    }

    pub fn is_advantage(&self) -> bool {
        self.expression.mode() == RollMode::Advantage
    }

    pub fn is_disadvantage(&self) -> bool {
        self.expression.mode() == RollMode::Disadvantage
    }

    fn exact_d20(&self) -> Option<u32> {
        if self.expression.is_exact_d20() {
            self.outcomes.first().map(|outcome| outcome.value)
        } else {
            None
        }
    }
}

impl RollExpression {
    /// Roll with the thread-local RNG
    pub fn roll(&self) -> RollResult {
        self.roll_with(&mut rand::rng())
    }

    /// Roll with the given RNG
    pub fn roll_with<R: Rng>(&self, rng: &mut R) -> RollResult {
        let outcomes = self
            .each_die()
            .map(|die| DieOutcome {
                die,
                value: rng.random_range(1..=die.faces()),
            })
            .collect();
        self.evaluate(outcomes)
    }

    /// Evaluate with known outcomes, one per die in roll order
    pub fn resolve(&self, values: &[u32]) -> Result<RollResult, RollError> {
        let expected = self.dice_count() as usize;
        if values.len() != expected {
            return Err(RollError::OutcomeCount {
                expected,
                actual: values.len(),
            });
        }

        let outcomes = self
            .each_die()
            .zip(values)
            .map(|(die, &value)| {
                if (1..=die.faces()).contains(&value) {
                    Ok(DieOutcome { die, value })
                } else {
                    Err(RollError::OutcomeOutOfRange { die, value })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.evaluate(outcomes))
    }

    fn evaluate(&self, outcomes: Vec<DieOutcome>) -> RollResult {
        let (total, kept) = match self.mode() {
            RollMode::Normal => {
                let sum: i64 = outcomes.iter().map(|o| i64::from(o.value)).sum();
                (sum + i64::from(self.modifier()), None)
            }
            RollMode::Advantage => keep_by(&outcomes, |candidate, best| candidate > best),
            RollMode::Disadvantage => keep_by(&outcomes, |candidate, best| candidate < best),
        };

        RollResult {
            expression: self.clone(),
            outcomes,
            total,
            kept,
        }
    }
}

/// Pick one outcome; ties keep the earlier die
fn keep_by(outcomes: &[DieOutcome], better: impl Fn(u32, u32) -> bool) -> (i64, Option<usize>) {
    let mut kept: Option<usize> = None;
    for (index, outcome) in outcomes.iter().enumerate() {
        match kept {
            Some(best) if !better(outcome.value, outcomes[best].value) => {}
            _ => kept = Some(index),
        }
    }
    let total = kept.map_or(0, |index| i64::from(outcomes[index].value));
    (total, kept)
}
