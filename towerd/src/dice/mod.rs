//! Dice notation evaluator
//!
//! - Notation parsing (e.g., "3d6+2", "1d4+1d6+1d8")
//! - Rolling with uniform outcomes per die
//! - Advantage/disadvantage (two d20, keep higher/lower)
//! - Natural 20 / natural 1 detection and result presentation

mod notation;
mod report;
mod roll;

pub use notation::{parse, Die, DieSpec, NotationError, RollExpression, RollMode, MAX_DICE_PER_TERM};
pub use report::{RollReport, ADVANTAGE_TAG, DISADVANTAGE_TAG, NATURAL_1, NATURAL_20};
pub use roll::{DieOutcome, RollError, RollResult};
