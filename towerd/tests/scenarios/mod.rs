//! Scenario Tests for the dice tower
//!
//! - Rolls: presets, die buttons and typed notation land in range
//! - Specials: advantage/disadvantage keep the right d20
//! - Tray: die counts, presets and clear
//! - History: one entry per completed roll

pub mod tray;
