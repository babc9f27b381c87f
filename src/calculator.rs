//! Minimum finishing position that clinches the title over two rivals.
//!
//! Totals are relative: the subject's current tally is taken as 0 and each
//! rival starts `gap` points below it.

use serde::{Deserialize, Serialize};

use crate::points::{points_for, Position};

/// Points each rival trails the subject by before the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gaps {
    pub gap_a: u32,
    pub gap_b: u32,
}

impl Gaps {
    pub const fn new(gap_a: u32, gap_b: u32) -> Self {
        Self { gap_a, gap_b }
    }
}

impl Default for Gaps {
    fn default() -> Self {
        Self::new(12, 16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Worst position that still finishes strictly ahead of both rivals.
    Guaranteed(Position),
    /// Not even a win is enough.
    Unattainable,
}

impl Outcome {
    pub fn position(self) -> Option<Position> {
        match self {
            Outcome::Guaranteed(p) => Some(p),
            Outcome::Unattainable => None,
        }
    }
}

/// A rival's post-race total relative to the subject's current total.
pub fn relative_total(position: Position, gap: u32) -> i64 {
    points_for(position) - i64::from(gap)
}

/// Scans from the zero-points slot up to a win and returns the first position
/// whose points strictly beat both rivals. A tie never counts.
pub fn minimum_position(pos_a: Position, pos_b: Position, gaps: Gaps) -> Outcome {
    let total_a = relative_total(pos_a, gaps.gap_a);
    let total_b = relative_total(pos_b, gaps.gap_b);

    Position::all()
        .rev()
        .find(|&candidate| {
            let subject = points_for(candidate);
            subject > total_a && subject > total_b
        })
        .map_or(Outcome::Unattainable, Outcome::Guaranteed)
}

/// Inputs and intermediate totals of one calculation, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculation {
    pub pos_a: Position,
    pub pos_b: Position,
    pub total_a: i64,
    pub total_b: i64,
    pub outcome: Outcome,
}

pub fn calculate(pos_a: Position, pos_b: Position, gaps: Gaps) -> Calculation {
    let calculation = Calculation {
        pos_a,
        pos_b,
        total_a: relative_total(pos_a, gaps.gap_a),
        total_b: relative_total(pos_b, gaps.gap_b),
        outcome: minimum_position(pos_a, pos_b, gaps),
    };
    tracing::debug!(?calculation, ?gaps, "calculated minimum position");
    calculation
}
