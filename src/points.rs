use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Race points for P1..P10, then the zero-points slot (no sprint, no fastest lap).
const RACE_POINTS: [i64; 11] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1, 0];

/// A finishing position in `1..=11`; 11 stands for "no points / DNF".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    pub const WIN: Position = Position(1);
    pub const LAST_POINTS: Position = Position(10);
    pub const NO_POINTS: Position = Position(11);

    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 11 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Every selectable position, best first.
    pub fn all() -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator {
        (1..=11u8).map(Position)
    }

    pub fn points(self) -> i64 {
        points_for(self)
    }

    pub fn label(self) -> String {
        if self == Self::NO_POINTS {
            "No points / DNF".to_string()
        } else {
            format!("P{}", self.0)
        }
    }

    pub fn points_caption(self) -> String {
        format!("({} pts)", self.points())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<u8> for Position {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Position::new(value).ok_or_else(|| Error::InvalidPosition(value.to_string()))
    }
}

/// Accepts `1`..`11`, `P1`..`P10` and `dnf`, case-insensitively.
impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        if trimmed == "dnf" {
            return Ok(Self::NO_POINTS);
        }

        let digits = trimmed.strip_prefix('p').unwrap_or(trimmed.as_str());
        let value: u8 = digits
            .parse()
            .map_err(|_| Error::InvalidPosition(s.to_string()))?;

        // "P11" is not a real classification; only the bare sentinel is accepted
        if trimmed.starts_with('p') && value == Self::NO_POINTS.0 {
            return Err(Error::InvalidPosition(s.to_string()));
        }

        Position::new(value).ok_or_else(|| Error::InvalidPosition(s.to_string()))
    }
}

/// Championship points awarded for finishing at `position`.
pub fn points_for(position: Position) -> i64 {
    RACE_POINTS[usize::from(position.0) - 1]
}
