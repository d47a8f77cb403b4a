//! The ordered cell row and its rotations.
//!
//! A [`CellRow`] owns the sequence that the original demo kept implicitly in
//! the UI tree. Rotations are total: rows of length 0 or 1 are returned
//! unchanged, and no rotation can fail.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Values of the reference row: five cells labeled "1" through "5".
pub const DEFAULT_CELLS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Direction of a single-position rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// An ordered row of string cell values.
///
/// Position is the only identity a cell has: index 0 is the leftmost cell.
/// Rotations permute positions; the multiset of values never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRow {
    cells: Vec<String>,
    /// The values the row was constructed with, kept for [`CellRow::reset`].
    initial: Vec<String>,
}

impl CellRow {
    /// Create a row from values in left-to-right order.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = values.into_iter().map(Into::into).collect();
        Self {
            initial: cells.clone(),
            cells,
        }
    }

    /// Rotate one position leftward: `[v0, v1, .., vN-1]` -> `[v1, .., vN-1, v0]`.
    pub fn rotate_left(&mut self) {
        if self.cells.len() > 1 {
            self.cells.rotate_left(1);
        }
    }

    /// Rotate one position rightward: `[v0, .., vN-2, vN-1]` -> `[vN-1, v0, .., vN-2]`.
    pub fn rotate_right(&mut self) {
        if self.cells.len() > 1 {
            self.cells.rotate_right(1);
        }
    }

    /// Apply one rotation in the given direction.
    pub fn rotate(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.rotate_left(),
            Direction::Right => self.rotate_right(),
        }
    }

    /// Restore the values the row was constructed with.
    pub fn reset(&mut self) {
        self.cells.clone_from(&self.initial);
    }

    /// Current values in positional (left-to-right) order.
    pub fn values(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for CellRow {
    /// The reference row: `["1", "2", "3", "4", "5"]`.
    fn default() -> Self {
        Self::new(DEFAULT_CELLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> CellRow {
        CellRow::new(values.iter().copied())
    }

    #[test]
    fn test_default_row() {
        let row = CellRow::default();
        assert_eq!(row.values(), ["1", "2", "3", "4", "5"]);
        assert_eq!(row.len(), 5);
    }

    #[test]
    fn test_single_left_rotation() {
        let mut row = CellRow::default();
        row.rotate_left();
        assert_eq!(row.values(), ["2", "3", "4", "5", "1"]);
    }

    #[test]
    fn test_single_right_rotation() {
        let mut row = CellRow::default();
        row.rotate_right();
        assert_eq!(row.values(), ["5", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_three_left_rotations() {
        let mut row = CellRow::default();
        for _ in 0..3 {
            row.rotate_left();
        }
        assert_eq!(row.values(), ["4", "5", "1", "2", "3"]);
    }

    #[test]
    fn test_four_right_rotations_from_initial() {
        let mut row = CellRow::default();
        for _ in 0..4 {
            row.rotate_right();
        }
        assert_eq!(row.values(), ["2", "3", "4", "5", "1"]);
    }

    #[test]
    fn test_seven_right_rotations_from_initial() {
        let mut row = CellRow::default();
        for _ in 0..7 {
            row.rotate_right();
        }
        assert_eq!(row.values(), ["4", "5", "1", "2", "3"]);
    }

    #[test]
    fn test_cumulative_click_sequence() {
        // The full sequence the browser test drives: 1L, 2L, 4R, 7R, 10L+4R.
        let mut row = CellRow::default();

        row.rotate_left();
        assert_eq!(row.values(), ["2", "3", "4", "5", "1"]);

        row.rotate_left();
        row.rotate_left();
        assert_eq!(row.values(), ["4", "5", "1", "2", "3"]);

        for _ in 0..4 {
            row.rotate_right();
        }
        assert_eq!(row.values(), ["5", "1", "2", "3", "4"]);

        for _ in 0..7 {
            row.rotate_right();
        }
        assert_eq!(row.values(), ["3", "4", "5", "1", "2"]);

        for _ in 0..10 {
            row.rotate_left();
        }
        for _ in 0..4 {
            row.rotate_right();
        }
        assert_eq!(row.values(), ["4", "5", "1", "2", "3"]);
    }

    #[test]
    fn test_rotations_are_inverses() {
        let initial = row(&["a", "b", "c", "d"]);

        let mut r = initial.clone();
        r.rotate_left();
        r.rotate_right();
        assert_eq!(r, initial);

        let mut r = initial.clone();
        r.rotate_right();
        r.rotate_left();
        assert_eq!(r, initial);
    }

    #[test]
    fn test_full_cycle_restores_row() {
        for len in 1..=8usize {
            let values: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let initial = CellRow::new(values);

            let mut r = initial.clone();
            for _ in 0..len {
                r.rotate_left();
            }
            assert_eq!(r, initial, "left cycle of length {}", len);

            let mut r = initial.clone();
            for _ in 0..len {
                r.rotate_right();
            }
            assert_eq!(r, initial, "right cycle of length {}", len);
        }
    }

    #[test]
    fn test_k_rotations_compose() {
        let initial = row(&["1", "2", "3", "4", "5"]);

        for k in 0..12usize {
            let mut stepped = initial.clone();
            for _ in 0..k {
                stepped.rotate_left();
            }

            let mut expected: Vec<String> = initial.values().to_vec();
            expected.rotate_left(k % initial.len());
            assert_eq!(stepped.values(), expected.as_slice(), "k = {}", k);
        }
    }

    #[test]
    fn test_multiset_preserved() {
        let mut r = row(&["x", "y", "x", "z"]);
        let mut sorted_before: Vec<String> = r.values().to_vec();
        sorted_before.sort();

        for i in 0..17 {
            if i % 3 == 0 {
                r.rotate_right();
            } else {
                r.rotate_left();
            }
        }

        let mut sorted_after: Vec<String> = r.values().to_vec();
        sorted_after.sort();
        assert_eq!(sorted_before, sorted_after);
    }

    #[test]
    fn test_degenerate_rows_unchanged() {
        let mut empty = CellRow::new(Vec::<String>::new());
        empty.rotate_left();
        empty.rotate_right();
        assert!(empty.is_empty());

        let mut single = row(&["only"]);
        single.rotate_left();
        single.rotate_right();
        assert_eq!(single.values(), ["only"]);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut r = CellRow::default();
        r.rotate_left();
        r.rotate_left();
        assert_ne!(r.values(), ["1", "2", "3", "4", "5"]);

        r.reset();
        assert_eq!(r.values(), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!(" LEFT ".parse::<Direction>().unwrap(), Direction::Left);

        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_direction_display_round_trips() {
        for direction in [Direction::Left, Direction::Right] {
            let parsed: Direction = direction.to_string().parse().unwrap();
            assert_eq!(parsed, direction);
        }
    }
}
