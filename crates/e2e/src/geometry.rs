//! Vertical alignment model for the layout check.
//!
//! The browser reports one bounding box per element; the harness asserts
//! that every pair of boxes shares a vertical center within a pixel
//! tolerance. The pairwise loop runs over all pairs, including the last
//! element (the original JS harness never did, due to a typo in its loop
//! bound).

use serde::{Deserialize, Serialize};

/// Bounding box as reported by Playwright's `boundingBox()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// A pair of elements whose vertical centers differ by more than the
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Misalignment {
    pub first: usize,
    pub second: usize,
    pub first_center_y: f64,
    pub second_center_y: f64,
}

impl Misalignment {
    pub fn delta(&self) -> f64 {
        (self.first_center_y - self.second_center_y).abs()
    }
}

/// Compare every unordered pair of boxes; return the first pair whose
/// vertical centers differ by more than `tolerance_px`.
pub fn vertical_misalignment(boxes: &[BoundingBox], tolerance_px: f64) -> Option<Misalignment> {
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let a = boxes[i].center_y();
            let b = boxes[j].center_y();
            if (a - b).abs() > tolerance_px {
                return Some(Misalignment {
                    first: i,
                    second: j,
                    first_center_y: a,
                    second_center_y: b,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(y: f64, height: f64) -> BoundingBox {
        BoundingBox {
            x: 0.0,
            y,
            width: 48.0,
            height,
        }
    }

    #[test]
    fn test_center_y() {
        assert_eq!(bbox(10.0, 20.0).center_y(), 20.0);
    }

    #[test]
    fn test_aligned_rows_pass() {
        // Same center (y + h/2 == 24) despite differing heights.
        let boxes = vec![bbox(0.0, 48.0), bbox(8.0, 32.0), bbox(12.0, 24.0)];
        assert_eq!(vertical_misalignment(&boxes, 2.0), None);
    }

    #[test]
    fn test_within_tolerance_passes() {
        let boxes = vec![bbox(0.0, 48.0), bbox(1.5, 48.0)];
        assert_eq!(vertical_misalignment(&boxes, 2.0), None);
    }

    #[test]
    fn test_misalignment_reports_pair() {
        let boxes = vec![bbox(0.0, 48.0), bbox(0.0, 48.0), bbox(10.0, 48.0)];
        let m = vertical_misalignment(&boxes, 2.0).unwrap();
        assert_eq!((m.first, m.second), (0, 2));
        assert_eq!(m.delta(), 10.0);
    }

    #[test]
    fn test_last_pair_is_checked() {
        // Only the final pair differs; the loop must reach it.
        let boxes = vec![bbox(0.0, 48.0), bbox(0.0, 48.0), bbox(0.0, 48.0), bbox(6.0, 48.0)];
        let m = vertical_misalignment(&boxes, 2.0).unwrap();
        assert_eq!(m.second, 3);
    }

    #[test]
    fn test_degenerate_inputs_pass() {
        assert_eq!(vertical_misalignment(&[], 2.0), None);
        assert_eq!(vertical_misalignment(&[bbox(5.0, 10.0)], 2.0), None);
    }
}
