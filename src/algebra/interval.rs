//! Interval patterns with a similarity threshold.
//!
//! A description is a vector of closed integer intervals, one per dimension.
//! Similarity (the meet) is the component-wise convex hull: two objects are
//! alike on a dimension to the extent the smallest interval covering both.
//! Wider intervals carry less information, so `a ≤ b` iff every component of
//! `a` contains the matching component of `b`.
//!
//! With a threshold θ, any hull wider than θ on some dimension says nothing
//! useful and collapses to [`IntervalPattern::Bottom`]. The threshold is a
//! field of the algebra instance; there is no shared default to reset.
//!
//! ```text
//! θ = 2
//! [0,5] ∨ [1,2]  = [1,2]      (join: component-wise intersection)
//! [0,5] ∧ [10,11] = ⊥         (hull [0,11] has width 11 > 2)
//! ```

use std::cmp::Ordering;

use super::PatternAlgebra;
use crate::error::{FcaError, Result};

/// A closed interval `[lo, hi]`.
pub type Interval = (i64, i64);

/// An interval-vector description.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntervalPattern {
    /// No valid description: some hull exceeded the threshold.
    Bottom,
    /// One interval per dimension.
    Intervals(Vec<Interval>),
    /// Contradictory description (some intervals do not overlap); identity
    /// of the hull.
    Empty,
}

/// Interval vectors of fixed dimension, optionally thresholded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdIntervals {
    dimensions: usize,
    theta: Option<u64>,
}

impl ThresholdIntervals {
    /// Unthresholded interval patterns.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            theta: None,
        }
    }

    /// Interval patterns where no interval may be wider than `theta`.
    pub fn with_theta(dimensions: usize, theta: u64) -> Self {
        Self {
            dimensions,
            theta: Some(theta),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn theta(&self) -> Option<u64> {
        self.theta
    }

    /// Build a validated pattern from explicit intervals.
    pub fn pattern(&self, intervals: Vec<Interval>) -> Result<IntervalPattern> {
        let pattern = IntervalPattern::Intervals(intervals);
        if self.contains(&pattern) {
            Ok(pattern)
        } else {
            Err(FcaError::InvalidPattern(format!(
                "{pattern:?} is not a {}-dimensional interval pattern within theta {:?}",
                self.dimensions, self.theta
            )))
        }
    }

    /// Description of a point: every interval is degenerate.
    pub fn point(&self, values: &[i64]) -> Result<IntervalPattern> {
        self.pattern(values.iter().map(|&v| (v, v)).collect())
    }

    fn within_theta(&self, (lo, hi): Interval) -> bool {
        self.theta.map_or(true, |theta| hi.abs_diff(lo) <= theta)
    }
}

impl PatternAlgebra for ThresholdIntervals {
    type Pattern = IntervalPattern;

    fn bottom(&self) -> IntervalPattern {
        IntervalPattern::Bottom
    }

    fn top(&self) -> Option<IntervalPattern> {
        Some(IntervalPattern::Empty)
    }

    fn join(&self, a: &IntervalPattern, b: &IntervalPattern) -> IntervalPattern {
        use IntervalPattern::*;
        match (a, b) {
            (Bottom, x) | (x, Bottom) => x.clone(),
            (Empty, _) | (_, Empty) => Empty,
            (Intervals(xs), Intervals(ys)) => {
                let mut out = Vec::with_capacity(xs.len());
                for (&(xl, xh), &(yl, yh)) in xs.iter().zip(ys) {
                    let (lo, hi) = (xl.max(yl), xh.min(yh));
                    if lo > hi {
                        return Empty;
                    }
                    out.push((lo, hi));
                }
                Intervals(out)
            }
        }
    }

    fn intersection(&self, a: &IntervalPattern, b: &IntervalPattern) -> IntervalPattern {
        use IntervalPattern::*;
        match (a, b) {
            (Bottom, _) | (_, Bottom) => Bottom,
            (Empty, x) | (x, Empty) => x.clone(),
            (Intervals(xs), Intervals(ys)) => {
                let mut out = Vec::with_capacity(xs.len());
                for (&(xl, xh), &(yl, yh)) in xs.iter().zip(ys) {
                    let hull = (xl.min(yl), xh.max(yh));
                    if !self.within_theta(hull) {
                        return Bottom;
                    }
                    out.push(hull);
                }
                Intervals(out)
            }
        }
    }

    fn order(&self, a: &IntervalPattern, b: &IntervalPattern) -> Option<Ordering> {
        use IntervalPattern::*;
        match (a, b) {
            _ if a == b => Some(Ordering::Equal),
            (Bottom, _) | (_, Empty) => Some(Ordering::Less),
            (_, Bottom) | (Empty, _) => Some(Ordering::Greater),
            (Intervals(xs), Intervals(ys)) => {
                if xs.len() != ys.len() {
                    return None;
                }
                let covers = |outer: &[Interval], inner: &[Interval]| {
                    outer
                        .iter()
                        .zip(inner)
                        .all(|(&(ol, oh), &(il, ih))| ol <= il && ih <= oh)
                };
                if covers(xs, ys) {
                    Some(Ordering::Less)
                } else if covers(ys, xs) {
                    Some(Ordering::Greater)
                } else {
                    None
                }
            }
        }
    }

    /// Bottom carries nothing, a proper vector one unit per dimension, and
    /// the contradictory top one more.
    fn length(&self, a: &IntervalPattern) -> usize {
        match a {
            IntervalPattern::Bottom => 0,
            IntervalPattern::Intervals(xs) => xs.len(),
            IntervalPattern::Empty => self.dimensions + 1,
        }
    }

    fn contains(&self, a: &IntervalPattern) -> bool {
        match a {
            IntervalPattern::Bottom | IntervalPattern::Empty => true,
            IntervalPattern::Intervals(xs) => {
                xs.len() == self.dimensions
                    && xs.iter().all(|&(lo, hi)| lo <= hi && self.within_theta((lo, hi)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IntervalPattern::*;

    #[test]
    fn test_threshold_collapses_wide_hull() {
        let alg = ThresholdIntervals::with_theta(1, 2);
        let a = Intervals(vec![(0, 5)]);
        let b = Intervals(vec![(1, 2)]);
        let c = Intervals(vec![(10, 11)]);

        assert_eq!(alg.join(&a, &b), Intervals(vec![(1, 2)]));
        assert_eq!(alg.intersection(&a, &c), Bottom);
        assert_eq!(alg.intersection(&b, &Intervals(vec![(2, 3)])), Intervals(vec![(1, 3)]));
    }

    #[test]
    fn test_unthresholded_hull() {
        let alg = ThresholdIntervals::new(2);
        let a = Intervals(vec![(0, 1), (5, 5)]);
        let b = Intervals(vec![(3, 4), (2, 6)]);
        assert_eq!(alg.intersection(&a, &b), Intervals(vec![(0, 4), (2, 6)]));
        assert_eq!(alg.join(&a, &b), Empty);
    }

    #[test]
    fn test_identities() {
        let alg = ThresholdIntervals::with_theta(1, 3);
        let a = Intervals(vec![(1, 2)]);
        assert_eq!(alg.join(&a, &alg.bottom()), a);
        assert_eq!(alg.intersection(&a, &Empty), a);
        assert_eq!(alg.intersection(&a, &a), a);
        assert_eq!(alg.join(&a, &a), a);
    }

    #[test]
    fn test_order_wider_is_lower() {
        let alg = ThresholdIntervals::new(1);
        let wide = Intervals(vec![(0, 10)]);
        let narrow = Intervals(vec![(2, 3)]);
        assert_eq!(alg.order(&wide, &narrow), Some(Ordering::Less));
        assert_eq!(alg.order(&narrow, &wide), Some(Ordering::Greater));
        assert_eq!(alg.order(&Intervals(vec![(0, 2)]), &Intervals(vec![(1, 3)])), None);
        assert!(alg.leq(&Bottom, &narrow));
        assert!(alg.leq(&narrow, &Empty));
    }

    #[test]
    fn test_domain_respects_theta() {
        let alg = ThresholdIntervals::with_theta(1, 2);
        assert!(alg.pattern(vec![(1, 2)]).is_ok());
        assert!(matches!(alg.pattern(vec![(0, 5)]), Err(FcaError::InvalidPattern(_))));
        assert!(alg.pattern(vec![(1, 2), (1, 2)]).is_err());
        assert!(alg.point(&[7]).is_ok());
    }

    #[test]
    fn test_instances_do_not_share_threshold() {
        let narrow = ThresholdIntervals::with_theta(1, 1);
        let wide = ThresholdIntervals::with_theta(1, 100);
        let a = Intervals(vec![(0, 0)]);
        let b = Intervals(vec![(5, 5)]);
        assert_eq!(narrow.intersection(&a, &b), Bottom);
        assert_eq!(wide.intersection(&a, &b), Intervals(vec![(0, 5)]));
        assert_eq!(narrow.intersection(&a, &b), Bottom);
    }
}
