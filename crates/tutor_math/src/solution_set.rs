//! Solution sets of one-variable inequalities over the rationals.

use crate::numeric::int;
use num_rational::BigRational;
use std::cmp::Ordering;
use tutor_api_models::IntervalValue;
use tutor_formatter::canonical_rational;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Unbounded,
    Open(BigRational),
    Closed(BigRational),
}

impl Bound {
    pub fn value(&self) -> Option<&BigRational> {
        match self {
            Bound::Unbounded => None,
            Bound::Open(v) | Bound::Closed(v) => Some(v),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Bound::Closed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    pub fn point(p: BigRational) -> Self {
        Self {
            lower: Bound::Closed(p.clone()),
            upper: Bound::Closed(p),
        }
    }

    pub fn contains(&self, x: &BigRational) -> bool {
        let above_lower = match &self.lower {
            Bound::Unbounded => true,
            Bound::Open(l) => x > l,
            Bound::Closed(l) => x >= l,
        };
        let below_upper = match &self.upper {
            Bound::Unbounded => true,
            Bound::Open(u) => x < u,
            Bound::Closed(u) => x <= u,
        };
        above_lower && below_upper
    }

    pub fn to_value(&self) -> IntervalValue {
        IntervalValue {
            lower: self.lower.value().map(canonical_rational),
            lower_closed: self.lower.is_closed(),
            upper: self.upper.value().map(canonical_rational),
            upper_closed: self.upper.is_closed(),
        }
    }

    /// Sample point inside the interval, used for substitution checks.
    pub fn sample(&self) -> BigRational {
        match (self.lower.value(), self.upper.value()) {
            (None, None) => int(0),
            (Some(l), None) => l + int(1),
            (None, Some(u)) => u - int(1),
            (Some(l), Some(u)) => {
                if l == u {
                    l.clone()
                } else {
                    (l + u) / int(2)
                }
            }
        }
    }
}

/// Ordered, pairwise disjoint union of intervals. Empty means `∅`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionSet {
    pub intervals: Vec<Interval>,
}

impl SolutionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all_reals() -> Self {
        Self {
            intervals: vec![Interval::new(Bound::Unbounded, Bound::Unbounded)],
        }
    }

    /// Build from intervals in any order; sorted by lower bound.
    pub fn from_intervals(mut intervals: Vec<Interval>) -> Self {
        intervals.sort_by(|a, b| compare_lower(&a.lower, &b.lower));
        Self { intervals }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, x: &BigRational) -> bool {
        self.intervals.iter().any(|i| i.contains(x))
    }

    pub fn to_values(&self) -> Vec<IntervalValue> {
        self.intervals.iter().map(Interval::to_value).collect()
    }
}

fn compare_lower(a: &Bound, b: &Bound) -> Ordering {
    match (a.value(), b.value()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y).then_with(|| b.is_closed().cmp(&a.is_closed())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_membership_respects_bound_kind() {
        let i = Interval::new(Bound::Open(int(0)), Bound::Closed(int(5)));
        assert!(!i.contains(&int(0)));
        assert!(i.contains(&int(5)));
        assert!(i.contains(&int(3)));
        assert!(!i.contains(&int(6)));
    }

    #[test]
    fn to_values_uses_canonical_text() {
        let set = SolutionSet::from_intervals(vec![
            Interval::new(Bound::Open(int(0)), Bound::Closed(int(5))),
            Interval::new(Bound::Unbounded, Bound::Closed(int(-5))),
        ]);
        let values = set.to_values();
        assert_eq!(values[0].lower, None);
        assert_eq!(values[0].upper.as_deref(), Some("-5"));
        assert!(values[0].upper_closed);
        assert_eq!(values[1].lower.as_deref(), Some("0"));
        assert!(!values[1].lower_closed);
    }

    #[test]
    fn sample_points_lie_inside() {
        let cases = [
            Interval::new(Bound::Unbounded, Bound::Open(int(-5))),
            Interval::new(Bound::Open(int(2)), Bound::Unbounded),
            Interval::new(Bound::Open(int(0)), Bound::Open(int(1))),
            Interval::point(int(7)),
            Interval::new(Bound::Unbounded, Bound::Unbounded),
        ];
        for interval in &cases {
            assert!(interval.contains(&interval.sample()), "{:?}", interval);
        }
    }
}
