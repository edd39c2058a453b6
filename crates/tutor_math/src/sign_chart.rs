//! Interval method for `s·Π(x − nᵢ) / Π(x − dⱼ)  ⋈  0`.
//!
//! Critical points split the line into open regions. The sign of each region
//! is read at a test point; critical points are included only when they are
//! zeros of the numerator (never poles) and the relation is non-strict.

use crate::numeric::{int, sign_mul, sign_of};
use crate::solution_set::{Bound, Interval, SolutionSet};
use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

impl Relation {
    /// Accepts `<`, `>`, `<=`, `>=`, `≤`, `≥` and the words `lt`, `gt`, `le`, `ge`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "<" | "lt" => Some(Relation::Less),
            ">" | "gt" => Some(Relation::Greater),
            "<=" | "≤" | "le" => Some(Relation::LessEq),
            ">=" | "≥" | "ge" => Some(Relation::GreaterEq),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Less => "<",
            Relation::Greater => ">",
            Relation::LessEq => "≤",
            Relation::GreaterEq => "≥",
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Relation::Less | Relation::Greater)
    }

    /// Does `value ⋈ 0` hold for a value of the given sign?
    pub fn holds(self, sign: Ordering) -> bool {
        match self {
            Relation::Less => sign == Ordering::Less,
            Relation::Greater => sign == Ordering::Greater,
            Relation::LessEq => sign != Ordering::Greater,
            Relation::GreaterEq => sign != Ordering::Less,
        }
    }

    /// Relation after multiplying both sides by a negative number.
    pub fn flipped(self) -> Self {
        match self {
            Relation::Less => Relation::Greater,
            Relation::Greater => Relation::Less,
            Relation::LessEq => Relation::GreaterEq,
            Relation::GreaterEq => Relation::LessEq,
        }
    }
}

/// One open region between neighbouring critical points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRegion {
    pub interval: Interval,
    pub test_point: BigRational,
    pub sign: Ordering,
}

impl SignRegion {
    pub fn sign_symbol(&self) -> &'static str {
        match self.sign {
            Ordering::Greater => "+",
            Ordering::Less => "-",
            Ordering::Equal => "0",
        }
    }
}

pub type Roots = SmallVec<[BigRational; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalFunction {
    pub leading: BigRational,
    pub numerator_roots: Roots,
    pub denominator_roots: Roots,
}

impl RationalFunction {
    pub fn new(leading: BigRational, numerator_roots: Roots, denominator_roots: Roots) -> Self {
        Self {
            leading,
            numerator_roots,
            denominator_roots,
        }
    }

    pub fn is_pole(&self, x: &BigRational) -> bool {
        self.denominator_roots.iter().any(|d| d == x)
    }

    /// Sign of the function at `x`, `None` at a pole.
    pub fn sign_at(&self, x: &BigRational) -> Option<Ordering> {
        if self.is_pole(x) {
            return None;
        }
        let sign = self
            .numerator_roots
            .iter()
            .chain(self.denominator_roots.iter())
            .fold(sign_of(&self.leading), |acc, r| sign_mul(acc, sign_of(&(x - r))));
        Some(sign)
    }

    /// All numerator and denominator roots, sorted and deduplicated.
    pub fn critical_points(&self) -> Vec<BigRational> {
        let mut points: Vec<BigRational> = self
            .numerator_roots
            .iter()
            .chain(self.denominator_roots.iter())
            .cloned()
            .collect();
        points.sort();
        points.dedup();
        points
    }

    pub fn sign_table(&self) -> Vec<SignRegion> {
        let points = self.critical_points();
        let n = points.len();
        (0..=n)
            .map(|i| {
                let lower = if i == 0 {
                    Bound::Unbounded
                } else {
                    Bound::Open(points[i - 1].clone())
                };
                let upper = if i == n {
                    Bound::Unbounded
                } else {
                    Bound::Open(points[i].clone())
                };
                let test_point = match (i, n) {
                    (_, 0) => int(0),
                    (0, _) => &points[0] - int(1),
                    (i, n) if i == n => &points[n - 1] + int(1),
                    (i, _) => (&points[i - 1] + &points[i]) / int(2),
                };
                // Test points are never critical, so the sign is defined.
                let sign = self.sign_at(&test_point).unwrap_or(Ordering::Equal);
                SignRegion {
                    interval: Interval::new(lower, upper),
                    test_point,
                    sign,
                }
            })
            .collect()
    }

    pub fn solve(&self, relation: Relation) -> SolutionSet {
        let points = self.critical_points();
        let regions = self.sign_table();
        let n = points.len();

        let mut intervals = Vec::new();
        let mut lower: Option<Bound> = None;

        for (i, region) in regions.iter().enumerate() {
            if relation.holds(region.sign) {
                if lower.is_none() {
                    lower = Some(region.interval.lower.clone());
                }
            } else if let Some(lo) = lower.take() {
                // Only reachable when the previous critical point was included.
                intervals.push(Interval::new(lo, Bound::Closed(points[i - 1].clone())));
            }

            if i < n {
                let p = &points[i];
                let included = !self.is_pole(p) && !relation.is_strict();
                if included {
                    if lower.is_none() {
                        lower = Some(Bound::Closed(p.clone()));
                    }
                } else if let Some(lo) = lower.take() {
                    intervals.push(Interval::new(lo, Bound::Open(p.clone())));
                }
            }
        }
        if let Some(lo) = lower {
            intervals.push(Interval::new(lo, Bound::Unbounded));
        }

        SolutionSet { intervals }
    }
}
