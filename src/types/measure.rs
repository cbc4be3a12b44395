//! Definition of the [`Measure`] type.
//!
//! Distances and matching scores share the same failure mode: a
//! missing input means "no signal", which the ranking treats like
//! positive infinity. Rather than letting raw `f64::INFINITY` flow
//! through sums and sorts, the signal is tagged explicitly.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use ordered_float::OrderedFloat;
use serde::Serialize;

/// A distance or score that may be unknown.
///
/// The ordering is total: every [`Measure::Value`] sorts below
/// [`Measure::Unknown`], so `Unknown` behaves exactly like positive
/// infinity. It is the most favorable matching score and the least
/// favorable distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Measure {
    /// A finite value.
    Value(OrderedFloat<f64>),
    /// No signal available.
    Unknown,
}

impl Measure {
    /// Wraps a float, mapping anything non-finite (including NaN and
    /// overflow from very small divisors) to [`Measure::Unknown`].
    pub fn new(value: f64) -> Measure {
        if value.is_finite() {
            Measure::Value(OrderedFloat(value))
        } else {
            Measure::Unknown
        }
    }

    /// The finite value, if known.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(v.into_inner()),
            Measure::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Measure::Unknown)
    }

    /// The measure as a float, with `Unknown` as `f64::INFINITY`.
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::INFINITY)
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Measure::Value(a), Measure::Value(b)) => a.cmp(b),
            (Measure::Value(_), Measure::Unknown) => Ordering::Less,
            (Measure::Unknown, Measure::Value(_)) => Ordering::Greater,
            (Measure::Unknown, Measure::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Measure {
    type Output = Measure;

    fn add(self, rhs: Measure) -> Measure {
        match (self, rhs) {
            (Measure::Value(a), Measure::Value(b)) => Measure::new(a.into_inner() + b.into_inner()),
            _ => Measure::Unknown,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Value(v) => write!(f, "{}", v),
            Measure::Unknown => write!(f, "unknown"),
        }
    }
}
