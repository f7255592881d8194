use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};

/// Tolerance used by the floating point domain. Exact domains ignore it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precision {
    epsilon: f64,
}

impl Precision {
    pub fn new(epsilon: f64) -> Result<Self> {
        match epsilon.is_finite() && epsilon > 0.0 {
            true => Ok(Self { epsilon }),
            false => Err(Error::InvalidPrecision(epsilon)),
        }
    }

    pub fn epsilon(self) -> f64 {
        self.epsilon
    }

    /// Shrinks the tolerance by `factor`, which must be in `(0, 1]`.
    pub(crate) fn scaled(self, factor: f64) -> Self {
        debug_assert!(factor > 0.0 && factor <= 1.0);
        Self { epsilon: self.epsilon * factor }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

pub trait Number:
    Copy
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
{
    fn zero() -> Self;

    fn from_i64(n: i64) -> Self;

    fn to_f64(self) -> f64;

    /// Total comparison, treating values within the precision as equal.
    fn compare(self, other: Self, precision: Precision) -> Ordering;

    fn magnitude(self) -> Self {
        match self < Self::zero() {
            true => -self,
            false => self,
        }
    }

    fn larger(self, other: Self) -> Self {
        match other > self {
            true => other,
            false => self,
        }
    }

    fn smaller(self, other: Self) -> Self {
        match other < self {
            true => other,
            false => self,
        }
    }
}

/// A domain closed under division, in which game values are expressed.
pub trait Field: Number + Div<Output = Self> {}

/// Thresholds to compare the values of a subgame against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket<V> {
    /// Every value is at most the first threshold, at least the second, or equal
    /// to one of them.
    Split(V, V),
    /// The interval is too narrow to split further.
    Resolved(V),
}

/// An edge weight type, together with the domain its game values live in and the
/// domain the energy reductions compute in.
pub trait Weight: Number {
    type Value: Field;
    type Energy: Number;

    fn to_value(self) -> Self::Value;

    /// Energy weight of `w` against threshold `a`, a positive multiple of `a - w`.
    fn mean_payoff_cost(w: Self, a: Self::Value) -> Self::Energy;

    /// Energy weight of `(w1, w2)` against threshold `a`, a positive multiple of
    /// `a * w2 - w1`.
    fn ratio_cost(w1: Self, w2: Self, a: Self::Value) -> Self::Energy;

    /// Thresholds for a subgame whose values lie in `[lo, hi]` and have
    /// denominators at most `max_den`.
    fn bracket(lo: Self::Value, hi: Self::Value, max_den: Self, precision: Precision)
        -> Bracket<Self::Value>;

    /// Number of rounds of bounded value iteration needed to read off the sign of
    /// a mean-payoff value on `vertices` vertices with energy weights bounded by
    /// `max_cost`.
    fn horizon(vertices: usize, max_cost: Self::Energy, precision: Precision) -> usize;

    /// Sign of the mean-payoff value, given the value of the game after `horizon`
    /// rounds.
    fn horizon_sign(
        total: Self::Energy,
        horizon: usize,
        vertices: usize,
        precision: Precision,
    ) -> Ordering;
}

macro_rules! exact_number {
    ($($ty:ty),*) => {
        $(
            impl Number for $ty {
                fn zero() -> Self {
                    0
                }

                fn from_i64(n: i64) -> Self {
                    n as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn compare(self, other: Self, _: Precision) -> Ordering {
                    Ord::cmp(&self, &other)
                }
            }
        )*
    };
}

exact_number!(i64, i128);

impl Weight for i64 {
    type Value = Fraction;
    type Energy = i128;

    fn to_value(self) -> Fraction {
        Fraction::from_int(self as i128)
    }

    fn mean_payoff_cost(w: i64, a: Fraction) -> i128 {
        a.num - a.den * w as i128
    }

    fn ratio_cost(w1: i64, w2: i64, a: Fraction) -> i128 {
        a.num * w2 as i128 - a.den * w1 as i128
    }

    fn bracket(lo: Fraction, hi: Fraction, max_den: i64, _: Precision) -> Bracket<Fraction> {
        let mid = (lo + hi) / Fraction::from_int(2);
        let max_den = max_den as i128;
        Bracket::Split(mid.floor_with_denominator(max_den), mid.ceil_with_denominator(max_den))
    }

    fn horizon(vertices: usize, max_cost: i128, _: Precision) -> usize {
        let n = vertices as i128;
        let rounds = (4 * n)
            .checked_mul(n)
            .and_then(|r| r.checked_mul(max_cost))
            .and_then(|r| r.checked_add(1));
        rounds.and_then(|r| usize::try_from(r).ok()).unwrap_or(usize::MAX)
    }

    fn horizon_sign(total: i128, horizon: usize, vertices: usize, _: Precision) -> Ordering {
        // Values have denominators at most `vertices`, so a nonzero value is at
        // least 1/n away from zero while the horizon error is below 1/2n.
        match 2 * vertices as i128 * total.abs() < horizon as i128 {
            true => Ordering::Equal,
            false => total.cmp(&0),
        }
    }
}

impl Number for f64 {
    fn zero() -> Self {
        0.0
    }

    fn from_i64(n: i64) -> Self {
        n as f64
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn compare(self, other: Self, precision: Precision) -> Ordering {
        match (self - other).abs() <= precision.epsilon {
            true => Ordering::Equal,
            false => self.total_cmp(&other),
        }
    }
}

impl Field for f64 {}

impl Weight for f64 {
    type Value = f64;
    type Energy = f64;

    fn to_value(self) -> f64 {
        self
    }

    fn mean_payoff_cost(w: f64, a: f64) -> f64 {
        a - w
    }

    fn ratio_cost(w1: f64, w2: f64, a: f64) -> f64 {
        a * w2 - w1
    }

    fn bracket(lo: f64, hi: f64, _: f64, precision: Precision) -> Bracket<f64> {
        // An irrational share of the interval keeps thresholds off the ratios of
        // small integers, which game values often are.
        const SPLIT: f64 = 0.381_966_011_250_105_1;

        let split = lo + (hi - lo) * SPLIT;
        match hi - lo <= precision.epsilon || split <= lo || split >= hi {
            true => Bracket::Resolved(lo + (hi - lo) / 2.0),
            false => Bracket::Split(split, split),
        }
    }

    fn horizon(vertices: usize, max_cost: f64, precision: Precision) -> usize {
        (4.0 * vertices as f64 * max_cost / precision.epsilon).ceil().max(1.0) as usize
    }

    fn horizon_sign(total: f64, horizon: usize, _: usize, precision: Precision) -> Ordering {
        (total / horizon as f64).compare(0.0, precision)
    }
}

/// Exact rational number, always kept in lowest terms with a positive denominator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i128,
    den: i128,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };

    pub fn new(num: i128, den: i128) -> Self {
        assert!(den != 0, "fraction with zero denominator");
        let sign = den.signum();
        let g = gcd(num, den).max(1);
        Self { num: sign * num / g, den: sign * den / g }
    }

    pub const fn from_int(n: i128) -> Self {
        Self { num: n, den: 1 }
    }

    pub fn numer(self) -> i128 {
        self.num
    }

    pub fn denom(self) -> i128 {
        self.den
    }

    pub fn floor(self) -> i128 {
        self.num.div_euclid(self.den)
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// The largest fraction `p/q <= self` with `1 <= q <= max_den`.
    pub fn floor_with_denominator(self, max_den: i128) -> Fraction {
        (1..=max_den.max(1))
            .map(|q| Fraction::new((self.num * q).div_euclid(self.den), q))
            .fold(Fraction::from_int(self.floor()), |best, f| best.larger(f))
    }

    /// The smallest fraction `p/q >= self` with `1 <= q <= max_den`.
    pub fn ceil_with_denominator(self, max_den: i128) -> Fraction {
        -(-self).floor_with_denominator(max_den)
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    (a, b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_int(value as i128)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross multiplication keeps the order.
        Ord::cmp(&(self.num * other.den), &(other.num * self.den))
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Fraction {
        Fraction::new(self.num * rhs.den + rhs.num * self.den, self.den * rhs.den)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Self) -> Fraction {
        self + -rhs
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction { num: -self.num, den: self.den }
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Self) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Self) -> Fraction {
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.den {
            1 => write!(f, "{}", self.num),
            _ => write!(f, "{}/{}", self.num, self.den),
        }
    }
}

impl Number for Fraction {
    fn zero() -> Self {
        Fraction::ZERO
    }

    fn from_i64(n: i64) -> Self {
        Fraction::from(n)
    }

    fn to_f64(self) -> f64 {
        Fraction::to_f64(self)
    }

    fn compare(self, other: Self, _: Precision) -> Ordering {
        self.cmp(&other)
    }
}

impl Field for Fraction {}
