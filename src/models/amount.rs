//! Exact decimal amounts
//!
//! An [`Amount`] is `coefficient × 10^exponent` with an arbitrary-precision
//! coefficient, so money never passes through binary floating point. An
//! amount is either *set* (it carries a value, possibly zero) or *empty*
//! (it was never assigned).

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Largest exponent difference that addition will align
pub const MAX_EXPONENT_SPREAD: u64 = 256;

/// Arithmetic failure on amounts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Operands are too far apart in scale to be aligned exactly
    #[error("cannot align amounts whose exponents differ by {spread} digits")]
    ExponentSpread { spread: u64 },
}

/// Error returned when a string is not a decimal amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("Invalid amount format: {0}")]
    InvalidFormat(String),
    #[error("Amount exponent out of range: {0}")]
    ExponentOutOfRange(String),
}

/// An exact decimal amount of money
#[derive(Debug, Clone)]
pub struct Amount {
    coefficient: BigInt,
    exponent: i32,
    set: bool,
}

impl Amount {
    /// Create an amount from its parts. No rounding takes place.
    ///
    /// # Examples
    /// ```
    /// use beans::models::Amount;
    /// let amount = Amount::new(1050, -2); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn new(coefficient: impl Into<BigInt>, exponent: i32) -> Self {
        Self {
            coefficient: coefficient.into(),
            exponent,
            set: true,
        }
    }

    /// An amount that was never assigned
    pub fn empty() -> Self {
        Self {
            coefficient: BigInt::zero(),
            exponent: 0,
            set: false,
        }
    }

    /// A set amount of zero
    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// True if the amount was never assigned
    pub fn is_empty(&self) -> bool {
        !self.set
    }

    /// True if the amount is set and equal to zero
    pub fn is_zero(&self) -> bool {
        self.set && self.coefficient.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.coefficient.is_positive()
    }

    /// Replace an empty amount with zero
    pub fn or_zero(self) -> Self {
        if self.set {
            self
        } else {
            Self::zero()
        }
    }

    /// The additive inverse. An empty amount stays empty.
    pub fn negate(&self) -> Self {
        if !self.set {
            return self.clone();
        }
        Self {
            coefficient: -&self.coefficient,
            exponent: self.exponent,
            set: true,
        }
    }

    /// Number of digits after the decimal point as written
    pub fn decimal_places(&self) -> u32 {
        if self.exponent < 0 {
            self.exponent.unsigned_abs()
        } else {
            0
        }
    }

    /// Number of digits before the decimal point, ignoring leading zeros
    ///
    /// `1e300` has 301; `0.05` and zero have none.
    pub fn integer_digits(&self) -> u64 {
        if !self.set || self.coefficient.is_zero() {
            return 0;
        }
        let digits = self.coefficient.abs().to_str_radix(10).len() as i64;
        (digits + i64::from(self.exponent)).max(0) as u64
    }

    /// Strip trailing zeros from the coefficient. Zero normalizes to `0`.
    pub fn normalize(&self) -> Self {
        if !self.set {
            return self.clone();
        }
        if self.coefficient.is_zero() {
            return Self::zero();
        }

        let ten = BigInt::from(10);
        let mut coefficient = self.coefficient.clone();
        let mut exponent = self.exponent;
        while exponent < i32::MAX && (&coefficient % &ten).is_zero() {
            coefficient /= &ten;
            exponent += 1;
        }
        Self::new(coefficient, exponent)
    }

    /// Add two amounts exactly
    pub fn add(&self, other: &Amount) -> Result<Amount, AmountError> {
        Self::sum([self, other])
    }

    /// Subtract `other` from this amount exactly
    pub fn sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        Self::sum([self, &other.negate()])
    }

    /// Sum any number of amounts exactly
    ///
    /// Operands are aligned to the smallest exponent among them before the
    /// coefficients are added. Empty operands count as zero; the sum of no
    /// set operands is a set zero.
    pub fn sum<'a, I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        let operands: Vec<&Amount> = amounts.into_iter().filter(|a| a.set).collect();
        if operands.is_empty() {
            return Ok(Self::zero());
        }

        // A zero operand can only lower the result's exponent, never force alignment
        let min_exponent = operands.iter().map(|a| a.exponent).min().unwrap_or(0);
        let nonzero: Vec<&Amount> = operands
            .into_iter()
            .filter(|a| !a.coefficient.is_zero())
            .collect();
        let Some(max_exponent) = nonzero.iter().map(|a| a.exponent).max() else {
            return Ok(Self::new(BigInt::zero(), min_exponent));
        };

        let spread = (i64::from(max_exponent) - i64::from(min_exponent)) as u64;
        if spread > MAX_EXPONENT_SPREAD {
            return Err(AmountError::ExponentSpread { spread });
        }

        let coefficient = nonzero
            .iter()
            .map(|a| scale_up(&a.coefficient, (a.exponent - min_exponent) as u32))
            .fold(BigInt::zero(), |acc, c| acc + c);

        Ok(Self::new(coefficient, min_exponent))
    }

    /// Order two amounts by value
    ///
    /// Set amounts are compared numerically regardless of exponent, so `5`
    /// and `5.00` are equal. Empty amounts are equal to each other and order
    /// below every set amount.
    pub fn compare(&self, other: &Amount) -> Ordering {
        match (self.set, other.set) {
            (false, false) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (true, true) => {}
        }

        let (a, b) = (&self.coefficient, &other.coefficient);
        let sign_order = signum(a).cmp(&signum(b));
        if sign_order != Ordering::Equal || a.is_zero() {
            return sign_order;
        }

        // Same non-zero sign: compare orders of magnitude before aligning.
        let magnitude_a = digit_count(a) + i64::from(self.exponent);
        let magnitude_b = digit_count(b) + i64::from(other.exponent);
        let magnitude_order = magnitude_a.cmp(&magnitude_b);
        let magnitude_order = if a.is_negative() {
            magnitude_order.reverse()
        } else {
            magnitude_order
        };
        if magnitude_order != Ordering::Equal {
            return magnitude_order;
        }

        // Equal magnitudes bound the exponent spread by the digit counts.
        let min_exponent = self.exponent.min(other.exponent);
        let scaled_a = scale_up(a, (self.exponent - min_exponent) as u32);
        let scaled_b = scale_up(b, (other.exponent - min_exponent) as u32);
        scaled_a.cmp(&scaled_b)
    }
}

fn scale_up(coefficient: &BigInt, digits: u32) -> BigInt {
    if digits == 0 {
        coefficient.clone()
    } else {
        coefficient * BigInt::from(10).pow(digits)
    }
}

fn signum(value: &BigInt) -> i8 {
    if value.is_negative() {
        -1
    } else if value.is_zero() {
        0
    } else {
        1
    }
}

fn digit_count(value: &BigInt) -> i64 {
    value.abs().to_str_radix(10).len() as i64
}

impl Default for Amount {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        self.negate()
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        self.negate()
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.set {
            return Ok(());
        }

        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        let digits = self.coefficient.abs().to_str_radix(10);

        if self.exponent >= 0 {
            if self.coefficient.is_zero() {
                return write!(f, "0");
            }
            let zeros = "0".repeat(self.exponent as usize);
            return write!(f, "{}{}{}", sign, digits, zeros);
        }

        let places = self.exponent.unsigned_abs() as usize;
        let padded = if digits.len() <= places {
            format!("{}{}", "0".repeat(places + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - places);
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parse a decimal string such as `"10.50"`, `"-3"`, or `"1.5e2"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || AmountParseError::InvalidFormat(s.to_string());

        let (negative, rest) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (mantissa, exponent_part) = match rest.find(['e', 'E']) {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };

        let (whole, fraction) = match mantissa.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (mantissa, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let written_exponent: i64 = match exponent_part {
            Some(exp) => exp.parse().map_err(|_| invalid())?,
            None => 0,
        };
        let exponent = written_exponent - fraction.len() as i64;
        let exponent = i32::try_from(exponent)
            .map_err(|_| AmountParseError::ExponentOutOfRange(s.to_string()))?;

        let digits = format!("{}{}", whole, fraction);
        let mut coefficient = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        if negative {
            coefficient = -coefficient;
        }

        Ok(Self::new(coefficient, exponent))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.set {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_none()
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string, an integer, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        if v.trim().is_empty() {
            return Ok(Amount::empty());
        }
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::new(v, 0))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::new(v, 0))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Amount, E> {
        Err(E::custom(
            "fractional amounts must be written as decimal strings",
        ))
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::empty())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::empty())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
