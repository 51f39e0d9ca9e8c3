use crate::error::Fault;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// An exact monetary amount.
///
/// Wraps `rust_decimal::Decimal` so that line and cart totals never pass through
/// binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Same value written at the same scale (`10.0` is not identical to `10.00`).
    pub fn is_identical(&self, other: &Self) -> bool {
        self.0 == other.0 && self.0.scale() == other.0.scale()
    }

    /// Multiplies by a quantity.
    ///
    /// `Decimal` drops scale instead of failing when the mantissa runs out, so a result
    /// that could not keep every digit of the price counts as an overflow too.
    pub fn times(self, quantity: i64) -> Result<Self, Fault> {
        let product = self
            .0
            .checked_mul(Decimal::from(quantity))
            .ok_or(Fault::AmountOverflow)?;
        exact(product, &[self.0])
    }

    /// Adds two amounts, failing rather than rounding.
    pub fn checked_add(self, rhs: Self) -> Result<Self, Fault> {
        let sum = self.0.checked_add(rhs.0).ok_or(Fault::AmountOverflow)?;
        exact(sum, &[self.0, rhs.0])
    }

    /// Rounds half away from zero to exactly `dp` places, for presentation.
    /// Arithmetic elsewhere stays exact.
    pub fn round_to(self, dp: u32) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        Self(rounded)
    }
}

// No operand may carry non-zero digits past the scale the result was cut down to.
// A zero result never comes from running out of mantissa.
fn exact(result: Decimal, operands: &[Decimal]) -> Result<Money, Fault> {
    let scale = result.scale();
    if result.is_zero() || operands.iter().all(|op| op.round_dp(scale) == *op) {
        Ok(Money(result))
    } else {
        Err(Fault::AmountOverflow)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
